use serde::ser::{Serialize, SerializeMap, SerializeSeq};

/// A resolved cell tree.
///
/// Object keys keep header order. Every embedded reference is an independent
/// copy of its target row; no structure is shared between nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Array(Vec<Value>),
	Object(Vec<(String, Value)>),
	Scalar(String),
}

impl Value {
	/// Look up a key on an object. Non-objects have no keys.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Object(fields) => fields
				.iter()
				.find_map(|(name, value)| (name == key).then_some(value)),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Scalar(text) => Some(text),
			_ => None,
		}
	}
}

impl From<&str> for Value {
	fn from(text: &str) -> Self {
		Value::Scalar(text.to_string())
	}
}

impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Value::Array(values) => serialize_array(serializer, values),
			Value::Object(fields) => serialize_object(serializer, fields),
			Value::Scalar(text) => serializer.serialize_str(text),
		}
	}
}

fn serialize_array<S>(serializer: S, values: &[Value]) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	let mut sequence = serializer.serialize_seq(Some(values.len()))?;
	for value in values {
		sequence.serialize_element(value)?;
	}
	sequence.end()
}

fn serialize_object<S>(serializer: S, fields: &[(String, Value)]) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	let mut map = serializer.serialize_map(Some(fields.len()))?;
	for (name, value) in fields {
		map.serialize_entry(name, value)?;
	}
	map.end()
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn serializes_in_key_order() {
		let value = Value::Object(vec![
			("zip".into(), "12345".into()),
			("country".into(), "US".into()),
			(
				"tags".into(),
				Value::Array(vec!["a".into(), Value::Object(vec![])]),
			),
		]);

		let got = serde_json::to_string(&value).expect("serialization should not fail");
		assert_eq!(got, r#"{"zip":"12345","country":"US","tags":["a",{}]}"#);
	}

	#[test]
	fn get_object_keys() {
		let value = Value::Object(vec![("name".into(), "Ann".into())]);

		assert_eq!(value.get("name").and_then(Value::as_str), Some("Ann"));
		assert_eq!(value.get("age"), None);
		assert_eq!(Value::from("x").get("name"), None);
	}
}
