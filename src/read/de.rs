use std::fmt;

use serde::{
	de::{
		self,
		value::{MapDeserializer, SeqDeserializer},
		IntoDeserializer, Unexpected, Visitor,
	},
	forward_to_deserialize_any, Deserializer,
};

use super::value::Value;

/// Failure converting a resolved [`Value`] into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Error(String);

impl de::Error for Error {
	fn custom<T: fmt::Display>(message: T) -> Self {
		Error(message.to_string())
	}
}

// Cell text is untyped, so numbers and booleans are parsed out of scalars on
// demand, as the target type asks for them.
macro_rules! deserialize_parsed {
	($($method:ident => $visit:ident,)*) => {$(
		fn $method<V>(self, visitor: V) -> Result<V::Value, Error>
		where
			V: Visitor<'de>,
		{
			match self {
				Value::Scalar(text) => match text.trim().parse() {
					Ok(parsed) => visitor.$visit(parsed),
					Err(_) => Err(de::Error::invalid_value(Unexpected::Str(&text), &visitor)),
				},
				other => other.deserialize_any(visitor),
			}
		}
	)*};
}

impl<'de> Deserializer<'de> for Value {
	type Error = Error;

	fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		match self {
			Value::Array(values) => {
				let mut sequence: SeqDeserializer<_, Error> = SeqDeserializer::new(values.into_iter());
				let output = visitor.visit_seq(&mut sequence)?;
				sequence.end()?;
				Ok(output)
			}
			Value::Object(fields) => {
				let mut map: MapDeserializer<'_, _, Error> = MapDeserializer::new(fields.into_iter());
				let output = visitor.visit_map(&mut map)?;
				map.end()?;
				Ok(output)
			}
			Value::Scalar(text) => visitor.visit_string(text),
		}
	}

	deserialize_parsed! {
		deserialize_bool => visit_bool,
		deserialize_i8 => visit_i8,
		deserialize_i16 => visit_i16,
		deserialize_i32 => visit_i32,
		deserialize_i64 => visit_i64,
		deserialize_u8 => visit_u8,
		deserialize_u16 => visit_u16,
		deserialize_u32 => visit_u32,
		deserialize_u64 => visit_u64,
		deserialize_f32 => visit_f32,
		deserialize_f64 => visit_f64,
	}

	fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		match self {
			Value::Scalar(text) => match text.parse() {
				Ok(parsed) => visitor.visit_char(parsed),
				Err(_) => Err(de::Error::invalid_value(Unexpected::Str(&text), &visitor)),
			},
			other => other.deserialize_any(visitor),
		}
	}

	/// Blank cells are `None`.
	fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		match self {
			Value::Scalar(text) if text.is_empty() => visitor.visit_none(),
			other => visitor.visit_some(other),
		}
	}

	fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		match self {
			Value::Scalar(text) if text.is_empty() => visitor.visit_unit(),
			other => other.deserialize_any(visitor),
		}
	}

	fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		visitor.visit_newtype_struct(self)
	}

	/// Scalars name unit variants.
	fn deserialize_enum<V>(
		self,
		_name: &'static str,
		_variants: &'static [&'static str],
		visitor: V,
	) -> Result<V::Value, Error>
	where
		V: Visitor<'de>,
	{
		match self {
			Value::Scalar(text) => visitor.visit_enum(text.into_deserializer()),
			other => other.deserialize_any(visitor),
		}
	}

	forward_to_deserialize_any! {
		i128 u128 str string bytes byte_buf unit_struct seq tuple tuple_struct
		map struct identifier ignored_any
	}
}

impl<'de> IntoDeserializer<'de, Error> for Value {
	type Deserializer = Value;

	fn into_deserializer(self) -> Self::Deserializer {
		self
	}
}
