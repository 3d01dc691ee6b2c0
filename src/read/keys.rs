use std::collections::HashMap;

use serde::Deserialize;

use super::error::{Error, Result};

/// Policy deciding the output key used for each column of a resolved row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum KeyNaming {
	/// Use the column name as-is.
	#[default]
	Verbatim,

	/// Look the column name up in `mapping`. Columns within `scope` that have
	/// no mapping fail with [`Error::MissingMapping`].
	Renamed {
		mapping: HashMap<String, String>,
		#[serde(default)]
		scope: RenameScope,
	},
}

/// Which columns a [`KeyNaming::Renamed`] policy applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameScope {
	#[default]
	All,

	/// Only columns whose cell holds a reference or list reference are
	/// renamed; scalar cells keep their column name.
	References,
}

impl KeyNaming {
	pub fn renamed(mapping: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
		KeyNaming::Renamed {
			mapping: mapping
				.into_iter()
				.map(|(column, key)| (column.into(), key.into()))
				.collect(),
			scope: RenameScope::All,
		}
	}

	pub fn with_scope(self, scope: RenameScope) -> Self {
		match self {
			KeyNaming::Renamed { mapping, .. } => KeyNaming::Renamed { mapping, scope },
			other => other,
		}
	}

	/// Output key for `column`. `reference` is whether the cell being emitted
	/// was a reference expression.
	pub fn key(&self, column: &str, reference: bool) -> Result<String> {
		match self {
			KeyNaming::Verbatim => Ok(column.to_string()),
			KeyNaming::Renamed {
				scope: RenameScope::References,
				..
			} if !reference => Ok(column.to_string()),
			KeyNaming::Renamed { mapping, .. } => mapping
				.get(column)
				.cloned()
				.ok_or_else(|| Error::MissingMapping(column.to_string())),
		}
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn verbatim() {
		let keys = KeyNaming::Verbatim;

		assert_eq!(keys.key("zip", false).ok(), Some("zip".to_string()));
		assert_eq!(keys.key("address", true).ok(), Some("address".to_string()));
	}

	#[test]
	fn renamed_all() {
		let keys = KeyNaming::renamed([("address", "homeAddress")]);

		assert_eq!(
			keys.key("address", true).ok(),
			Some("homeAddress".to_string())
		);
		assert!(matches!(
			keys.key("zip", false),
			Err(Error::MissingMapping(column)) if column == "zip"
		));
	}

	#[test]
	fn renamed_references_only() {
		let keys =
			KeyNaming::renamed([("address", "homeAddress")]).with_scope(RenameScope::References);

		assert_eq!(keys.key("zip", false).ok(), Some("zip".to_string()));
		assert_eq!(
			keys.key("address", true).ok(),
			Some("homeAddress".to_string())
		);
		assert!(matches!(
			keys.key("phones", true),
			Err(Error::MissingMapping(column)) if column == "phones"
		));
	}

	#[test]
	fn deserialize_policies() {
		let keys: KeyNaming =
			serde_json::from_str(r#"{"policy": "verbatim"}"#).expect("should deserialize");
		assert_eq!(keys, KeyNaming::Verbatim);

		let keys: KeyNaming = serde_json::from_str(
			r#"{"policy": "renamed", "mapping": {"a": "b"}, "scope": "references"}"#,
		)
		.expect("should deserialize");
		assert_eq!(
			keys,
			KeyNaming::renamed([("a", "b")]).with_scope(RenameScope::References)
		);
	}
}
