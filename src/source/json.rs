use std::{
	collections::HashMap,
	fs::File,
	io::{self, BufReader},
	path::Path,
};

use anyhow::{bail, Context, Result};

use crate::table::{Row, Sheet, Workbook};

type Document = HashMap<String, Vec<Vec<serde_json::Value>>>;

pub fn load(path: &Path) -> Result<Workbook> {
	tracing::info!(?path, "reading json workbook");

	let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
	read_workbook(BufReader::new(file)).with_context(|| format!("failed to read {path:?}"))
}

fn read_workbook(reader: impl io::Read) -> Result<Workbook> {
	let document: Document = serde_json::from_reader(reader)?;

	document
		.into_iter()
		.map(|(name, rows)| {
			let rows = rows
				.into_iter()
				.map(|cells| {
					cells
						.into_iter()
						.map(cell_text)
						.collect::<Result<Vec<_>>>()
						.map(Row::new)
				})
				.collect::<Result<Vec<_>>>()
				.with_context(|| format!("invalid sheet \"{name}\""))?;

			Ok(Sheet::new(name, rows))
		})
		.collect()
}

// Sources are responsible for normalizing cells to their display text.
fn cell_text(value: serde_json::Value) -> Result<String> {
	use serde_json::Value as V;
	let text = match value {
		V::Null => String::new(),
		V::Bool(value) => value.to_string(),
		V::Number(value) => value.to_string(),
		V::String(value) => value,
		other => bail!("cells must be scalars, got {other}"),
	};
	Ok(text)
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn reads_sheets() {
		let input = r#"{
			"customer": [
				["name", "age", "vip", "address"],
				["Ann", 30, true, "reference:address@zip#12345"],
				["Bob", 41.5, null]
			],
			"address": [["zip", "country"], [12345, "US"]]
		}"#;

		let workbook = read_workbook(input.as_bytes()).expect("read should not fail");

		assert_eq!(
			workbook.sheet("customer"),
			Some(&Sheet::from_cells(
				"customer",
				[
					vec!["name", "age", "vip", "address"],
					vec!["Ann", "30", "true", "reference:address@zip#12345"],
					vec!["Bob", "41.5", ""],
				]
			))
		);
		assert_eq!(
			workbook.sheet("address"),
			Some(&Sheet::from_cells(
				"address",
				[vec!["zip", "country"], vec!["12345", "US"]]
			))
		);
	}

	#[test]
	fn rejects_nested_cells() {
		let input = r#"{"s": [["a"], [["b"]]]}"#;

		let error = read_workbook(input.as_bytes()).expect_err("read should fail");
		assert!(format!("{error:#}").contains("\"s\""), "{error:#}");
	}

	#[test]
	fn rejects_non_tabular_documents() {
		assert!(read_workbook("[]".as_bytes()).is_err());
		assert!(read_workbook(r#"{"s": ["a"]}"#.as_bytes()).is_err());
	}
}
