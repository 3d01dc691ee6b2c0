use std::{
	ffi::OsStr,
	fs::File,
	io,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::table::{Row, Sheet, Workbook};

pub fn load(paths: &[PathBuf], delimiter: char) -> Result<Workbook> {
	let delimiter = u8::try_from(delimiter)
		.ok()
		.filter(u8::is_ascii)
		.with_context(|| format!("csv delimiter {delimiter:?} is not a single ascii byte"))?;

	paths
		.iter()
		.map(|path| read_file(path, delimiter))
		.collect()
}

fn read_file(path: &Path, delimiter: u8) -> Result<Sheet> {
	let name = path
		.file_stem()
		.and_then(OsStr::to_str)
		.with_context(|| format!("cannot derive a sheet name from {path:?}"))?;

	tracing::info!(?path, sheet = name, "reading csv file");

	let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
	read_sheet(name, file, delimiter).with_context(|| format!("failed to read {path:?}"))
}

fn read_sheet(name: &str, reader: impl io::Read, delimiter: u8) -> Result<Sheet> {
	// Rows may be ragged; short rows are padded with blanks during resolution.
	let mut reader = ::csv::ReaderBuilder::new()
		.delimiter(delimiter)
		.has_headers(false)
		.flexible(true)
		.from_reader(reader);

	let rows = reader
		.records()
		.map(|record| Ok(Row::from_cells(record?.iter())))
		.collect::<Result<Vec<_>, ::csv::Error>>()?;

	Ok(Sheet::new(name, rows))
}

#[cfg(test)]
mod test {
	use std::fs;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn reads_quoted_and_ragged_rows() {
		let input = "name,age,address\n\"Smith, Ann\",30,reference:address@zip#12345\nBob\n";

		let sheet = read_sheet("customer", input.as_bytes(), b',').expect("read should not fail");
		assert_eq!(
			sheet,
			Sheet::from_cells(
				"customer",
				[
					vec!["name", "age", "address"],
					vec!["Smith, Ann", "30", "reference:address@zip#12345"],
					vec!["Bob"],
				]
			)
		);
	}

	#[test]
	fn reads_other_delimiters() {
		let input = "zip;country\n12345;US\n";

		let sheet = read_sheet("address", input.as_bytes(), b';').expect("read should not fail");
		assert_eq!(sheet.header(), &["zip".to_string(), "country".to_string()]);
	}

	#[test]
	fn loads_one_sheet_per_file() {
		let directory = tempfile::tempdir().expect("tempdir should be created");
		let customer = directory.path().join("customer.csv");
		let address = directory.path().join("address.csv");
		fs::write(&customer, "name,address\nAnn,reference:address@zip#1\n")
			.expect("write should not fail");
		fs::write(&address, "zip,country\n1,US\n").expect("write should not fail");

		let workbook = load(&[customer, address], ',').expect("load should not fail");

		let mut names = workbook.sheet_names().collect::<Vec<_>>();
		names.sort();
		assert_eq!(names, vec!["address", "customer"]);
	}

	#[test]
	fn missing_file_fails() {
		let directory = tempfile::tempdir().expect("tempdir should be created");

		let result = load(&[directory.path().join("missing.csv")], ',');
		assert!(result.is_err());
	}

	#[test]
	fn non_ascii_delimiter_fails() {
		assert!(load(&[], '→').is_err());
	}
}
