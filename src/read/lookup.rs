use crate::table::{Row, Sheet};

use super::error::{Error, Result};

/// Find the first data row in `sheet` whose `column` cell equals `value`.
///
/// Header names, cell text and the target value are all compared trimmed.
/// Rows too short to have the column compare as blank. When more than one row
/// matches, the first in sheet order wins.
///
/// Returns `Ok(None)` when no row matches; an unknown column is an error.
pub fn find_row<'s>(sheet: &'s Sheet, column: &str, value: &str) -> Result<Option<&'s Row>> {
	let column = column.trim();
	let index = sheet
		.header()
		.iter()
		.position(|name| name.trim() == column)
		.ok_or_else(|| Error::UnknownColumn {
			sheet: sheet.name().to_string(),
			column: column.to_string(),
		})?;

	let value = value.trim();
	let row = sheet
		.data_rows()
		.map(|(_, row)| row)
		.find(|row| row.cell(index).unwrap_or_default().trim() == value);

	Ok(row)
}
