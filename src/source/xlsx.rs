use std::{iter, path::Path};

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::Timelike;

use crate::table::{Row, Sheet, Workbook};

pub fn load(path: &Path) -> Result<Workbook> {
	tracing::info!(?path, "reading spreadsheet");

	let mut spreadsheet =
		open_workbook_auto(path).with_context(|| format!("failed to open {path:?}"))?;

	spreadsheet
		.sheet_names()
		.into_iter()
		.map(|name| {
			let range = spreadsheet
				.worksheet_range(&name)
				.with_context(|| format!("failed to read sheet \"{name}\" of {path:?}"))?;

			// Ranges cover only the used area; pad back out to A1 so the
			// header stays at row 0 and cells stay aligned with it.
			let (row_offset, column_offset) = range.start().unwrap_or_default();
			let padding = iter::repeat_with(Row::default).take(row_offset as usize);
			let rows = range.rows().map(|cells| {
				Row::from_cells(
					iter::repeat(String::new())
						.take(column_offset as usize)
						.chain(cells.iter().map(cell_text)),
				)
			});

			Ok(Sheet::new(name, padding.chain(rows).collect()))
		})
		.collect()
}

/// Display text of a cell. Date and time cells become ISO 8601 text. Other
/// number formats (`0.00`, currency, percentages) are not applied, so numbers
/// use their plain display form.
fn cell_text(cell: &Data) -> String {
	match cell {
		Data::Empty => String::new(),
		Data::DateTime(value) => date_time_text(value),
		Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
		other => other.to_string(),
	}
}

fn date_time_text(value: &ExcelDateTime) -> String {
	if value.is_duration() {
		if let Some(duration) = value.as_duration() {
			let seconds = duration.num_seconds();
			let sign = if seconds < 0 { "-" } else { "" };
			let seconds = seconds.abs();
			return format!(
				"{sign}{}:{:02}:{:02}",
				seconds / 3600,
				seconds % 3600 / 60,
				seconds % 60
			);
		}
	} else if let Some(datetime) = value.as_datetime() {
		let format = match datetime.num_seconds_from_midnight() {
			0 => "%Y-%m-%d",
			_ => "%Y-%m-%dT%H:%M:%S",
		};
		return datetime.format(format).to_string();
	}

	// Serials outside the representable calendar stay numeric.
	value.as_f64().to_string()
}
