use std::collections::HashMap;

/// An in-memory workbook: a set of named sheets.
///
/// Workbooks are built once by a tabular source and are read-only from then
/// on. Sheet names are exact; no trimming or case folding is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
	sheets: HashMap<String, Sheet>,
}

impl Workbook {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a sheet to the workbook, replacing any existing sheet of the same name.
	pub fn with_sheet(mut self, sheet: Sheet) -> Self {
		self.insert(sheet);
		self
	}

	pub fn insert(&mut self, sheet: Sheet) -> Option<Sheet> {
		self.sheets.insert(sheet.name.clone(), sheet)
	}

	pub fn sheet(&self, name: &str) -> Option<&Sheet> {
		self.sheets.get(name)
	}

	pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
		self.sheets.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.sheets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sheets.is_empty()
	}
}

impl FromIterator<Sheet> for Workbook {
	fn from_iter<I: IntoIterator<Item = Sheet>>(iter: I) -> Self {
		let mut workbook = Workbook::new();
		for sheet in iter {
			workbook.insert(sheet);
		}
		workbook
	}
}

/// A named table. Row 0, when present, is the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
	name: String,
	rows: Vec<Row>,
}

impl Sheet {
	pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
		Self {
			name: name.into(),
			rows,
		}
	}

	/// Build a sheet from anything shaped like a grid of cell text.
	pub fn from_cells<R, C>(name: impl Into<String>, rows: R) -> Self
	where
		R: IntoIterator,
		R::Item: IntoIterator<Item = C>,
		C: Into<String>,
	{
		Self::new(name, rows.into_iter().map(Row::from_cells).collect())
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The header row. Sheets with no rows at all have an empty header.
	pub fn header(&self) -> &[String] {
		self.rows.first().map(Row::cells).unwrap_or_default()
	}

	/// Data rows, excluding the header, paired with their index among data rows.
	pub fn data_rows(&self) -> impl ExactSizeIterator<Item = (usize, &Row)> {
		self.rows.iter().skip(1).enumerate()
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}
}

/// A single row of normalized cell text, positionally aligned to its sheet's header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
	pub fn new(cells: Vec<String>) -> Self {
		Self(cells)
	}

	pub fn from_cells<C: Into<String>>(cells: impl IntoIterator<Item = C>) -> Self {
		Self(cells.into_iter().map(Into::into).collect())
	}

	/// Cell text at the given column index, if the row extends that far.
	pub fn cell(&self, index: usize) -> Option<&str> {
		self.0.get(index).map(String::as_str)
	}

	pub fn cells(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<String>> for Row {
	fn from(cells: Vec<String>) -> Self {
		Self(cells)
	}
}
