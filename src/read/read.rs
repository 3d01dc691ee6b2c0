use serde::{de::DeserializeOwned, Deserialize};

use crate::table::{Row, Workbook};

use super::{
	error::{Error, MissingReference, Result, SpecError},
	expression::{Expression, Target},
	keys::KeyNaming,
	lookup,
	value::Value,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Maximum number of references that may be followed from a root row
	/// before resolution fails.
	pub max_depth: u8,
	pub keys: KeyNaming,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			max_depth: 64,
			keys: KeyNaming::Verbatim,
		}
	}
}

pub struct Read {
	keys: KeyNaming,
	max_depth: u8,
}

/// Outcome of a lenient sheet materialization.
#[derive(Debug, Default)]
pub struct Materialized {
	/// Rows that resolved successfully, in sheet order.
	pub values: Vec<Value>,
	/// Rows that failed, in sheet order.
	pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct Diagnostic {
	/// Index of the failing row among the sheet's data rows.
	pub row: usize,
	pub error: Error,
}

impl Read {
	pub fn new(config: Config) -> Self {
		Self {
			keys: config.keys,
			max_depth: config.max_depth,
		}
	}

	pub fn max_depth(&self) -> u8 {
		self.max_depth
	}

	pub fn keys(&self) -> &KeyNaming {
		&self.keys
	}

	/// Resolve a single row against `header`, following any references it
	/// contains into other sheets of `workbook`.
	pub fn resolve_row(&self, workbook: &Workbook, header: &[String], row: &Row) -> Result<Value> {
		read_row(
			header,
			row,
			ReaderContext {
				read: self,
				workbook,
				depth: self.max_depth,
				path: &[],
			},
		)
	}

	/// Resolve every data row of a sheet, in order. The first failing row
	/// aborts the whole sheet.
	pub fn sheet(&self, workbook: &Workbook, sheet_name: &str) -> Result<Vec<Value>> {
		let sheet = workbook
			.sheet(sheet_name)
			.ok_or_else(|| Error::UnknownSheet {
				sheet: sheet_name.to_string(),
				field: String::new(),
			})?;

		tracing::info!(sheet = sheet_name, rows = sheet.data_rows().len(), "materializing sheet");

		let values = sheet
			.data_rows()
			.map(|(index, row)| self.read_data_row(workbook, sheet_name, sheet.header(), index, row))
			.collect::<Result<Vec<_>>>()?;

		tracing::info!(sheet = sheet_name, "done materializing sheet");

		Ok(values)
	}

	/// Resolve every data row of a sheet, collecting failures rather than
	/// aborting on them. An unknown sheet is still an error.
	pub fn sheet_lenient(&self, workbook: &Workbook, sheet_name: &str) -> Result<Materialized> {
		let sheet = workbook
			.sheet(sheet_name)
			.ok_or_else(|| Error::UnknownSheet {
				sheet: sheet_name.to_string(),
				field: String::new(),
			})?;

		tracing::info!(sheet = sheet_name, rows = sheet.data_rows().len(), "materializing sheet");

		let mut output = Materialized::default();
		for (index, row) in sheet.data_rows() {
			match self.read_data_row(workbook, sheet_name, sheet.header(), index, row) {
				Ok(value) => output.values.push(value),
				Err(error) => {
					tracing::warn!(sheet = sheet_name, row = index, %error, "skipping row");
					output.diagnostics.push(Diagnostic { row: index, error });
				}
			}
		}

		tracing::info!(
			sheet = sheet_name,
			skipped = output.diagnostics.len(),
			"done materializing sheet"
		);

		Ok(output)
	}

	/// Materialize a sheet and deserialize each resolved row into `T`.
	pub fn parse<T: DeserializeOwned>(&self, workbook: &Workbook, sheet_name: &str) -> Result<Vec<T>> {
		self.sheet(workbook, sheet_name)?
			.into_iter()
			.enumerate()
			.map(|(row, value)| T::deserialize(value).map_err(|source| Error::Deserialize { row, source }))
			.collect()
	}

	fn read_data_row(
		&self,
		workbook: &Workbook,
		sheet_name: &str,
		header: &[String],
		index: usize,
		row: &Row,
	) -> Result<Value> {
		let index = index.to_string();
		read_row(
			header,
			row,
			ReaderContext {
				read: self,
				workbook,
				depth: self.max_depth,
				path: &[sheet_name, index.as_str()],
			},
		)
	}
}

fn read_row(header: &[String], row: &Row, context: ReaderContext) -> Result<Value> {
	let mut fields: Vec<(String, Value)> = Vec::with_capacity(header.len());

	for (index, column) in header.iter().enumerate() {
		let path = context.child_path(column);
		let context = ReaderContext {
			path: &path,
			..context
		};

		// Cells past the end of a short row are blank.
		let expression = row
			.cell(index)
			.map(Expression::classify)
			.unwrap_or(Expression::Scalar(""));
		let reference = !matches!(expression, Expression::Scalar(_));

		let key = context.read.keys.key(column, reference)?;
		let value = read_expression(expression, context)?;

		if fields.iter().any(|(name, _)| *name == key) {
			tracing::warn!(%key, field = %context.field(), "object key collision");
			continue;
		}

		fields.push((key, value));
	}

	Ok(Value::Object(fields))
}

fn read_expression(expression: Expression, context: ReaderContext) -> Result<Value> {
	match expression {
		Expression::Scalar(text) => Ok(Value::Scalar(text.to_string())),
		Expression::Reference(spec) => read_reference(spec, context),
		Expression::ListReference(specs) => {
			let values = specs
				.into_iter()
				.enumerate()
				.map(|(index, spec)| {
					let index = index.to_string();
					let path = context.child_path(&index);
					read_reference(
						spec,
						ReaderContext {
							path: &path,
							..context
						},
					)
				})
				.collect::<Result<Vec<_>>>()?;

			Ok(Value::Array(values))
		}
	}
}

fn read_reference(spec: &str, context: ReaderContext) -> Result<Value> {
	let target = Target::parse(spec)
		.map_err(|reason| Error::MalformedReferenceSpec(context.spec_error(reason)))?;

	// Depth is a remaining budget; each followed reference spends one.
	if context.depth == 0 {
		return Err(Error::RecursionLimitExceeded {
			limit: context.read.max_depth,
			field: context.field(),
		});
	}

	let sheet = context
		.workbook
		.sheet(target.sheet)
		.ok_or_else(|| Error::UnknownSheet {
			sheet: target.sheet.to_string(),
			field: context.field(),
		})?;

	let row = lookup::find_row(sheet, target.column, target.value)?
		.ok_or_else(|| Error::ReferenceNotFound(context.missing_reference(&target)))?;

	tracing::debug!(
		field = %context.field(),
		sheet = target.sheet,
		column = target.column,
		value = target.value,
		"following reference"
	);

	read_row(
		sheet.header(),
		row,
		ReaderContext {
			depth: context.depth - 1,
			..context
		},
	)
}

#[derive(Clone, Copy)]
struct ReaderContext<'a> {
	read: &'a Read,
	workbook: &'a Workbook,

	depth: u8,

	path: &'a [&'a str],
}

impl<'a> ReaderContext<'a> {
	fn child_path<'b>(&self, segment: &'b str) -> Vec<&'b str>
	where
		'a: 'b,
	{
		let mut path: Vec<&'b str> = self.path.to_vec();
		path.push(segment);
		path
	}

	fn field(&self) -> String {
		self.path.join(".")
	}

	fn spec_error(&self, reason: impl ToString) -> SpecError {
		SpecError {
			field: self.field(),
			reason: reason.to_string(),
		}
	}

	fn missing_reference(&self, target: &Target) -> MissingReference {
		MissingReference {
			field: self.field(),
			sheet: target.sheet.to_string(),
			column: target.column.to_string(),
			value: target.value.to_string(),
		}
	}
}
