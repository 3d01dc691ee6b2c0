#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A sheet was requested, or referenced, that the workbook does not contain.
	/// `field` is empty when the sheet was requested directly.
	#[error("unknown sheet \"{sheet}\"{}", on_field(.field))]
	UnknownSheet { sheet: String, field: String },

	/// A reference targets a column that is not present in the target sheet's header.
	#[error("unknown column \"{column}\" in sheet \"{sheet}\"")]
	UnknownColumn { sheet: String, column: String },

	/// No row in the target sheet matched the reference.
	#[error(
		"couldn't find the reference on {}: sheet = {}, column = {}, value = {}",
		.0.field, .0.sheet, .0.column, .0.value
	)]
	ReferenceNotFound(MissingReference),

	/// Cell text carried a reference tag, but the target specifier could not be parsed.
	#[error("malformed reference spec on {}: {}", .0.field, .0.reason)]
	MalformedReferenceSpec(SpecError),

	/// The renamed key policy has no output key for a column.
	#[error("no key mapping for column \"{0}\"")]
	MissingMapping(String),

	/// Reference expansion nested deeper than the configured limit.
	#[error("reference depth limit of {limit} exceeded on {field}")]
	RecursionLimitExceeded { limit: u8, field: String },

	/// A resolved row could not be converted into the requested type.
	#[error("could not deserialize resolved row {row}: {source}")]
	Deserialize {
		row: usize,
		#[source]
		source: super::de::Error,
	},
}

#[derive(Debug)]
pub struct MissingReference {
	pub field: String,
	pub sheet: String,
	pub column: String,
	pub value: String,
}

#[derive(Debug)]
pub struct SpecError {
	pub field: String,
	pub reason: String,
}

fn on_field(field: &str) -> String {
	match field {
		"" => String::new(),
		field => format!(" on {field}"),
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
