mod de;
mod error;
mod expression;
mod keys;
mod lookup;
mod read;
mod value;

pub use {
	de::Error as DeserializeError,
	error::{Error, MissingReference, Result, SpecError},
	expression::{Expression, Target},
	keys::{KeyNaming, RenameScope},
	lookup::find_row,
	read::{Config, Diagnostic, Materialized, Read},
	value::Value,
};
