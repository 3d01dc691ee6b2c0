mod csv;
mod json;
#[cfg(feature = "xlsx")]
mod xlsx;

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use crate::table::Workbook;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Config {
	/// One sheet per file, named after the file stem.
	Csv {
		paths: Vec<PathBuf>,
		#[serde(default = "default_delimiter")]
		delimiter: char,
	},

	/// A single document mapping sheet names to arrays of rows.
	Json { path: PathBuf },

	#[cfg(feature = "xlsx")]
	Xlsx { path: PathBuf },
}

fn default_delimiter() -> char {
	','
}

/// Read a workbook from the configured source.
pub fn load(config: &Config) -> Result<Workbook> {
	match config {
		Config::Csv { paths, delimiter } => csv::load(paths, *delimiter),
		Config::Json { path } => json::load(path),
		#[cfg(feature = "xlsx")]
		Config::Xlsx { path } => xlsx::load(path),
	}
}
