use std::{
	collections::BTreeMap,
	io::{self, Write},
};

use anyhow::Context;
use figment::{
	providers::{Env, Format, Toml},
	Figment,
};
use serde::Deserialize;
use sheetgraph::{read, source, tracing};

#[derive(Debug, Deserialize)]
struct Config {
	// tracing: tracing::Config, - read individually.
	source: source::Config,
	#[serde(default)]
	read: read::Config,
	output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputConfig {
	sheet: String,
	#[serde(default = "default_pretty")]
	pretty: bool,
	#[serde(default)]
	errors: ErrorPolicy,
}

fn default_pretty() -> bool {
	true
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ErrorPolicy {
	/// Stop at the first row that fails to resolve.
	#[default]
	Abort,
	/// Skip failing rows, logging each one.
	Collect,
}

fn main() {
	// Prepare the configuration hierarchy.
	let figment = Figment::new()
		.merge(Toml::file("sheetgraph.toml"))
		.merge(Env::prefixed("SG_").split("_"));

	// Tracing is bootstrapped from its own section first, so that anything
	// reading the rest of the configuration can already trace.
	let tracing_config = figment
		.extract_inner::<tracing::Config>("tracing")
		.expect("Failed to initialize tracing config");
	tracing::init(tracing_config);

	let config = figment.extract::<Config>().expect("Failed to extract config");

	if let Err(error) = run(config) {
		::tracing::error!("{error:#}");
		std::process::exit(1);
	}
}

fn run(config: Config) -> anyhow::Result<()> {
	let workbook = source::load(&config.source)?;
	let read = read::Read::new(config.read);
	let sheet = config.output.sheet.as_str();

	let values = match config.output.errors {
		ErrorPolicy::Abort => read
			.sheet(&workbook, sheet)
			.with_context(|| format!("failed to materialize sheet \"{sheet}\""))?,
		ErrorPolicy::Collect => {
			let materialized = read
				.sheet_lenient(&workbook, sheet)
				.with_context(|| format!("failed to materialize sheet \"{sheet}\""))?;
			if !materialized.diagnostics.is_empty() {
				::tracing::warn!(
					sheet,
					skipped = materialized.diagnostics.len(),
					"some rows could not be resolved"
				);
			}
			materialized.values
		}
	};

	// Keyed by sheet name, matching the document shape of the json source.
	let output = BTreeMap::from([(sheet, values)]);

	let mut stdout = io::stdout().lock();
	if config.output.pretty {
		serde_json::to_writer_pretty(&mut stdout, &output)?;
	} else {
		serde_json::to_writer(&mut stdout, &output)?;
	}
	writeln!(stdout)?;

	Ok(())
}
