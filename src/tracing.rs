use std::{collections::HashMap, fmt, io, str::FromStr};

use serde::{de, Deserialize};
use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{
	filter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};

#[derive(Debug, Deserialize)]
pub struct Config {
	stderr: StderrConfig,
}

#[derive(Debug, Deserialize)]
struct StderrConfig {
	enabled: bool,
	#[serde(default)]
	json: bool,
	filters: TracingFilters,
}

#[derive(Debug, Deserialize)]
struct TracingFilters {
	default: ConfigLevelFilter,

	#[serde(flatten)]
	targets: HashMap<String, ConfigLevelFilter>,
}

#[repr(transparent)]
struct ConfigLevelFilter(LevelFilter);

impl From<ConfigLevelFilter> for LevelFilter {
	fn from(filter: ConfigLevelFilter) -> Self {
		filter.0
	}
}

impl fmt::Debug for ConfigLevelFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl<'de> Deserialize<'de> for ConfigLevelFilter {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let string = String::deserialize(deserializer)?;
		let level_filter = LevelFilter::from_str(&string).map_err(de::Error::custom)?;
		Ok(Self(level_filter))
	}
}

pub fn init(config: Config) {
	tracing_subscriber::registry()
		.with(stderr(config.stderr))
		.init();
}

// Stdout carries materialized output, so diagnostics go to stderr.
fn stderr<S>(config: StderrConfig) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	if !config.enabled {
		return None;
	}

	let filter = filter::Targets::new()
		.with_default(config.filters.default)
		.with_targets(config.filters.targets);

	let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
	let layer = if config.json {
		layer.json().with_filter(filter).boxed()
	} else {
		layer.with_filter(filter).boxed()
	};

	Some(layer)
}

#[cfg(test)]
mod test {
	use figment::{
		providers::{Format, Toml},
		Figment,
	};
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn deserialize_config() {
		let config = Figment::new()
			.merge(Toml::string(
				r#"
				[stderr]
				enabled = true
				[stderr.filters]
				default = "info"
				sheetgraph = "debug"
				"#,
			))
			.extract::<Config>()
			.expect("config should deserialize");

		assert!(config.stderr.enabled);
		assert!(!config.stderr.json);
		assert_eq!(LevelFilter::from(config.stderr.filters.default), LevelFilter::INFO);
		assert_eq!(
			config
				.stderr
				.filters
				.targets
				.get("sheetgraph")
				.map(|filter| filter.0),
			Some(LevelFilter::DEBUG)
		);
	}

	#[test]
	fn reject_unknown_level() {
		let result = Figment::new()
			.merge(Toml::string(
				r#"
				[stderr]
				enabled = true
				[stderr.filters]
				default = "loud"
				"#,
			))
			.extract::<Config>();

		assert!(result.is_err());
	}
}
