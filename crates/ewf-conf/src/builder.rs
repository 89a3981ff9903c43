//! Merging of configuration sources into [`FrameworkSettings`]

use crate::settings::FrameworkSettings;
use crate::sources::{ConfigSource, SourceError};
use serde_json::{Map, Value};

/// Errors produced while assembling settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {description}: {source}")]
	Source {
		description: String,
		#[source]
		source: SourceError,
	},

	#[error("Failed to deserialize settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid value for `{key}`: {reason}")]
	InvalidValue { key: String, reason: String },
}

/// Builder that merges [`ConfigSource`]s by priority
///
/// Sources with a higher priority override keys from sources with a lower
/// priority. Sources with equal priority are applied in insertion order.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder without sources
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a configuration source
	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge the sources and deserialize the result
	///
	/// # Examples
	///
	/// ```
	/// use ewf_conf::{DefaultSource, SettingsBuilder};
	/// use serde_json::json;
	///
	/// let settings = SettingsBuilder::new()
	///     .add_source(DefaultSource::new().with_value("submit_button_value", json!("go")))
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(settings.submit_button_value, "go");
	/// ```
	pub fn build(mut self) -> Result<FrameworkSettings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let description = source.description();
			let values = source
				.load()
				.map_err(|source| SettingsError::Source {
					description: description.clone(),
					source,
				})?;
			tracing::debug!(source = %description, keys = values.len(), "loaded configuration source");
			merged.extend(values);
		}

		let settings: FrameworkSettings = serde_json::from_value(Value::Object(merged))?;
		settings.validate()?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::DefaultSource;
	use indexmap::IndexMap;
	use rstest::rstest;
	use serde_json::json;

	struct StaticSource {
		values: IndexMap<String, Value>,
		priority: u8,
	}

	impl ConfigSource for StaticSource {
		fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
			Ok(self.values.clone())
		}

		fn priority(&self) -> u8 {
			self.priority
		}

		fn description(&self) -> String {
			format!("static source ({})", self.priority)
		}
	}

	fn static_source(priority: u8, key: &str, value: Value) -> StaticSource {
		let mut values = IndexMap::new();
		values.insert(key.to_string(), value);
		StaticSource { values, priority }
	}

	#[rstest]
	fn test_empty_builder_yields_defaults() {
		// Act
		let settings = SettingsBuilder::new().build().unwrap();

		// Assert
		assert_eq!(settings, FrameworkSettings::default());
	}

	#[rstest]
	fn test_higher_priority_wins_regardless_of_order() {
		// Arrange
		let builder = SettingsBuilder::new()
			.add_source(static_source(100, "element_id_prefix", json!("high")))
			.add_source(DefaultSource::new())
			.add_source(static_source(50, "element_id_prefix", json!("middle")));

		// Act
		let settings = builder.build().unwrap();

		// Assert
		assert_eq!(settings.element_id_prefix, "high");
	}

	#[rstest]
	fn test_invalid_merged_value_is_rejected() {
		// Arrange
		let builder = SettingsBuilder::new()
			.add_source(static_source(100, "auto_complete_min_characters", json!(0)));

		// Act
		let result = builder.build();

		// Assert
		assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
	}

	#[rstest]
	fn test_wrong_value_type_is_a_deserialize_error() {
		let result = SettingsBuilder::new()
			.add_source(static_source(100, "auto_complete_delay_ms", json!("soon")))
			.build();

		assert!(matches!(result, Err(SettingsError::Deserialize(_))));
	}
}
