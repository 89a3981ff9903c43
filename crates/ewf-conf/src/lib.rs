//! Framework settings for ewf
//!
//! Settings are assembled from layered [`ConfigSource`]s, merged in priority
//! order (environment variables > TOML file > defaults), and deserialized into
//! [`FrameworkSettings`].
//!
//! ## Example
//!
//! ```no_run
//! use ewf_conf::{DefaultSource, EnvSource, SettingsBuilder, TomlFileSource};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(DefaultSource::new())
//!     .add_source(TomlFileSource::new("ewf.toml"))
//!     .add_source(EnvSource::new().with_prefix("EWF_"))
//!     .build()
//!     .expect("invalid settings");
//!
//! assert_eq!(settings.button_element_name, "ewfButton");
//! ```

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::{SettingsBuilder, SettingsError};
pub use settings::{FrameworkSettings, ImplicitSubmissionMode};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
