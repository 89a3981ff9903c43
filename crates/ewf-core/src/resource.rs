//! Resources that controls can navigate to or fetch data from

use std::fmt;
use url::Url;

/// Something that can produce a URL
///
/// Auto-complete sources and navigation targets are expressed through this
/// trait so that controls never build URLs themselves.
pub trait ResourceInfo: fmt::Debug + Send + Sync {
	/// The URL of this resource
	fn url(&self) -> String;
}

/// A resource outside the application, identified by an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResource {
	url: Url,
}

impl ExternalResource {
	/// Parse an absolute URL
	///
	/// # Examples
	///
	/// ```
	/// use ewf_core::{ExternalResource, ResourceInfo};
	///
	/// let home = ExternalResource::new("https://example.com/").unwrap();
	/// assert_eq!(home.url(), "https://example.com/");
	///
	/// assert!(ExternalResource::new("/relative/path").is_err());
	/// ```
	pub fn new(url: &str) -> Result<Self, url::ParseError> {
		Ok(Self {
			url: Url::parse(url)?,
		})
	}
}

impl ResourceInfo for ExternalResource {
	fn url(&self) -> String {
		self.url.to_string()
	}
}

impl<R: ResourceInfo + ?Sized> ResourceInfo for std::sync::Arc<R> {
	fn url(&self) -> String {
		(**self).url()
	}
}
