//! # ewf core
//!
//! Small building blocks shared by the ewf crates:
//!
//! - [`security`]: escaping for HTML text, HTML attributes, and JavaScript string literals
//! - [`text`]: delimiter-aware string joining used when emitting client script
//! - [`resource`]: the [`ResourceInfo`] contract for anything that can produce a URL

pub mod resource;
pub mod security;
pub mod text;

pub use resource::{ExternalResource, ResourceInfo};
pub use security::{escape_html, escape_html_attr, escape_javascript};
pub use text::{concatenate_with_delimiter, concatenate_with_space, prepend_delimiter, surround};
