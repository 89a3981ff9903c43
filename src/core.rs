//! Escaping, string concatenation and resource primitives
//!
//! # Examples
//!
//! ```rust
//! use ewf::core::{concatenate_with_space, escape_html};
//!
//! assert_eq!(concatenate_with_space("", "return false;"), "return false;");
//! assert_eq!(escape_html("<b>"), "&lt;b&gt;");
//! ```

pub use ewf_core::*;
