//! Post-backs, form actions, form values and validation
//!
//! Everything here is independent of markup: a page built with [`crate::pages`]
//! registers its post-backs and validations through these types, and the
//! post-back pipeline runs them for a submission.

pub use ewf_forms::*;
