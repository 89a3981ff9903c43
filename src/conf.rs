//! Layered framework settings

pub use ewf_conf::*;
