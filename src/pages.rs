//! Controls, the per-request build context, rendering and page handling

pub use ewf_pages::*;
