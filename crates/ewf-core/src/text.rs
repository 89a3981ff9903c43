//! String joining helpers for emitted client script
//!
//! Script fragments produced by controls are frequently empty (a control with
//! no change action has no change handler). These helpers skip empty parts so
//! that callers never produce doubled delimiters.

/// Join the non-empty parts with `delimiter`
///
/// # Examples
///
/// ```
/// use ewf_core::text::concatenate_with_delimiter;
///
/// let joined = concatenate_with_delimiter(" ", ["a();", "", "b();"]);
/// assert_eq!(joined, "a(); b();");
/// ```
pub fn concatenate_with_delimiter<'a, I>(delimiter: &str, parts: I) -> String
where
	I: IntoIterator<Item = &'a str>,
{
	parts
		.into_iter()
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(delimiter)
}

/// Join two strings with a single space, skipping either side when empty
///
/// # Examples
///
/// ```
/// use ewf_core::text::concatenate_with_space;
///
/// assert_eq!(concatenate_with_space("a();", "return false;"), "a(); return false;");
/// assert_eq!(concatenate_with_space("", "return false;"), "return false;");
/// ```
pub fn concatenate_with_space(first: &str, second: &str) -> String {
	concatenate_with_delimiter(" ", [first, second])
}

/// Prefix `value` with `delimiter` unless `value` is empty
///
/// # Examples
///
/// ```
/// use ewf_core::text::prepend_delimiter;
///
/// assert_eq!(prepend_delimiter("ready", " && "), " && ready");
/// assert_eq!(prepend_delimiter("", " && "), "");
/// ```
pub fn prepend_delimiter(value: &str, delimiter: &str) -> String {
	if value.is_empty() {
		String::new()
	} else {
		format!("{delimiter}{value}")
	}
}

/// Wrap `value` in `prefix` and `suffix` unless `value` is empty
///
/// # Examples
///
/// ```
/// use ewf_core::text::surround;
///
/// assert_eq!(surround("x();", "f( ", " );"), "f( x(); );");
/// assert_eq!(surround("", "f( ", " );"), "");
/// ```
pub fn surround(value: &str, prefix: &str, suffix: &str) -> String {
	if value.is_empty() {
		String::new()
	} else {
		format!("{prefix}{value}{suffix}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_concatenate_with_delimiter_all_empty() {
		// Act
		let joined = concatenate_with_delimiter(", ", ["", ""]);

		// Assert
		assert!(joined.is_empty());
	}

	#[rstest]
	#[case("a", "b", "a b")]
	#[case("a", "", "a")]
	#[case("", "", "")]
	fn test_concatenate_with_space(#[case] first: &str, #[case] second: &str, #[case] expected: &str) {
		assert_eq!(concatenate_with_space(first, second), expected);
	}
}
