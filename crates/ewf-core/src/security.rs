//! Escaping utilities for server-rendered markup and inline script

/// Escape HTML special characters for use in text content
///
/// # Examples
///
/// ```
/// use ewf_core::security::escape_html;
///
/// let escaped = escape_html("<b>Tom & Jerry</b>");
/// assert_eq!(escaped, "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			'\'' => output.push_str("&#x27;"),
			_ => output.push(c),
		}
	}
	output
}

/// Escape a value for use inside a double-quoted HTML attribute
///
/// Line breaks are encoded as character references so that attribute values
/// survive a round trip through the browser unchanged.
///
/// # Examples
///
/// ```
/// use ewf_core::security::escape_html_attr;
///
/// let escaped = escape_html_attr("say \"hi\"\nnow");
/// assert_eq!(escaped, "say &quot;hi&quot;&#10;now");
/// ```
pub fn escape_html_attr(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'\n' => output.push_str("&#10;"),
			'\r' => output.push_str("&#13;"),
			_ => output.push_str(&escape_html(c.encode_utf8(&mut [0; 4]))),
		}
	}
	output
}

/// Escape a value for use inside a single- or double-quoted JavaScript string literal
///
/// # Examples
///
/// ```
/// use ewf_core::security::escape_javascript;
///
/// assert_eq!(escape_javascript("it's"), "it\\'s");
/// assert_eq!(escape_javascript("</script>"), "\\x3C\\/script\\x3E");
/// ```
pub fn escape_javascript(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'\\' => output.push_str("\\\\"),
			'\'' => output.push_str("\\'"),
			'"' => output.push_str("\\\""),
			'\n' => output.push_str("\\n"),
			'\r' => output.push_str("\\r"),
			'\t' => output.push_str("\\t"),
			'<' => output.push_str("\\x3C"),
			'>' => output.push_str("\\x3E"),
			'/' => output.push_str("\\/"),
			_ => output.push(c),
		}
	}
	output
}
