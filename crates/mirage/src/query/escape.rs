///
/// String-literal escaping
///
/// Embedded quote characters are stripped, not backslash-escaped. This is
/// lossy for text that legitimately contains quotes, but it is the encoding
/// the wire format contract fixes; see the known-divergence test.
///

#[must_use]
pub fn escape_string(text: &str) -> String {
    text.chars().filter(|ch| *ch != '\'' && *ch != '"').collect()
}
