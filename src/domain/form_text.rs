/// A required free-text field of a submitted form.
///
/// Surrounding whitespace is trimmed and HTML metacharacters are entity-escaped,
/// so the value can be embedded in an HTML email body as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormText(String);

impl FormText {
    pub fn parse(value: String) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Form field cannot be empty".into());
        }
        Ok(Self(htmlescape::encode_minimal(trimmed)))
    }
}

impl AsRef<str> for FormText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FormText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
