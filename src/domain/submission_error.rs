/// The first validation rule a submitted form failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

/// Reads a required text field. Absent, null and blank values all count as missing.
pub(crate) fn required_text(
    value: Option<String>,
) -> Result<super::FormText, SubmissionError> {
    let value = value.ok_or(SubmissionError::MissingFields)?;
    super::FormText::parse(value).map_err(|_| SubmissionError::MissingFields)
}

pub(crate) fn required_email(
    value: Option<String>,
) -> Result<super::EmailAddress, SubmissionError> {
    let value = value.ok_or(SubmissionError::MissingFields)?;
    super::EmailAddress::try_from(value).map_err(|_| SubmissionError::InvalidEmail)
}
