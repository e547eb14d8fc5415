use crate::domain::submission_error::{required_email, required_text};
use crate::domain::{EmailAddress, FormText, SubmissionError};
use crate::routes::BookInterestForm;
use serde_json::Value;

#[derive(Debug)]
pub struct BookInterestSubmission {
    pub name: FormText,
    pub email: EmailAddress,
    pub notifications: bool,
}

impl BookInterestSubmission {
    pub fn notifications_flag(&self) -> &'static str {
        if self.notifications { "Yes" } else { "No" }
    }
}

/// Loose truthiness for the optional `notifications` flag, which browsers may
/// send as a boolean, a number or a string.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl TryFrom<BookInterestForm> for BookInterestSubmission {
    type Error = SubmissionError;

    fn try_from(form: BookInterestForm) -> Result<Self, Self::Error> {
        if form.email.is_none() {
            return Err(SubmissionError::MissingFields);
        }
        let name = required_text(form.name)?;
        let email = required_email(form.email)?;
        let notifications = coerce_flag(&form.notifications);
        Ok(Self {
            name,
            email,
            notifications,
        })
    }
}
