use crate::domain::submission_error::{required_email, required_text};
use crate::domain::{EmailAddress, FormText, SubmissionError};
use crate::routes::ContactForm;

#[derive(Debug)]
pub struct ContactSubmission {
    pub name: FormText,
    pub email: EmailAddress,
    pub subject: FormText,
    pub message: FormText,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = SubmissionError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        if form.email.is_none() {
            return Err(SubmissionError::MissingFields);
        }
        let name = required_text(form.name)?;
        let subject = required_text(form.subject)?;
        let message = required_text(form.message)?;
        let email = required_email(form.email)?;
        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }
}
