use crate::EmailClient;
use crate::domain::{ContactSubmission, EmailAddress, SubmissionError};
use crate::email_client::Envelope;
use crate::routes::{ResponseEnvelope, error_chain_fmt};
use crate::startup::OperatorAddress;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;

#[derive(serde::Deserialize, Debug)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] SubmissionError),
    #[error("Failed to send your message. Please try again later.")]
    DispatchFailure(#[source] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::DispatchFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ResponseEnvelope::failure(self.to_string()))
    }
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(form, email_client, operator),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn contact(
    form: web::Json<ContactForm>,
    email_client: web::Data<EmailClient>,
    operator: web::Data<OperatorAddress>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = form.into_inner().try_into()?;
    tracing::Span::current()
        .record("submitter_email", tracing::field::display(&submission.email))
        .record("submitter_name", tracing::field::display(&submission.name));

    send_contact_email(&email_client, &operator.0, &submission)
        .await
        .context("Failed to send the contact notification")
        .map_err(ContactError::DispatchFailure)?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::success(
        "Your message has been sent successfully!",
    )))
}

#[tracing::instrument(
    name = "Send the contact notification to the operator",
    skip(email_client, operator, submission)
)]
async fn send_contact_email(
    email_client: &EmailClient,
    operator: &EmailAddress,
    submission: &ContactSubmission,
) -> Result<(), reqwest::Error> {
    let subject = format!("Contact Form: {}", submission.subject);
    let html = format!(
        "<html>\
        <head><title>New Contact Message</title></head>\
        <body>\
        <h2>New Contact Form Submission</h2>\
        <p><strong>Name:</strong> {name}</p>\
        <p><strong>Email:</strong> {email}</p>\
        <p><strong>Subject:</strong> {subject}</p>\
        <p><strong>Message:</strong></p>\
        <p>{message}</p>\
        </body>\
        </html>",
        name = submission.name,
        email = submission.email,
        subject = submission.subject,
        message = submission.message,
    );
    let text = format!(
        "New Contact Form Submission\n\nName: {}\nEmail: {}\nSubject: {}\n\n{}",
        submission.name, submission.email, submission.subject, submission.message,
    );

    let envelope = Envelope {
        to: operator,
        from: &submission.email,
        reply_to: &submission.email,
    };
    email_client
        .send_email(envelope, &subject, &html, &text)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send email: {:?}", e);
            e
        })
}
