use crate::EmailClient;
use crate::domain::{BookInterestSubmission, EmailAddress, SubmissionError};
use crate::email_client::Envelope;
use crate::interest_log::{InterestLog, InterestLogRecord};
use crate::routes::{ResponseEnvelope, error_chain_fmt};
use crate::startup::OperatorAddress;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;
use chrono::Local;

#[derive(serde::Deserialize, Debug)]
pub struct BookInterestForm {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub notifications: serde_json::Value,
}

#[derive(thiserror::Error)]
pub enum BookInterestError {
    #[error(transparent)]
    ValidationError(#[from] SubmissionError),
    #[error("Failed to register your interest. Please try again later.")]
    DispatchFailure(#[source] anyhow::Error),
    #[error("Failed to register your interest. Please try again later.")]
    RecordFailure(#[source] anyhow::Error),
}

impl std::fmt::Debug for BookInterestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for BookInterestError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookInterestError::ValidationError(_) => StatusCode::BAD_REQUEST,
            BookInterestError::DispatchFailure(_) | BookInterestError::RecordFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ResponseEnvelope::failure(self.to_string()))
    }
}

#[tracing::instrument(
    name = "Registering interest in the book",
    skip(form, email_client, interest_log, operator),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn register_book_interest(
    form: web::Json<BookInterestForm>,
    email_client: web::Data<EmailClient>,
    interest_log: web::Data<InterestLog>,
    operator: web::Data<OperatorAddress>,
) -> Result<HttpResponse, BookInterestError> {
    let submission: BookInterestSubmission = form.into_inner().try_into()?;
    tracing::Span::current()
        .record("submitter_email", tracing::field::display(&submission.email))
        .record("submitter_name", tracing::field::display(&submission.name));

    // The log row stays even if the notification below fails.
    let logged = interest_log
        .append(InterestLogRecord::new(&submission, Local::now()))
        .await;
    if let Err(e) = &logged {
        tracing::error!(
            error.cause_chain = ?e,
            "Failed to record the book interest registration"
        );
    }

    send_book_interest_email(&email_client, &operator.0, &submission)
        .await
        .context("Failed to send the book interest notification")
        .map_err(BookInterestError::DispatchFailure)?;
    logged.map_err(BookInterestError::RecordFailure)?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::success(
        "Your pre-order interest has been registered!",
    )))
}

#[tracing::instrument(
    name = "Send the book interest notification to the operator",
    skip(email_client, operator, submission)
)]
async fn send_book_interest_email(
    email_client: &EmailClient,
    operator: &EmailAddress,
    submission: &BookInterestSubmission,
) -> Result<(), reqwest::Error> {
    let html = format!(
        "<html>\
        <head><title>New Book Interest</title></head>\
        <body>\
        <h2>New Book Interest Registration</h2>\
        <p><strong>Name:</strong> {name}</p>\
        <p><strong>Email:</strong> {email}</p>\
        <p><strong>Subscribe to updates:</strong> {notifications}</p>\
        </body>\
        </html>",
        name = submission.name,
        email = submission.email,
        notifications = submission.notifications_flag(),
    );
    let text = format!(
        "New Book Interest Registration\n\nName: {}\nEmail: {}\nSubscribe to updates: {}",
        submission.name,
        submission.email,
        submission.notifications_flag(),
    );

    let envelope = Envelope {
        to: operator,
        from: &submission.email,
        reply_to: &submission.email,
    };
    email_client
        .send_email(envelope, "Book Interest Registration", &html, &text)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send email: {:?}", e);
            e
        })
}
