mod book_interest_submission;
mod contact_submission;
mod email_address;
mod form_text;
mod submission_error;

pub use book_interest_submission::{BookInterestSubmission, coerce_flag};
pub use contact_submission::ContactSubmission;
pub use email_address::EmailAddress;
pub use form_text::FormText;
pub use submission_error::SubmissionError;
