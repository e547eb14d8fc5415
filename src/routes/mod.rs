mod book_interest;
mod contact;
mod envelope;
mod health_check;

pub use book_interest::{BookInterestError, BookInterestForm, register_book_interest};
pub use contact::{ContactError, ContactForm, contact};
pub use envelope::{ResponseEnvelope, error_chain_fmt, json_error_handler, method_not_allowed};
pub use health_check::*;
