//! Contact form validation

mod form;

pub use form::{
    honeypot_triggered, parse_submission, ContactRequest, ContactSubmission, FieldError,
};
