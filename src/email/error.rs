//! Email error taxonomy
//!
//! Distinguishes template resolution failures, missing context values,
//! invalid addresses, and transport failures so callers can map them to
//! the right HTTP responses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    /// The template name did not resolve to a template resource
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The template (or the dispatcher) referenced a context value that
    /// the caller did not supply
    #[error("missing context value: {0}")]
    MissingContext(String),

    /// Template rendering failed for a reason other than an unresolved
    /// name or a missing value
    #[error("template render failure: {0}")]
    Render(#[source] minijinja::Error),

    /// The recipient or sender address is not a syntactically valid mailbox
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The delivery transport reported a failure
    #[error("mail transport failure: {0}")]
    Transport(String),
}
