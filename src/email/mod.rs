//! Email Module
//!
//! This module implements outbound transactional email:
//!
//! - **`renderer`** - HTML template rendering (minijinja, strict lookups)
//! - **`dispatcher`** - Message construction and the notification entry
//!   points (forgot-password, welcome, welcome-with-temporary-password)
//! - **`transport`** - The delivery seam: an `EmailTransport` trait with an
//!   SMTP implementation and a recording double for tests
//! - **`error`** - The email error taxonomy
//!
//! # Behavior
//!
//! Each notification is an independent, stateless, synchronous unit of work:
//! render the named template with the caller-supplied context, wrap the HTML
//! in a multipart message with the subject taken from the context, and hand
//! it to the transport. Failures are never caught or retried here; they
//! propagate to the caller.

/// Email error taxonomy
pub mod error;

/// HTML template rendering
pub mod renderer;

/// Message construction and notification entry points
pub mod dispatcher;

/// Delivery transport abstraction
pub mod transport;

// Re-export commonly used types
pub use dispatcher::Mailer;
pub use error::EmailError;
pub use renderer::TemplateRenderer;
pub use transport::{EmailTransport, RecordingTransport, SmtpMailTransport};
