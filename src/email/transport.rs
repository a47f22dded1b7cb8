/**
 * Email Delivery Transport
 *
 * This module defines the delivery seam between the dispatcher and the
 * outside world. The dispatcher only knows the `EmailTransport` trait;
 * production wires in the SMTP implementation, tests wire in a recording
 * double so delivery behavior can be asserted without a mail server.
 */

use std::sync::Mutex;

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::email::error::EmailError;
use crate::server::config::MailConfig;

/// Async email transport abstraction
///
/// One call submits one fully constructed message. Implementations do not
/// retry; failures surface as `EmailError::Transport` and propagate.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Submit a message for delivery
    async fn send(&self, message: Message) -> Result<(), EmailError>;
}

/// SMTP transport backed by lettre
///
/// Built from `MailConfig`; supports STARTTLS relays and plain connections
/// for local development, with optional credentials.
pub struct SmtpMailTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build an SMTP transport from the mail configuration
    ///
    /// No connection is made here; lettre connects lazily on first send.
    pub fn from_config(config: &MailConfig) -> Result<Self, EmailError> {
        let builder = if config.smtp_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| EmailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let builder = builder.port(config.smtp_port);

        let builder = match (&config.smtp_username, &config.smtp_password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            inner: builder.build(),
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpMailTransport {
    async fn send(&self, message: Message) -> Result<(), EmailError> {
        self.inner
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| EmailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// A message captured by `RecordingTransport`
///
/// Holds the envelope (sender/recipients) and the formatted RFC 5322 bytes
/// so tests can assert on subjects, recipients, and rendered bodies.
#[derive(Clone)]
pub struct RecordedMessage {
    pub envelope: Envelope,
    pub formatted: Vec<u8>,
}

impl RecordedMessage {
    /// The formatted message as a lossy string, for content assertions
    ///
    /// Quoted-printable soft line breaks are unfolded first; the encoder
    /// is free to wrap mid-word, which would otherwise split markers that
    /// assertions search for.
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.formatted)
            .replace("=\r\n", "")
            .replace("=\n", "")
    }
}

/// In-memory transport that records messages instead of delivering them
///
/// Used by the test suites to verify dispatch counts and message contents.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<RecordedMessage>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages submitted so far
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Snapshot of all recorded messages
    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, message: Message) -> Result<(), EmailError> {
        let recorded = RecordedMessage {
            envelope: message.envelope().clone(),
            formatted: message.formatted(),
        };
        self.sent.lock().unwrap().push(recorded);
        Ok(())
    }
}
