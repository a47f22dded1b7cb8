/**
 * Email Dispatcher and Notification Entry Points
 *
 * This module assembles and submits transactional email. `dispatch` is the
 * shared sender: it renders the named template, wraps the HTML in a
 * multipart message, and hands it to the transport. The three notification
 * entry points each bind a fixed template name and delegate to `dispatch`
 * unchanged.
 *
 * # Message Shape
 *
 * - subject: taken from `context["subject"]`
 * - plain-text part: always empty (these are HTML-only emails)
 * - HTML alternative: the rendered template
 * - sender: the configured from-address
 * - recipients: exactly the one recipient passed in
 *
 * # Guarantees
 *
 * At most one message is submitted per call. There is no batching,
 * deduplication, rate limiting, or retry; transport failures propagate.
 */

use std::sync::Arc;

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::email::error::EmailError;
use crate::email::renderer::TemplateRenderer;
use crate::email::transport::{EmailTransport, SmtpMailTransport};
use crate::server::config::MailConfig;

/// Template bound by the forgot-password notification
const FORGOT_PASSWORD_TEMPLATE: &str = "email/forgot_password.html";

/// Template bound by the welcome notification
const WELCOME_TEMPLATE: &str = "email/welcome_mail.html";

/// Template bound by the welcome-with-temporary-password notification
const WELCOME_WITH_PASSWORD_TEMPLATE: &str = "email/welcome_mail_with_password.html";

/// Renders and submits transactional email
///
/// Holds the renderer, the delivery transport, and the configured sender
/// address. All configuration is captured at construction time; there is
/// no ambient process-wide state.
pub struct Mailer {
    renderer: TemplateRenderer,
    transport: Arc<dyn EmailTransport>,
    sender: Mailbox,
}

impl Mailer {
    /// Create a mailer delivering over SMTP per the given configuration
    pub fn new(config: &MailConfig) -> Result<Self, EmailError> {
        let transport = SmtpMailTransport::from_config(config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a mailer with an injected transport
    ///
    /// Tests use this with `RecordingTransport` to assert on dispatched
    /// messages without an SMTP server.
    pub fn with_transport(
        config: &MailConfig,
        transport: Arc<dyn EmailTransport>,
    ) -> Result<Self, EmailError> {
        Ok(Self {
            renderer: TemplateRenderer::new(&config.template_dir),
            transport,
            sender: config.from_address.parse()?,
        })
    }

    /// Render `template_name` with `context` and submit the result to `to`
    ///
    /// # Preconditions
    ///
    /// - `context` contains a string `subject` entry
    /// - `to` is a syntactically valid email address
    /// - `template_name` resolves and `context` binds every value the
    ///   template references
    ///
    /// The subject is checked before rendering, and rendering happens
    /// before the message is built, so no transport attempt is made on
    /// any precondition failure.
    pub async fn dispatch(
        &self,
        to: &str,
        context: &serde_json::Value,
        template_name: &str,
    ) -> Result<(), EmailError> {
        let subject = context
            .get("subject")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| EmailError::MissingContext("subject".to_string()))?;

        let html = self.renderer.render(template_name, context)?;
        let recipient: Mailbox = to.parse()?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(String::new()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        tracing::info!(template = template_name, to = to, "Dispatching email");
        self.transport.send(message).await
    }

    /// Send the forgot-password notification
    pub async fn send_forgot_password_mail(
        &self,
        to: &str,
        context: &serde_json::Value,
    ) -> Result<(), EmailError> {
        self.dispatch(to, context, FORGOT_PASSWORD_TEMPLATE).await
    }

    /// Send the welcome notification
    pub async fn send_welcome_mail(
        &self,
        to: &str,
        context: &serde_json::Value,
    ) -> Result<(), EmailError> {
        self.dispatch(to, context, WELCOME_TEMPLATE).await
    }

    /// Send the welcome notification that carries a temporary password
    pub async fn send_welcome_mail_with_password(
        &self,
        to: &str,
        context: &serde_json::Value,
    ) -> Result<(), EmailError> {
        self.dispatch(to, context, WELCOME_WITH_PASSWORD_TEMPLATE)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::transport::RecordingTransport;
    use serde_json::json;

    fn test_config() -> MailConfig {
        MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            smtp_starttls: false,
            smtp_username: None,
            smtp_password: None,
            from_address: "no-reply@sitepanel.local".to_string(),
            template_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").into(),
        }
    }

    fn recording_mailer() -> (Mailer, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let mailer = Mailer::with_transport(&test_config(), transport.clone()).unwrap();
        (mailer, transport)
    }

    #[tokio::test]
    async fn test_welcome_mail_dispatches_once() {
        let (mailer, transport) = recording_mailer();

        let context = json!({
            "subject": "Welcome!",
            "username": "alice",
            "verify_token": "abc123",
        });

        mailer
            .send_welcome_mail("user@example.com", &context)
            .await
            .unwrap();

        assert_eq!(transport.sent_count(), 1);
        let sent = &transport.messages()[0];
        let text = sent.as_text();
        assert!(text.contains("Subject: Welcome!"));
        assert!(text.contains("abc123"));

        let recipients: Vec<String> = sent
            .envelope
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(recipients, vec!["user@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_forgot_password_uses_bound_template() {
        let (mailer, transport) = recording_mailer();

        let context = json!({
            "subject": "Reset",
            "username": "bob",
            "reset_token": "tok-42",
        });

        mailer
            .send_forgot_password_mail("a@b.com", &context)
            .await
            .unwrap();

        assert_eq!(transport.sent_count(), 1);
        let text = transport.messages()[0].as_text();
        // "expires" appears only in forgot_password.html
        assert!(text.contains("expires"));
        assert!(text.contains("tok-42"));
    }

    #[tokio::test]
    async fn test_welcome_with_password_uses_bound_template() {
        let (mailer, transport) = recording_mailer();

        let context = json!({
            "subject": "Your account",
            "username": "carol",
            "verify_token": "v-1",
            "temporary_password": "s3cret-temp",
        });

        mailer
            .send_welcome_mail_with_password("carol@example.com", &context)
            .await
            .unwrap();

        assert_eq!(transport.sent_count(), 1);
        let text = transport.messages()[0].as_text();
        // "temporary" appears only in welcome_mail_with_password.html
        assert!(text.contains("temporary"));
        assert!(text.contains("s3cret-temp"));
    }

    #[tokio::test]
    async fn test_missing_subject_fails_before_transport() {
        let (mailer, transport) = recording_mailer();

        let context = json!({ "username": "alice", "verify_token": "x" });
        let err = mailer
            .send_welcome_mail("user@example.com", &context)
            .await
            .unwrap_err();

        match err {
            EmailError::MissingContext(key) => assert_eq!(key, "subject"),
            other => panic!("expected MissingContext, got {:?}", other),
        }
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_template_fails_before_transport() {
        let (mailer, transport) = recording_mailer();

        let context = json!({ "subject": "x" });
        let err = mailer
            .dispatch("user@example.com", &context, "email/does_not_exist.html")
            .await
            .unwrap_err();

        assert!(matches!(err, EmailError::TemplateNotFound(_)));
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_recipient() {
        let (mailer, transport) = recording_mailer();

        let context = json!({
            "subject": "Welcome!",
            "username": "alice",
            "verify_token": "abc",
        });
        let err = mailer
            .send_welcome_mail("not-an-address", &context)
            .await
            .unwrap_err();

        assert!(matches!(err, EmailError::Address(_)));
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_no_deduplication() {
        let (mailer, transport) = recording_mailer();

        let context = json!({
            "subject": "Welcome!",
            "username": "alice",
            "verify_token": "abc",
        });

        mailer
            .send_welcome_mail("user@example.com", &context)
            .await
            .unwrap();
        mailer
            .send_welcome_mail("user@example.com", &context)
            .await
            .unwrap();

        // Two identical calls are two independent transmissions
        assert_eq!(transport.sent_count(), 2);
    }
}
