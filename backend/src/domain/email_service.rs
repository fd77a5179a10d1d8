//! SMTP email delivery for family plan invitations.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::new(),
        }
    }
}

impl EmailConfig {
    /// Whether enough fields are set to attempt delivery
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.from_email.is_empty()
    }
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    transport: Option<SmtpTransport>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        info!(
            "Initializing email service for SMTP server: {}:{}",
            self.config.smtp_server, self.config.smtp_port
        );

        let tls_params = TlsParameters::new(self.config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&self.config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(self.config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        self.transport = Some(transport);
        info!("Email service initialized successfully");
        Ok(())
    }

    /// Send an HTML email through the configured transport
    pub fn send(&self, to: &str, subject: &str, html_body: String) -> Result<()> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Email service not initialized"))?;

        let email = Message::builder()
            .from(
                self.config
                    .from_email
                    .parse::<Mailbox>()
                    .context("Failed to parse from email")?,
            )
            .to(to.parse::<Mailbox>().context("Failed to parse to email")?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .context("Failed to build email")?;

        transport.send(&email).context("Failed to send email")?;
        info!("Email sent successfully to {}", to);
        Ok(())
    }
}

/// HTML body for a family plan invitation
pub fn invitation_html(inviter_name: Option<&str>, invite_url: &str) -> String {
    let inviter = inviter_name.unwrap_or("A family member");

    format!(
        r#"<html>
  <body style="font-family: sans-serif; color: #333;">
    <h2>You've been invited!</h2>
    <p>{inviter} invited you to join their family plan on Finance Tracker.</p>
    <p>
      <a href="{invite_url}" style="background: #2563eb; color: #fff; padding: 10px 20px; border-radius: 6px; text-decoration: none;">
        Accept invitation
      </a>
    </p>
    <p>If the button doesn't work, copy this link into your browser:<br/>{invite_url}</p>
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_without_initialize_fails() {
        let service = EmailService::new(EmailConfig::default());
        let result = service.send("someone@example.com", "Hi", "<p>Hi</p>".to_string());

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not initialized"));
    }

    #[test]
    fn test_config_completeness() {
        assert!(!EmailConfig::default().is_complete());

        let config = EmailConfig {
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from_email: "noreply@example.com".to_string(),
            ..EmailConfig::default()
        };
        assert!(config.is_complete());
    }

    #[test]
    fn test_invitation_html_mentions_inviter_and_url() {
        let html = invitation_html(Some("Ana"), "https://app.example.com/invite?token=abc");
        assert!(html.contains("Ana invited you"));
        assert!(html.contains("https://app.example.com/invite?token=abc"));

        let anonymous = invitation_html(None, "https://app.example.com/invite");
        assert!(anonymous.contains("A family member invited you"));
    }
}
