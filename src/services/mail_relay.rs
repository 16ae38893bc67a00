//! Outbound mail relay boundary.
//!
//! The form validates locally and hands a finished message to a relay; the
//! production relay makes one EmailJS-compatible POST with a fixed
//! service/template/key triple. No retries: a failure is surfaced once and
//! the user resubmits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::contact::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
        }
    }
}

impl RelayConfig {
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// Seam for the one outbound call, so tests can substitute a recorder.
pub trait MailRelay: Send + Sync {
    fn send(&self, message: &ContactMessage) -> Result<()>;
}

/// POSTs to an EmailJS-compatible endpoint.
pub struct EmailJsRelay {
    config: RelayConfig,
    agent: ureq::Agent,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            agent: ureq::AgentBuilder::new()
                .timeout(std::time::Duration::from_secs(10))
                .build(),
        }
    }
}

impl MailRelay for EmailJsRelay {
    fn send(&self, message: &ContactMessage) -> Result<()> {
        if !self.config.is_configured() {
            anyhow::bail!("mail relay is not configured");
        }
        let payload = serde_json::json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": {
                "from_name": message.name,
                "from_email": message.email,
                "subject": message.subject,
                "message": message.message,
            },
        });
        self.agent
            .post(&self.config.endpoint)
            .send_json(payload)
            .context("mail relay request failed")?;
        tracing::info!("contact message relayed for {}", message.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = RelayConfig::default();
        assert!(!config.is_configured());
        assert!(config.endpoint.contains("emailjs"));
    }

    #[test]
    fn test_unconfigured_relay_fails_without_network() {
        let relay = EmailJsRelay::new(RelayConfig::default());
        let message = ContactMessage {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            subject: "hi".into(),
            message: "hello".into(),
        };
        assert!(relay.send(&message).is_err());
    }
}
