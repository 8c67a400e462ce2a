//! Wire contract between the user service and the email worker.
//!
//! Available without the `worker` feature so publishers can depend on it
//! without pulling in SMTP or the `tb_email` entity.

use messaging::Job;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Subject of the welcome notification. The trailing space is part of the text.
pub const WELCOME_SUBJECT: &str = "Assunto do email: ";

/// Body of the welcome notification for `name`.
pub fn welcome_body(name: &str) -> String {
    format!("Whello, {} bem vindo a plataforma.", name)
}

/// Payload published on user creation and consumed by the email worker.
///
/// Serialized as camelCase JSON with no version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub user_id: Uuid,
    /// Sender stamped by the publisher, if any. The worker sends from its own
    /// configured address regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_from: Option<String>,
    pub email_to: String,
    pub email_subject: String,
    pub email_body: String,
}

impl NotificationMessage {
    /// Welcome notification for a freshly created user.
    pub fn welcome(user_id: Uuid, name: &str, email: &str) -> Self {
        Self {
            user_id,
            email_from: None,
            email_to: email.to_string(),
            email_subject: WELCOME_SUBJECT.to_string(),
            email_body: welcome_body(name),
        }
    }

    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        self.email_from = sender;
        self
    }
}

impl Job for NotificationMessage {
    fn job_id(&self) -> String {
        self.user_id.to_string()
    }

    fn job_type(&self) -> &'static str {
        "notification_message"
    }
}
