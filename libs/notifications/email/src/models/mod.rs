use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::message::NotificationMessage;

/// Outcome of a notification. `Delivered` exists for parity with the
/// stored vocabulary but nothing assigns it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum EmailStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "SENT")]
    Sent,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
}

/// One row of `tb_email`: a single send attempt for one consumed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub email_id: Uuid,
    pub user_id: Uuid,
    pub email_from: String,
    pub email_to: String,
    pub email_subject: String,
    pub email_body: String,
    pub send_date_email: Option<DateTime<Utc>>,
    pub status_email: EmailStatus,
}

impl EmailRecord {
    /// Pending record for `message`, sent from `sender`.
    pub fn pending(message: &NotificationMessage, sender: &str) -> Self {
        Self {
            email_id: Uuid::now_v7(),
            user_id: message.user_id,
            email_from: sender.to_string(),
            email_to: message.email_to.clone(),
            email_subject: message.email_subject.clone(),
            email_body: message.email_body.clone(),
            send_date_email: None,
            status_email: EmailStatus::Pending,
        }
    }

    pub fn mark_sent(&mut self, at: DateTime<Utc>) {
        self.status_email = EmailStatus::Sent;
        self.send_date_email = Some(at);
    }

    pub fn mark_failed(&mut self) {
        self.status_email = EmailStatus::Failed;
        self.send_date_email = None;
    }

    /// The plain-text mail this record describes.
    pub fn to_email(&self) -> Email {
        Email {
            from: self.email_from.clone(),
            to: self.email_to.clone(),
            subject: self.email_subject.clone(),
            body: self.email_body.clone(),
        }
    }
}

/// Public view of an [`EmailRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub user_id: Uuid,
    pub email_from: String,
    pub email_to: String,
    pub email_subject: String,
    pub email_body: String,
    pub status_email: EmailStatus,
}

impl From<&EmailRecord> for EmailResponse {
    fn from(record: &EmailRecord) -> Self {
        Self {
            user_id: record.user_id,
            email_from: record.email_from.clone(),
            email_to: record.email_to.clone(),
            email_subject: record.email_subject.clone(),
            email_body: record.email_body.clone(),
            status_email: record.status_email,
        }
    }
}

/// Plain-text mail handed to an [`crate::EmailProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_strings() {
        assert_eq!(EmailStatus::Sent.to_string(), "SENT");
        assert_eq!(EmailStatus::from_str("FAILED").unwrap(), EmailStatus::Failed);
        assert_eq!(
            serde_json::to_string(&EmailStatus::Delivered).unwrap(),
            "\"DELIVERED\""
        );
        assert_eq!(EmailStatus::default(), EmailStatus::Pending);
    }

    #[test]
    fn test_record_transitions() {
        let message = NotificationMessage::welcome(Uuid::new_v4(), "Ana", "ana@x.com");
        let mut record = EmailRecord::pending(&message, "noreply@x.com");
        assert_eq!(record.status_email, EmailStatus::Pending);
        assert_eq!(record.email_from, "noreply@x.com");

        let now = Utc::now();
        record.mark_sent(now);
        assert_eq!(record.status_email, EmailStatus::Sent);
        assert_eq!(record.send_date_email, Some(now));

        let mut failed = EmailRecord::pending(&message, "noreply@x.com");
        failed.mark_failed();
        assert_eq!(failed.status_email, EmailStatus::Failed);
        assert!(failed.send_date_email.is_none());
    }

    #[test]
    fn test_response_mapping() {
        let message = NotificationMessage::welcome(Uuid::new_v4(), "Ana", "ana@x.com");
        let record = EmailRecord::pending(&message, "noreply@x.com");
        let response = EmailResponse::from(&record);

        assert_eq!(response.user_id, message.user_id);
        assert_eq!(response.status_email, EmailStatus::Pending);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusEmail"], "PENDING");
        assert_eq!(json["emailFrom"], "noreply@x.com");
    }
}
