use crate::models::{EmailRecord, EmailStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tb_email table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tb_email")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email_id: Uuid,
    pub user_id: Uuid,
    pub email_from: String,
    pub email_to: String,
    pub email_subject: String,
    #[sea_orm(column_type = "Text")]
    pub email_body: String,
    pub send_date_email: Option<DateTimeWithTimeZone>,
    pub status_email: EmailStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmailRecord {
    fn from(model: Model) -> Self {
        Self {
            email_id: model.email_id,
            user_id: model.user_id,
            email_from: model.email_from,
            email_to: model.email_to,
            email_subject: model.email_subject,
            email_body: model.email_body,
            send_date_email: model.send_date_email.map(Into::into),
            status_email: model.status_email,
        }
    }
}

impl From<EmailRecord> for ActiveModel {
    fn from(record: EmailRecord) -> Self {
        ActiveModel {
            email_id: Set(record.email_id),
            user_id: Set(record.user_id),
            email_from: Set(record.email_from),
            email_to: Set(record.email_to),
            email_subject: Set(record.email_subject),
            email_body: Set(record.email_body),
            send_date_email: Set(record.send_date_email.map(Into::into)),
            status_email: Set(record.status_email),
        }
    }
}
