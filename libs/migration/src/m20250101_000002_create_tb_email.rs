use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to tb_user: deleting a user keeps its email history.
        manager
            .create_table(
                Table::create()
                    .table(TbEmail::Table)
                    .if_not_exists()
                    .col(pk_uuid(TbEmail::EmailId))
                    .col(uuid(TbEmail::UserId))
                    .col(string(TbEmail::EmailFrom))
                    .col(string(TbEmail::EmailTo))
                    .col(string(TbEmail::EmailSubject))
                    .col(text(TbEmail::EmailBody))
                    .col(timestamp_with_time_zone_null(TbEmail::SendDateEmail))
                    .col(string_len(TbEmail::StatusEmail, 16))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tb_email_user_id")
                    .table(TbEmail::Table)
                    .col(TbEmail::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TbEmail::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TbEmail {
    Table,
    EmailId,
    UserId,
    EmailFrom,
    EmailTo,
    EmailSubject,
    EmailBody,
    SendDateEmail,
    StatusEmail,
}
