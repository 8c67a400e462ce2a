use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TbUser::Table)
                    .if_not_exists()
                    .col(pk_uuid(TbUser::UserId))
                    .col(string(TbUser::Name))
                    .col(string(TbUser::Email))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TbUser::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TbUser {
    Table,
    UserId,
    Name,
    Email,
}
