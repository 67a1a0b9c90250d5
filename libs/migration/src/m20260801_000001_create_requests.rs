use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(text(Requests::Description))
                    .col(ColumnDef::new(Requests::RequestorId).big_integer().not_null())
                    .col(timestamp_with_time_zone(Requests::Created))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_requestor_id")
                            .from(Requests::Table, Requests::RequestorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_requestor_id")
                    .table(Requests::Table)
                    .col(Requests::RequestorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    Description,
    RequestorId,
    Created,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
