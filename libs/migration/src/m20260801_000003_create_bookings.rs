use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Waiting,
                        BookingStatus::Approved,
                        BookingStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(timestamp_with_time_zone(Bookings::StartDate))
                    .col(timestamp_with_time_zone(Bookings::EndDate))
                    .col(ColumnDef::new(Bookings::ItemId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::BookerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .enumeration(
                                BookingStatus::Enum,
                                [
                                    BookingStatus::Waiting,
                                    BookingStatus::Approved,
                                    BookingStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("WAITING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_item_id")
                            .from(Bookings::Table, Bookings::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_booker_id")
                            .from(Bookings::Table, Bookings::BookerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_booker_id")
                    .table(Bookings::Table)
                    .col(Bookings::BookerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_item_id")
                    .table(Bookings::Table)
                    .col(Bookings::ItemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_start_date")
                    .table(Bookings::Table)
                    .col(Bookings::StartDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    StartDate,
    EndDate,
    ItemId,
    BookerId,
    Status,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "WAITING")]
    Waiting,
    #[sea_orm(iden = "APPROVED")]
    Approved,
    #[sea_orm(iden = "REJECTED")]
    Rejected,
}
