use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000000_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(EventStatus::Enum)
                    .values(EventStatus::values())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Events::Name))
                    .col(text(Events::Description))
                    .col(string_null(Events::Location))
                    .col(timestamp_null(Events::BeginEnrollmentDateTime))
                    .col(timestamp_null(Events::CloseEnrollmentDateTime))
                    .col(timestamp_null(Events::BeginEventDateTime))
                    .col(timestamp_null(Events::EndEventDateTime))
                    .col(integer(Events::BasePrice).default(0))
                    .col(integer(Events::MaxPrice).default(0))
                    .col(integer(Events::LimitOfEnrollment).default(0))
                    .col(boolean(Events::Free).default(true))
                    .col(boolean(Events::Offline).default(false))
                    .col(
                        ColumnDef::new(Events::EventStatus)
                            .enumeration(EventStatus::Enum, EventStatus::values())
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(uuid_null(Events::ManagerId))
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_manager_id")
                            .from(Events::Table, Events::ManagerId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts by name most often
        manager
            .create_index(
                Index::create()
                    .name("idx_events_name")
                    .table(Events::Table)
                    .col(Events::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_manager_id")
                    .table(Events::Table)
                    .col(Events::ManagerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Location,
    BeginEnrollmentDateTime,
    CloseEnrollmentDateTime,
    BeginEventDateTime,
    EndEventDateTime,
    BasePrice,
    MaxPrice,
    LimitOfEnrollment,
    Free,
    Offline,
    EventStatus,
    ManagerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum EventStatus {
    #[sea_orm(iden = "event_status")]
    Enum,
    #[sea_orm(iden = "DRAFT")]
    Draft,
    #[sea_orm(iden = "PUBLISHED")]
    Published,
    #[sea_orm(iden = "BEGAN_ENROLLMENT")]
    BeganEnrollment,
    #[sea_orm(iden = "ENROLLMENT_STARTED")]
    EnrollmentStarted,
    #[sea_orm(iden = "ENROLLMENT_ENDED")]
    EnrollmentEnded,
}

impl EventStatus {
    fn values() -> [Self; 5] {
        [
            Self::Draft,
            Self::Published,
            Self::BeganEnrollment,
            Self::EnrollmentStarted,
            Self::EnrollmentEnded,
        ]
    }
}
