use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Event, EventSortField, EventStatus, ManagerRef};

/// Sea-ORM Entity for the events table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub begin_enrollment_date_time: Option<DateTime>,
    pub close_enrollment_date_time: Option<DateTime>,
    pub begin_event_date_time: Option<DateTime>,
    pub end_event_date_time: Option<DateTime>,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: EventStatus,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            begin_enrollment_date_time: model.begin_enrollment_date_time,
            close_enrollment_date_time: model.close_enrollment_date_time,
            begin_event_date_time: model.begin_event_date_time,
            end_event_date_time: model.end_event_date_time,
            location: model.location,
            base_price: model.base_price,
            max_price: model.max_price,
            limit_of_enrollment: model.limit_of_enrollment,
            offline: model.offline,
            free: model.free,
            event_status: model.event_status,
            manager: model.manager_id.map(|id| ManagerRef { id }),
        }
    }
}

/// Active model carrying every column of `event`.
///
/// An `id` of 0 is left unset so the database assigns one; `created_at` is
/// only set for new rows.
impl From<Event> for ActiveModel {
    fn from(event: Event) -> Self {
        let now = Utc::now();
        let is_new = event.id == 0;
        ActiveModel {
            id: if is_new { NotSet } else { Set(event.id) },
            manager_id: Set(event.manager_id()),
            name: Set(event.name),
            description: Set(event.description),
            begin_enrollment_date_time: Set(event.begin_enrollment_date_time),
            close_enrollment_date_time: Set(event.close_enrollment_date_time),
            begin_event_date_time: Set(event.begin_event_date_time),
            end_event_date_time: Set(event.end_event_date_time),
            location: Set(event.location),
            base_price: Set(event.base_price),
            max_price: Set(event.max_price),
            limit_of_enrollment: Set(event.limit_of_enrollment),
            offline: Set(event.offline),
            free: Set(event.free),
            event_status: Set(event.event_status),
            created_at: if is_new { Set(now.into()) } else { NotSet },
            updated_at: Set(now.into()),
        }
    }
}

impl From<EventSortField> for Column {
    fn from(field: EventSortField) -> Self {
        match field {
            EventSortField::Id => Column::Id,
            EventSortField::Name => Column::Name,
            EventSortField::Description => Column::Description,
            EventSortField::Location => Column::Location,
            EventSortField::BeginEnrollmentDateTime => Column::BeginEnrollmentDateTime,
            EventSortField::CloseEnrollmentDateTime => Column::CloseEnrollmentDateTime,
            EventSortField::BeginEventDateTime => Column::BeginEventDateTime,
            EventSortField::EndEventDateTime => Column::EndEventDateTime,
            EventSortField::BasePrice => Column::BasePrice,
            EventSortField::MaxPrice => Column::MaxPrice,
            EventSortField::LimitOfEnrollment => Column::LimitOfEnrollment,
            EventSortField::EventStatus => Column::EventStatus,
        }
    }
}
