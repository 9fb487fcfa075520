use axum_helpers::{Link, Links, PageMetadata};
use chrono::NaiveDateTime;
use database::{DEFAULT_PAGE_SIZE, MAX_PAGE_INDEX, MAX_PAGE_SIZE, PageRequest, SortOrder};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::EventResult;

/// Publication lifecycle of an event. New events are always `DRAFT`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    #[sea_orm(string_value = "BEGAN_ENROLLMENT")]
    BeganEnrollment,
    #[sea_orm(string_value = "ENROLLMENT_STARTED")]
    EnrollmentStarted,
    #[sea_orm(string_value = "ENROLLMENT_ENDED")]
    EnrollmentEnded,
}

/// Reference to the managing account, serialized as `{"id": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ManagerRef {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned by the store
    pub id: i64,
    pub name: String,
    pub description: String,
    #[schema(value_type = Option<String>, example = "2018-11-23T14:21:00")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-24T14:21:00")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-25T14:21:00")]
    pub begin_event_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-26T14:21:00")]
    pub end_event_date_time: Option<NaiveDateTime>,
    /// Absent for online events
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerRef>,
}

impl Event {
    /// Builds an event from a transfer object with derived fields computed.
    pub fn new(id: i64, dto: EventDto, manager: Option<Uuid>) -> Self {
        let mut event = Self {
            id,
            name: String::new(),
            description: String::new(),
            begin_enrollment_date_time: None,
            close_enrollment_date_time: None,
            begin_event_date_time: None,
            end_event_date_time: None,
            location: None,
            base_price: 0,
            max_price: 0,
            limit_of_enrollment: 0,
            offline: false,
            free: true,
            event_status: EventStatus::Draft,
            manager: manager.map(|id| ManagerRef { id }),
        };
        event.apply_dto(dto);
        event
    }

    /// Replaces every client-settable field, then recomputes derived fields.
    /// `id`, `event_status` and `manager` are untouched.
    pub fn apply_dto(&mut self, dto: EventDto) {
        self.name = dto.name;
        self.description = dto.description;
        self.begin_enrollment_date_time = dto.begin_enrollment_date_time;
        self.close_enrollment_date_time = dto.close_enrollment_date_time;
        self.begin_event_date_time = dto.begin_event_date_time;
        self.end_event_date_time = dto.end_event_date_time;
        self.location = dto.location;
        self.base_price = dto.base_price;
        self.max_price = dto.max_price;
        self.limit_of_enrollment = dto.limit_of_enrollment;
        self.update();
    }

    /// Recomputes `free` and `offline` from prices and location.
    pub fn update(&mut self) {
        self.free = self.base_price == 0 && self.max_price == 0;
        self.offline = self
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty());
    }

    pub fn manager_id(&self) -> Option<Uuid> {
        self.manager.map(|m| m.id)
    }

    pub fn is_managed_by(&self, account_id: Option<Uuid>) -> bool {
        account_id.is_some() && self.manager_id() == account_id
    }
}

/// Client payload for create and update.
///
/// Unknown properties (including `id`, `free`, `offline`, `eventStatus`) are
/// rejected; explicit `null` is read as the field's zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EventDto {
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "Spring")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "REST API Development with Spring")]
    pub description: String,
    #[schema(value_type = Option<String>, example = "2018-11-23T14:21:00")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-24T14:21:00")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-25T14:21:00")]
    pub begin_event_date_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>, example = "2018-11-26T14:21:00")]
    pub end_event_date_time: Option<NaiveDateTime>,
    #[schema(example = "D2 Startup Factory")]
    pub location: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = 100)]
    pub base_price: i32,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = 200)]
    pub max_price: i32,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = 100)]
    pub limit_of_enrollment: i32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Properties the listing can be ordered by, named as in the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum EventSortField {
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
    EventStatus,
}

impl EventSortField {
    /// Ascending comparison on this property; `None` sorts last, as NULL does in Postgres.
    pub fn compare(self, a: &Event, b: &Event) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Description => a.description.cmp(&b.description),
            Self::Location => nulls_last(&a.location, &b.location),
            Self::BeginEnrollmentDateTime => {
                nulls_last(&a.begin_enrollment_date_time, &b.begin_enrollment_date_time)
            }
            Self::CloseEnrollmentDateTime => {
                nulls_last(&a.close_enrollment_date_time, &b.close_enrollment_date_time)
            }
            Self::BeginEventDateTime => {
                nulls_last(&a.begin_event_date_time, &b.begin_event_date_time)
            }
            Self::EndEventDateTime => nulls_last(&a.end_event_date_time, &b.end_event_date_time),
            Self::BasePrice => a.base_price.cmp(&b.base_price),
            Self::MaxPrice => a.max_price.cmp(&b.max_price),
            Self::LimitOfEnrollment => a.limit_of_enrollment.cmp(&b.limit_of_enrollment),
            Self::EventStatus => a.event_status.cmp(&b.event_status),
        }
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Query parameters of `GET /api/events`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Zero-based page index (default 0)
    #[validate(range(max = MAX_PAGE_INDEX))]
    pub page: Option<u64>,
    /// Page size, 1 to 2000 (default 20)
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub size: Option<u64>,
    /// `property[,asc|desc]`, e.g. `name,desc`
    #[param(example = "name,desc")]
    pub sort: Option<String>,
}

impl EventQuery {
    pub fn to_page_request(&self) -> EventResult<PageRequest<EventSortField>> {
        let mut request = PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            request = request.with_sort(sort.parse::<SortOrder<EventSortField>>()?);
        }
        Ok(request)
    }
}

/// An event with its `_links`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventResource {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "_links")]
    #[schema(value_type = HashMap<String, Link>)]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmbeddedEvents {
    #[serde(rename = "eventList")]
    pub event_list: Vec<EventResource>,
}

/// One page of events; `_embedded` is omitted when the page is empty.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventPage {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(rename = "_links")]
    #[schema(value_type = HashMap<String, Link>)]
    pub links: Links,
    pub page: PageMetadata,
}

/// Entry point of the API: `GET /api`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IndexResource {
    #[serde(rename = "_links")]
    #[schema(value_type = HashMap<String, Link>)]
    pub links: Links,
}
