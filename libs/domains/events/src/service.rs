use database::{Page, PageRequest};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventDto, EventSortField};
use crate::repository::EventRepository;

/// Who is asking for a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    pub account_id: Option<Uuid>,
    pub is_admin: bool,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn account(account_id: Uuid) -> Self {
        Self {
            account_id: Some(account_id),
            is_admin: false,
        }
    }

    pub fn admin(account_id: Uuid) -> Self {
        Self {
            account_id: Some(account_id),
            is_admin: true,
        }
    }
}

/// Service layer for Event business logic
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validates and stores a new `DRAFT` event managed by `manager`.
    #[tracing::instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create_event(&self, dto: EventDto, manager: Option<Uuid>) -> EventResult<Event> {
        dto.validate()?;
        self.repository.create(Event::new(0, dto, manager)).await
    }

    pub async fn get_event(&self, id: i64) -> EventResult<Event> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_events(
        &self,
        request: PageRequest<EventSortField>,
    ) -> EventResult<Page<Event>> {
        self.repository.find_all(request).await
    }

    /// Replaces the client-settable fields of an event.
    ///
    /// Checked in order: the event exists, the body is valid, the caller is
    /// the event's manager or an admin.
    #[tracing::instrument(skip(self, dto))]
    pub async fn update_event(&self, id: i64, dto: EventDto, caller: Caller) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;

        dto.validate()?;

        if !caller.is_admin && !event.is_managed_by(caller.account_id) {
            return Err(EventError::Forbidden {
                event: id,
                account: caller
                    .account_id
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "anonymous".to_string()),
            });
        }

        event.apply_dto(dto);
        self.repository.update(event).await
    }

    /// Removes every event. Used by test fixtures.
    pub async fn delete_all(&self) -> EventResult<u64> {
        self.repository.delete_all().await
    }
}
