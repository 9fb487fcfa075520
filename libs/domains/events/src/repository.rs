use async_trait::async_trait;
use database::{Page, PageRequest, SortDirection};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventSortField};

/// Repository trait for Event persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Stores a new event; the `id` of the argument is ignored and a fresh one assigned
    async fn create(&self, event: Event) -> EventResult<Event>;

    /// Overwrites an existing event. Fails with `NotFound` for an unknown id.
    async fn update(&self, event: Event) -> EventResult<Event>;

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>>;

    /// One page of events ordered by `request.sort`, ties broken by ascending id
    async fn find_all(&self, request: PageRequest<EventSortField>) -> EventResult<Page<Event>>;

    /// Removes every event, returning how many were removed
    async fn delete_all(&self) -> EventResult<u64>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<BTreeMap<i64, Event>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self {
            events: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, mut event: Event) -> EventResult<Event> {
        event.id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());

        tracing::info!(event_id = event.id, "Created event");
        Ok(event)
    }

    async fn update(&self, event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;
        let stored = events
            .get_mut(&event.id)
            .ok_or(EventError::NotFound(event.id))?;
        *stored = event.clone();

        tracing::info!(event_id = event.id, "Updated event");
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn find_all(&self, request: PageRequest<EventSortField>) -> EventResult<Page<Event>> {
        let events = self.events.read().await;

        // BTreeMap iteration is by id, so a stable sort keeps id as the tie-breaker
        let mut all: Vec<Event> = events.values().cloned().collect();
        all.sort_by(|a, b| {
            request
                .sort
                .iter()
                .map(|order| {
                    let ordering = order.property.compare(a, b);
                    match order.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size).unwrap_or(usize::MAX))
            .collect();

        Ok(Page::new(content, request.page, request.size, total))
    }

    async fn delete_all(&self) -> EventResult<u64> {
        let mut events = self.events.write().await;
        let removed = events.len() as u64;
        events.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDto;
    use database::SortOrder;

    fn named(name: &str, base_price: i32) -> Event {
        Event::new(
            0,
            EventDto {
                name: name.into(),
                base_price,
                ..Default::default()
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryEventRepository::new();

        let first = repo.create(named("a", 0)).await.unwrap();
        let second = repo.create(named("b", 0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
        assert_eq!(repo.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_unknown_event() {
        let repo = InMemoryEventRepository::new();
        let mut event = named("ghost", 0);
        event.id = 42;

        let result = repo.update(event).await;
        assert!(matches!(result, Err(EventError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_replaces_stored_event() {
        let repo = InMemoryEventRepository::new();
        let mut event = repo.create(named("before", 0)).await.unwrap();

        event.name = "after".into();
        repo.update(event.clone()).await.unwrap();

        let stored = repo.find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "after");
    }

    #[tokio::test]
    async fn test_find_all_pages_and_sorts() {
        let repo = InMemoryEventRepository::new();
        for i in 0..30 {
            repo.create(named(&format!("event {:02}", i), 0)).await.unwrap();
        }

        let request = PageRequest::new(1, 10).with_sort(SortOrder::desc(EventSortField::Name));
        let page = repo.find_all(request).await.unwrap();

        assert_eq!(page.total_elements, 30);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.content[0].name, "event 19");
        assert_eq!(page.content[9].name, "event 10");
    }

    #[tokio::test]
    async fn test_find_all_breaks_ties_by_id() {
        let repo = InMemoryEventRepository::new();
        repo.create(named("b", 100)).await.unwrap();
        repo.create(named("a", 100)).await.unwrap();
        repo.create(named("c", 50)).await.unwrap();

        let request = PageRequest::default().with_sort(SortOrder::desc(EventSortField::BasePrice));
        let page = repo.find_all(request).await.unwrap();

        let ids: Vec<i64> = page.content.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_location_sorts_like_null() {
        let repo = InMemoryEventRepository::new();
        for location in [None, Some("Seoul"), Some("Busan")] {
            let mut event = named("e", 0);
            event.location = location.map(String::from);
            repo.create(event).await.unwrap();
        }

        let ascending = PageRequest::default().with_sort(SortOrder::asc(EventSortField::Location));
        let ids: Vec<i64> = repo
            .find_all(ascending)
            .await
            .unwrap()
            .content
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let descending =
            PageRequest::default().with_sort(SortOrder::desc(EventSortField::Location));
        let ids: Vec<i64> = repo
            .find_all(descending)
            .await
            .unwrap()
            .content
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = InMemoryEventRepository::new();
        repo.create(named("only", 0)).await.unwrap();

        let page = repo.find_all(PageRequest::new(5, 10)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = InMemoryEventRepository::new();
        repo.create(named("a", 0)).await.unwrap();
        repo.create(named("b", 0)).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.find_all(PageRequest::default()).await.unwrap().total_elements, 0);
    }
}
