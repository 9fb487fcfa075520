use async_trait::async_trait;
use database::{Page, PageRequest};
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::{EventError, EventResult},
    models::{Event, EventSortField},
    repository::EventRepository,
};

#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, mut event: Event) -> EventResult<Event> {
        event.id = 0;
        let active_model: entity::ActiveModel = event.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await?;

        tracing::info!(event_id = model.id, "Created event");
        Ok(model.into())
    }

    async fn update(&self, event: Event) -> EventResult<Event> {
        let id = event.id;
        let active_model: entity::ActiveModel = event.into();

        let model = entity::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => EventError::NotFound(id),
                other => EventError::Database(other),
            })?;

        tracing::info!(event_id = id, "Updated event");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self, request: PageRequest<EventSortField>) -> EventResult<Page<Event>> {
        let total = entity::Entity::find()
            .count(&self.db)
            .await?;

        let mut query = entity::Entity::find();
        for order in &request.sort {
            query = query.order_by(
                entity::Column::from(order.property),
                Order::from(order.direction),
            );
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .offset(request.offset())
            .limit(request.size)
            .all(&self.db)
            .await?;

        let content = models.into_iter().map(Into::into).collect();
        Ok(Page::new(content, request.page, request.size, total))
    }

    async fn delete_all(&self) -> EventResult<u64> {
        let result = entity::Entity::delete_many()
            .exec(&self.db)
            .await?;

        tracing::info!(removed = result.rows_affected, "Deleted all events");
        Ok(result.rows_affected)
    }
}
