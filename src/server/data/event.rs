//! Analytics event repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::event::{CreateEventParam, Event, EventFilter};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateEventParam) -> Result<Event, DbErr> {
        let entity = entity::event::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            event_type: ActiveValue::Set(param.event_type),
            occurred_at: ActiveValue::Set(param.occurred_at),
            payload: ActiveValue::Set(param.payload),
            client_event_id: ActiveValue::Set(param.client_event_id),
            source: ActiveValue::Set(param.source),
            sphere: ActiveValue::Set(param.sphere),
            goal_id: ActiveValue::Set(param.goal_id),
            step_id: ActiveValue::Set(param.step_id),
            subtask_id: ActiveValue::Set(param.subtask_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    /// Finds the event a user already submitted with this client event ID.
    pub async fn find_by_client_event_id(
        &self,
        user_id: i32,
        client_event_id: &str,
    ) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find()
            .filter(entity::event::Column::UserId.eq(user_id))
            .filter(entity::event::Column::ClientEventId.eq(client_event_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Event::from_entity))
    }

    /// Lists a user's events matching the filter, newest first.
    pub async fn list(&self, user_id: i32, filter: EventFilter) -> Result<Vec<Event>, DbErr> {
        let mut query =
            entity::prelude::Event::find().filter(entity::event::Column::UserId.eq(user_id));

        if let Some(event_type) = filter.event_type {
            query = query.filter(entity::event::Column::EventType.eq(event_type));
        }
        if let Some(sphere) = filter.sphere {
            query = query.filter(entity::event::Column::Sphere.eq(sphere));
        }
        if let Some(goal_id) = filter.goal_id {
            query = query.filter(entity::event::Column::GoalId.eq(goal_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(entity::event::Column::OccurredAt.gte(from));
        }
        if let Some(until) = filter.until {
            query = query.filter(entity::event::Column::OccurredAt.lt(until));
        }

        let entities = query
            .order_by_desc(entity::event::Column::OccurredAt)
            .order_by_desc(entity::event::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    /// Gets a user's events of the given types that occurred at or after `since`,
    /// oldest first.
    pub async fn get_by_types_since(
        &self,
        user_id: i32,
        event_types: &[&str],
        since: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::UserId.eq(user_id))
            .filter(entity::event::Column::EventType.is_in(event_types.iter().copied()))
            .filter(entity::event::Column::OccurredAt.gte(since))
            .order_by_asc(entity::event::Column::OccurredAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }
}
