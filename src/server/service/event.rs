use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::event::CreateEventDto,
    server::{
        data::event::EventRepository,
        error::AppError,
        model::event::{CreateEventParam, Event, EventFilter, RecordedEvent},
    },
};

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a client submitted event.
    ///
    /// A repeated `client_event_id` for the same user returns the stored event with
    /// `duplicate` set instead of inserting a second row.
    ///
    /// # Returns
    /// - `Ok(RecordedEvent)` - ID of the new or already stored event
    /// - `Err(AppError::BadRequest)` - Validation failed
    pub async fn add(&self, user_id: i32, dto: CreateEventDto) -> Result<RecordedEvent, AppError> {
        let param = CreateEventParam::from_dto(user_id, dto, Utc::now())?;
        self.record(param).await
    }

    pub async fn record(&self, param: CreateEventParam) -> Result<RecordedEvent, AppError> {
        let repo = EventRepository::new(self.db);

        let client_event_id = param.client_event_id.clone();
        if let Some(client_id) = &client_event_id {
            if let Some(existing) = repo.find_by_client_event_id(param.user_id, client_id).await? {
                return Ok(RecordedEvent {
                    id: existing.id,
                    duplicate: true,
                });
            }
        }

        let user_id = param.user_id;
        match repo.create(param).await {
            Ok(event) => Ok(RecordedEvent {
                id: event.id,
                duplicate: false,
            }),
            Err(err) => {
                // A concurrent submission with the same client id wins the unique index.
                if let Some(client_id) = &client_event_id {
                    if let Some(existing) = repo.find_by_client_event_id(user_id, client_id).await? {
                        return Ok(RecordedEvent {
                            id: existing.id,
                            duplicate: true,
                        });
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Records a server side event, logging instead of failing the calling operation.
    pub async fn track(&self, param: CreateEventParam) {
        let event_type = param.event_type.clone();
        let user_id = param.user_id;
        if let Err(e) = self.record(param).await {
            tracing::error!("Failed to record {} event for user {}: {}", event_type, user_id, e);
        }
    }

    pub async fn list(&self, user_id: i32, filter: EventFilter) -> Result<Vec<Event>, AppError> {
        let events = EventRepository::new(self.db).list(user_id, filter).await?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::EventQueryDto;
    use entity::prelude::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests idempotent submission by client event id.
    ///
    /// Expected: second submission is flagged duplicate with the same id and only one row exists
    #[tokio::test]
    async fn deduplicates_client_event_id() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Event)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;

        let dto = CreateEventDto {
            event_type: "open_dashboard".to_string(),
            client_event_id: Some("abc-1".to_string()),
            ..Default::default()
        };

        let service = EventService::new(db);
        let first = service.add(user.id, dto.clone()).await?;
        let second = service.add(user.id, dto).await?;

        assert!(!first.duplicate);
        assert!(second.duplicate);
        assert_eq!(first.id, second.id);

        let events = service
            .list(user.id, EventFilter::from_dto(EventQueryDto::default()))
            .await?;
        assert_eq!(events.len(), 1);

        Ok(())
    }

    /// Tests that invalid submissions are rejected before insert.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn rejects_unknown_source() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Event)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;

        let dto = CreateEventDto {
            event_type: "open_dashboard".to_string(),
            source: Some("fax".to_string()),
            ..Default::default()
        };

        let result = EventService::new(db).add(user.id, dto).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }
}
