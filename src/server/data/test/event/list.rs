use super::*;

fn unfiltered() -> EventFilter {
    EventFilter {
        event_type: None,
        sphere: None,
        goal_id: None,
        from: None,
        until: None,
        limit: DEFAULT_LIST_LIMIT,
        offset: 0,
    }
}

/// Tests listing events newest first.
///
/// Verifies that only the caller's events are returned, ordered by occurrence time
/// descending.
///
/// Expected: Ok with the user's events newest first
#[tokio::test]
async fn lists_own_events_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    let older = factory::event::EventFactory::new(db, user.id, "open_dashboard")
        .occurred_at(now - Duration::hours(2))
        .build()
        .await?;
    let newer = factory::event::EventFactory::new(db, user.id, "view_insight")
        .occurred_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::event::EventFactory::new(db, other.id, "open_dashboard")
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let events = repo.list(user.id, unfiltered()).await?;

    let ids: Vec<i32> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests the time window and type filters.
///
/// Verifies that `from` is inclusive, `until` is exclusive and the type filter is
/// applied together with them.
///
/// Expected: Ok with the single event inside the window
#[tokio::test]
async fn applies_window_and_type_filters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let from = Utc::now() - Duration::days(2);
    let until = from + Duration::days(1);

    let inside = factory::event::EventFactory::new(db, user.id, "create_step")
        .occurred_at(from)
        .build()
        .await?;
    factory::event::EventFactory::new(db, user.id, "create_step")
        .occurred_at(until)
        .build()
        .await?;
    factory::event::EventFactory::new(db, user.id, "open_dashboard")
        .occurred_at(from + Duration::hours(1))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let events = repo
        .list(
            user.id,
            EventFilter {
                event_type: Some("create_step".to_string()),
                from: Some(from),
                until: Some(until),
                ..unfiltered()
            },
        )
        .await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, inside.id);

    Ok(())
}

/// Tests pagination with limit and offset.
///
/// Expected: Ok with the second newest event only
#[tokio::test]
async fn applies_limit_and_offset() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let mut created = Vec::new();
    for hours in 1..=3 {
        let event = factory::event::EventFactory::new(db, user.id, "open_dashboard")
            .occurred_at(now - Duration::hours(hours))
            .build()
            .await?;
        created.push(event);
    }

    let repo = EventRepository::new(db);
    let events = repo
        .list(
            user.id,
            EventFilter {
                limit: 1,
                offset: 1,
                ..unfiltered()
            },
        )
        .await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, created[1].id);

    Ok(())
}
