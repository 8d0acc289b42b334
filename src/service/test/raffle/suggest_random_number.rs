use std::sync::Arc;

use test_utils::builder::TestBuilder;

use super::reserve_param;
use crate::{
    notifier::EventBroadcaster,
    service::raffle::RaffleService,
    sheets::RemoteMirror,
    test_support::StaticMirror,
};

#[tokio::test]
async fn never_suggests_a_locally_reserved_number() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    service.reserve(reserve_param(1)).await.unwrap();
    service.reserve(reserve_param(2)).await.unwrap();

    for _ in 0..20 {
        let number = service.suggest_random_number().await.unwrap().unwrap();
        assert_eq!(number.len(), 4);
        assert_ne!(number, "0001");
        assert_ne!(number, "0002");
    }
}

#[tokio::test]
async fn suggests_the_single_number_the_mirror_left_free() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();

    let mut mirror = StaticMirror::empty();
    mirror.numbers = (0..10000)
        .map(|number| format!("{number:04}"))
        .filter(|number| number != "1234")
        .collect();
    let mirror: Arc<dyn RemoteMirror> = Arc::new(mirror);
    let service = RaffleService::new(db, Some(mirror), EventBroadcaster::new());

    let number = service.suggest_random_number().await.unwrap();
    assert_eq!(number.as_deref(), Some("1234"));
}

#[tokio::test]
async fn returns_none_when_every_number_is_taken() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();

    let mut mirror = StaticMirror::empty();
    mirror.numbers = (0..10000).map(|number| format!("{number:04}")).collect();
    let mirror: Arc<dyn RemoteMirror> = Arc::new(mirror);
    let service = RaffleService::new(db, Some(mirror), EventBroadcaster::new());

    let number = service.suggest_random_number().await.unwrap();
    assert!(number.is_none());
}
