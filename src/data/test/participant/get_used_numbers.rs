use test_utils::builder::TestBuilder;

use super::param;
use crate::data::participant::ParticipantRepository;

#[tokio::test]
async fn returns_every_reserved_number() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    repo.create(param(7)).await.unwrap();
    repo.create(param(42)).await.unwrap();

    let mut used = repo.get_used_numbers().await.unwrap();
    used.sort();
    assert_eq!(used, vec!["0007".to_string(), "0042".to_string()]);
}

#[tokio::test]
async fn returns_empty_when_nothing_is_reserved() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    assert!(repo.get_used_numbers().await.unwrap().is_empty());
}
