use test_utils::builder::TestBuilder;

use super::param;
use crate::data::participant::ParticipantRepository;

#[tokio::test]
async fn reports_reserved_number_as_taken() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    repo.create(param(1)).await.unwrap();

    assert!(repo.exists_by_number("0001").await.unwrap());
}

#[tokio::test]
async fn reports_free_number_as_available() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    repo.create(param(1)).await.unwrap();

    assert!(!repo.exists_by_number("0002").await.unwrap());
}
