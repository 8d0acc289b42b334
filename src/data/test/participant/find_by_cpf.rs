use test_utils::builder::TestBuilder;

use super::param;
use crate::data::participant::ParticipantRepository;

#[tokio::test]
async fn returns_participant_when_cpf_exists() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    let created = repo.create(param(1)).await.unwrap();

    let found = repo.find_by_cpf(&created.cpf).await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(created.id));
}

#[tokio::test]
async fn returns_none_for_unknown_cpf() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    repo.create(param(1)).await.unwrap();

    let found = repo.find_by_cpf("00000000000").await.unwrap();
    assert!(found.is_none());
}
