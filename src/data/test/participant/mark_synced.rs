use test_utils::builder::TestBuilder;

use super::param;
use crate::data::participant::ParticipantRepository;

#[tokio::test]
async fn sets_sync_marker_on_listed_rows_only() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    let marked = repo.create(param(1)).await.unwrap();
    let untouched = repo.create(param(2)).await.unwrap();

    let synced_at = chrono::Utc::now();
    repo.mark_synced(&[marked.id], synced_at).await.unwrap();

    let batch = repo.get_unsynced_batch(10).await.unwrap();
    let ids: Vec<i32> = batch.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![untouched.id]);
}

#[tokio::test]
async fn empty_id_list_is_a_no_op() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    repo.create(param(1)).await.unwrap();
    repo.mark_synced(&[], chrono::Utc::now()).await.unwrap();

    assert_eq!(repo.get_unsynced_batch(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn marking_twice_is_idempotent() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let repo = ParticipantRepository::new(context.db.as_ref().unwrap());

    let created = repo.create(param(1)).await.unwrap();
    repo.mark_synced(&[created.id], chrono::Utc::now())
        .await
        .unwrap();
    repo.mark_synced(&[created.id], chrono::Utc::now())
        .await
        .unwrap();

    assert!(repo.get_unsynced_batch(10).await.unwrap().is_empty());
}
