use std::sync::Arc;

use serde_json::json;
use test_utils::{builder::TestBuilder, fixture};

use super::reserve_param;
use crate::{
    data::participant::ParticipantRepository,
    error::AppError,
    notifier::EventBroadcaster,
    service::raffle::RaffleService,
    sheets::RemoteMirror,
    test_support::{FailingMirror, StaticMirror},
};

#[tokio::test]
async fn reserves_and_pads_the_number() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    let mut param = reserve_param(1);
    param.number = json!(42);

    let participant = service.reserve(param).await.unwrap();

    assert_eq!(participant.raffle_number, "0042");
    assert!(participant.accepted_rules);
}

#[tokio::test]
async fn canonicalizes_cpf_phone_and_trims_name() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    let mut param = reserve_param(1);
    param.full_name = "  Maria da Silva  ".to_string();
    param.cpf = "529.982.247-25".to_string();
    param.phone = "(11) 98765-4321".to_string();

    let participant = service.reserve(param).await.unwrap();

    assert_eq!(participant.full_name, "Maria da Silva");
    assert_eq!(participant.cpf, "52998224725");
    assert_eq!(participant.phone, "11987654321");
}

#[tokio::test]
async fn accumulates_every_validation_error() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    let mut param = reserve_param(1);
    param.full_name = "X".to_string();
    param.cpf = "12345678900".to_string();
    param.phone = "123".to_string();
    param.email = "not-an-email".to_string();
    param.store = "A".to_string();
    param.number = json!("99999");
    param.accepted = Some(json!(false));

    let err = service.reserve(param).await.unwrap_err();

    let AppError::Validation(messages) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(messages.len(), 7);
    assert!(messages.contains(&"Número da rifa inválido.".to_string()));

    let repo = ParticipantRepository::new(db);
    assert!(repo.get_all_newest_first().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejects_a_locally_taken_number() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    service.reserve(reserve_param(1)).await.unwrap();

    let mut second = reserve_param(2);
    second.number = json!("0001");
    let err = service.reserve(second).await.unwrap_err();

    let AppError::Conflict(message) = err else {
        panic!("expected a conflict");
    };
    assert_eq!(message, "Número já reservado.");

    let repo = ParticipantRepository::new(db);
    assert_eq!(repo.get_all_newest_first().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejects_an_already_registered_cpf() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    let first = reserve_param(1);
    let cpf = first.cpf.clone();
    service.reserve(first).await.unwrap();

    let mut second = reserve_param(2);
    second.cpf = cpf;
    let err = service.reserve(second).await.unwrap_err();

    let AppError::Conflict(message) = err else {
        panic!("expected a conflict");
    };
    assert_eq!(message, "CPF já cadastrado.");
}

#[tokio::test]
async fn grants_a_number_to_exactly_one_of_two_racing_requests() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let events = EventBroadcaster::new();
    let first_service = RaffleService::new(db, None, events.clone());
    let second_service = RaffleService::new(db, None, events);

    let mut first = reserve_param(1);
    let mut second = reserve_param(2);
    first.number = json!("0500");
    second.number = json!("0500");

    let (left, right) = tokio::join!(first_service.reserve(first), second_service.reserve(second));

    assert_eq!(
        [left.is_ok(), right.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );

    let repo = ParticipantRepository::new(db);
    assert_eq!(repo.get_all_newest_first().await.unwrap().len(), 1);
}

#[tokio::test]
async fn mirror_failure_does_not_block_the_reservation() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let mirror: Arc<dyn RemoteMirror> = Arc::new(FailingMirror);
    let service = RaffleService::new(db, Some(mirror), EventBroadcaster::new());

    let participant = service.reserve(reserve_param(1)).await.unwrap();
    assert_eq!(participant.raffle_number, "0001");
}

#[tokio::test]
async fn rejects_a_number_already_present_in_the_mirror() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let mirror: Arc<dyn RemoteMirror> = Arc::new(StaticMirror::with_numbers(["0001"]));
    let service = RaffleService::new(db, Some(mirror), EventBroadcaster::new());

    let err = service.reserve(reserve_param(1)).await.unwrap_err();

    let AppError::Conflict(message) = err else {
        panic!("expected a conflict");
    };
    assert_eq!(message, "Número já reservado.");
}

#[tokio::test]
async fn rejects_a_cpf_already_present_in_the_mirror() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();

    let param = reserve_param(1);
    let mirror: Arc<dyn RemoteMirror> =
        Arc::new(StaticMirror::with_cpfs([param.cpf.clone()]));
    let service = RaffleService::new(db, Some(mirror), EventBroadcaster::new());

    let err = service.reserve(param).await.unwrap_err();

    let AppError::Conflict(message) = err else {
        panic!("expected a conflict");
    };
    assert_eq!(message, "CPF já cadastrado.");
}

#[tokio::test]
async fn broadcasts_the_committed_participant() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let events = EventBroadcaster::new();
    let mut receiver = events.subscribe();
    let service = RaffleService::new(db, None, events.clone());

    let participant = service.reserve(reserve_param(1)).await.unwrap();

    let event = receiver.try_recv().unwrap();
    assert_eq!(event.participant.id, participant.id);
    assert_eq!(event.participant.raffle_number, "0001");
}

#[tokio::test]
async fn appends_to_the_mirror_after_the_commit() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let mirror = Arc::new(StaticMirror::empty());
    let service = RaffleService::new(
        db,
        Some(mirror.clone() as Arc<dyn RemoteMirror>),
        EventBroadcaster::new(),
    );

    let participant = service.reserve(reserve_param(1)).await.unwrap();

    // The append runs on a detached task; wait for it to land.
    let repo = ParticipantRepository::new(db);
    for _ in 0..50 {
        if repo.get_unsynced_batch(10).await.unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let appended = mirror.appended.lock().await;
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].number, participant.raffle_number);
    assert_eq!(appended[0].cpf, participant.cpf);
    drop(appended);

    assert!(repo.get_unsynced_batch(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn accepts_lenient_acceptance_forms() {
    let context = TestBuilder::new()
        .with_participant_table()
        .build()
        .await
        .unwrap();
    let db = context.db.as_ref().unwrap();
    let service = RaffleService::new(db, None, EventBroadcaster::new());

    for (index, accepted) in [json!("true"), json!(1), json!("1"), json!("on")]
        .into_iter()
        .enumerate()
    {
        let mut param = reserve_param(index as u32 + 1);
        param.accepted = Some(accepted);
        param.cpf = fixture::participant::valid_cpf(&format!("98765{index:04}"));
        service.reserve(param).await.unwrap();
    }
}
