//! ParticipantRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p planner-infra --test participant_repository_test -- --ignored
//! ```

mod common;

use common::insert_trip;
use planner_domain::participant::ParticipantId;
use planner_infra::repository::{
    ParticipantRepository,
    PostgresParticipantRepository,
    PostgresTripRepository,
    TripRepository,
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

async fn first_participant_id(pool: &PgPool) -> ParticipantId {
    let trip_id = insert_trip(pool, &["guest@example.com"]).await;
    let participants = PostgresTripRepository::new(pool.clone())
        .find_participants(&trip_id)
        .await
        .unwrap();
    participants[0].id().clone()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要（DATABASE_URL）"]
async fn test_find_by_idで参加者を取得できる(pool: PgPool) {
    let id = first_participant_id(&pool).await;
    let sut = PostgresParticipantRepository::new(pool);

    let participant = sut.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(participant.email(), "guest@example.com");
    assert!(!participant.is_confirmed());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要（DATABASE_URL）"]
async fn test_find_by_id_存在しないidはnoneを返す(pool: PgPool) {
    let sut = PostgresParticipantRepository::new(pool);

    let result = sut.find_by_id(&ParticipantId::new()).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要（DATABASE_URL）"]
async fn test_confirmで確認済みになる(pool: PgPool) {
    let id = first_participant_id(&pool).await;
    let sut = PostgresParticipantRepository::new(pool);

    sut.confirm(&id).await.unwrap();

    let participant = sut.find_by_id(&id).await.unwrap().unwrap();
    assert!(participant.is_confirmed());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要（DATABASE_URL）"]
async fn test_confirm_確認済みの参加者は競合になる(pool: PgPool) {
    let id = first_participant_id(&pool).await;
    let sut = PostgresParticipantRepository::new(pool);
    sut.confirm(&id).await.unwrap();

    let result = sut.confirm(&id).await;

    assert!(result.unwrap_err().is_conflict());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要（DATABASE_URL）"]
async fn test_confirm_同時実行でも成功は1件だけ(pool: PgPool) {
    let id = first_participant_id(&pool).await;
    let sut = PostgresParticipantRepository::new(pool);

    let (a, b) = tokio::join!(sut.confirm(&id), sut.confirm(&id));

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);
}
