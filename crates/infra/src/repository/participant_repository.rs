//! # ParticipantRepository
//!
//! 参加者の参照と確認状態の更新を担当する。
//!
//! 確認は `is_confirmed = false` の行だけを更新する条件付き UPDATE で行う。
//! 同じ参加者への確認が同時に届いても、成功するのは 1 件だけになる。

use async_trait::async_trait;
use planner_domain::{
    participant::{Participant, ParticipantId},
    trip::TripId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 参加者リポジトリトレイト
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// ID で参加者を検索する
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError>;

    /// 未確認の参加者を確認済みにする
    ///
    /// 対象行が存在しないか、すでに確認済みの場合は
    /// [`InfraError::conflict`] を返す。
    async fn confirm(&self, id: &ParticipantId) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    id:           Uuid,
    trip_id:      Uuid,
    email:        String,
    is_confirmed: bool,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Participant::from_db(
            ParticipantId::from_uuid(row.id),
            TripId::from_uuid(row.trip_id),
            row.email,
            row.is_confirmed,
        )
    }
}

/// PostgreSQL 実装の ParticipantRepository
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT id, trip_id, email, is_confirmed
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Participant::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn confirm(&self, id: &ParticipantId) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE participants
            SET is_confirmed = true
            WHERE id = $1 AND is_confirmed = false
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::conflict("Participant", id.to_string()));
        }

        Ok(())
    }
}
