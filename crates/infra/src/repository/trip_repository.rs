//! # TripRepository
//!
//! 旅行と、旅行作成時に登録される招待参加者の永続化を担当する。
//!
//! 旅行の作成は「旅行 1 行 + 招待メールごとの参加者行」を
//! 1 トランザクションで挿入する。途中で失敗した場合は何も残らない。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use planner_domain::{
    participant::{Participant, ParticipantId},
    trip::{NewTrip, Trip, TripId, TripRecord},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 旅行リポジトリトレイト
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// 旅行と招待参加者を挿入し、採番された旅行 ID を返す
    async fn insert(&self, trip: &NewTrip) -> Result<TripId, InfraError>;

    /// ID で旅行を検索する
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError>;

    /// 行き先・日程・確認フラグを更新する
    async fn update(&self, trip: &Trip) -> Result<(), InfraError>;

    /// 旅行の参加者一覧を取得する
    async fn find_participants(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id:           Uuid,
    destination:  String,
    owner_email:  String,
    owner_name:   String,
    is_confirmed: bool,
    starts_at:    DateTime<Utc>,
    ends_at:      DateTime<Utc>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip::from_db(TripRecord {
            id:           TripId::from_uuid(row.id),
            destination:  row.destination,
            owner_email:  row.owner_email,
            owner_name:   row.owner_name,
            is_confirmed: row.is_confirmed,
            starts_at:    row.starts_at,
            ends_at:      row.ends_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TripParticipantRow {
    id:           Uuid,
    email:        String,
    is_confirmed: bool,
}

/// PostgreSQL 実装の TripRepository
#[derive(Debug, Clone)]
pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(destination = trip.destination(), invites = trip.emails_to_invite().len())
    )]
    async fn insert(&self, trip: &NewTrip) -> Result<TripId, InfraError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO trips (destination, owner_email, owner_name, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(trip.destination())
        .bind(trip.owner_email())
        .bind(trip.owner_name())
        .bind(trip.starts_at())
        .bind(trip.ends_at())
        .fetch_one(&mut *tx)
        .await?;

        if !trip.emails_to_invite().is_empty() {
            sqlx::query(
                r#"
                INSERT INTO participants (trip_id, email)
                SELECT $1, email FROM UNNEST($2::text[]) AS t(email)
                "#,
            )
            .bind(id)
            .bind(trip.emails_to_invite())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(TripId::from_uuid(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, destination, owner_email, owner_name, is_confirmed, starts_at, ends_at
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Trip::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %trip.id()))]
    async fn update(&self, trip: &Trip) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE trips
            SET destination = $1, starts_at = $2, ends_at = $3, is_confirmed = $4
            WHERE id = $5
            "#,
        )
        .bind(trip.destination())
        .bind(trip.starts_at())
        .bind(trip.ends_at())
        .bind(trip.is_confirmed())
        .bind(trip.id().as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_participants(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError> {
        let rows = sqlx::query_as::<_, TripParticipantRow>(
            r#"
            SELECT id, email, is_confirmed
            FROM participants
            WHERE trip_id = $1
            ORDER BY email
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let participants = rows
            .into_iter()
            .map(|row| {
                Participant::from_db(
                    ParticipantId::from_uuid(row.id),
                    trip_id.clone(),
                    row.email,
                    row.is_confirmed,
                )
            })
            .collect();

        Ok(participants)
    }
}
