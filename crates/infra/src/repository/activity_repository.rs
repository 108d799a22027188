//! # ActivityRepository
//!
//! 旅行のアクティビティの永続化を担当する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use planner_domain::{
    activity::{Activity, ActivityId, NewActivity},
    trip::TripId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// アクティビティリポジトリトレイト
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// アクティビティを挿入し、採番された ID を返す
    async fn insert(&self, activity: &NewActivity) -> Result<ActivityId, InfraError>;

    /// 旅行のアクティビティを発生日時の昇順で取得する
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id:        Uuid,
    trip_id:   Uuid,
    title:     String,
    occurs_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity::from_db(
            ActivityId::from_uuid(row.id),
            TripId::from_uuid(row.trip_id),
            row.title,
            row.occurs_at,
        )
    }
}

/// PostgreSQL 実装の ActivityRepository
#[derive(Debug, Clone)]
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(trip_id = %activity.trip_id))]
    async fn insert(&self, activity: &NewActivity) -> Result<ActivityId, InfraError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO activities (trip_id, title, occurs_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(activity.trip_id.as_uuid())
        .bind(&activity.title)
        .bind(activity.occurs_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(ActivityId::from_uuid(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, InfraError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, trip_id, title, occurs_at
            FROM activities
            WHERE trip_id = $1
            ORDER BY occurs_at ASC
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Activity::from).collect())
    }
}
