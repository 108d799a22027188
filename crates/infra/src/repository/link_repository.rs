//! # LinkRepository
//!
//! 旅行に紐づく参考リンクの永続化を担当する。

use async_trait::async_trait;
use planner_domain::{
    link::{Link, LinkId, NewLink},
    trip::TripId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// リンクリポジトリトレイト
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// リンクを挿入し、採番された ID を返す
    async fn insert(&self, link: &NewLink) -> Result<LinkId, InfraError>;

    /// 旅行のリンク一覧を取得する
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id:      Uuid,
    trip_id: Uuid,
    title:   String,
    url:     String,
}

/// PostgreSQL 実装の LinkRepository
#[derive(Debug, Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(trip_id = %link.trip_id))]
    async fn insert(&self, link: &NewLink) -> Result<LinkId, InfraError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO links (trip_id, title, url)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(link.trip_id.as_uuid())
        .bind(&link.title)
        .bind(&link.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(LinkId::from_uuid(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%trip_id))]
    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, trip_id, title, url
            FROM links
            WHERE trip_id = $1
            ORDER BY title
            "#,
        )
        .bind(trip_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let links = rows
            .into_iter()
            .map(|row| {
                Link::from_db(
                    LinkId::from_uuid(row.id),
                    TripId::from_uuid(row.trip_id),
                    row.title,
                    row.url,
                )
            })
            .collect();

        Ok(links)
    }
}
