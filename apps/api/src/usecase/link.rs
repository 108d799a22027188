//! リンクユースケース

use std::sync::Arc;

use planner_domain::{
    link::{Link, LinkId, NewLink},
    trip::TripId,
};
use planner_infra::repository::{LinkRepository, TripRepository};

use crate::{error::ApiError, usecase::trip::trip_not_found};

/// リンクユースケース
pub struct LinkUseCaseImpl {
    trip_repository: Arc<dyn TripRepository>,
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkUseCaseImpl {
    pub fn new(
        trip_repository: Arc<dyn TripRepository>,
        link_repository: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            trip_repository,
            link_repository,
        }
    }

    async fn ensure_trip_exists(&self, trip_id: &TripId) -> Result<(), ApiError> {
        self.trip_repository
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| trip_not_found(trip_id))?;
        Ok(())
    }

    /// リンクを作成する
    pub async fn create_link(&self, link: NewLink) -> Result<LinkId, ApiError> {
        self.ensure_trip_exists(&link.trip_id).await?;
        let id = self.link_repository.insert(&link).await?;
        Ok(id)
    }

    /// 旅行のリンク一覧を取得する
    pub async fn list_links(&self, trip_id: &TripId) -> Result<Vec<Link>, ApiError> {
        self.ensure_trip_exists(trip_id).await?;
        let links = self.link_repository.find_by_trip(trip_id).await?;
        Ok(links)
    }
}
