//! アクティビティユースケース

use std::sync::Arc;

use planner_domain::{
    activity::{Activity, ActivityId, NewActivity},
    trip::TripId,
};
use planner_infra::repository::{ActivityRepository, TripRepository};

use crate::{error::ApiError, usecase::trip::trip_not_found};

/// アクティビティユースケース
pub struct ActivityUseCaseImpl {
    trip_repository:     Arc<dyn TripRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
}

impl ActivityUseCaseImpl {
    pub fn new(
        trip_repository: Arc<dyn TripRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            trip_repository,
            activity_repository,
        }
    }

    async fn ensure_trip_exists(&self, trip_id: &TripId) -> Result<(), ApiError> {
        self.trip_repository
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| trip_not_found(trip_id))?;
        Ok(())
    }

    /// アクティビティを作成する
    pub async fn create_activity(&self, activity: NewActivity) -> Result<ActivityId, ApiError> {
        self.ensure_trip_exists(&activity.trip_id).await?;
        let id = self.activity_repository.insert(&activity).await?;
        Ok(id)
    }

    /// 旅行のアクティビティを発生日時順に取得する
    pub async fn list_activities(&self, trip_id: &TripId) -> Result<Vec<Activity>, ApiError> {
        self.ensure_trip_exists(trip_id).await?;
        let activities = self.activity_repository.find_by_trip(trip_id).await?;
        Ok(activities)
    }
}
