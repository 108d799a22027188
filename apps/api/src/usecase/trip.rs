//! 旅行ユースケース

use std::sync::Arc;

use chrono::{DateTime, Utc};
use planner_domain::{
    DomainError,
    participant::Participant,
    trip::{NewTrip, Trip, TripId},
};
use planner_infra::repository::TripRepository;

use crate::error::ApiError;

/// 旅行の行き先・日程変更の入力
pub struct UpdateTripInput {
    pub trip_id:     TripId,
    pub destination: String,
    pub starts_at:   DateTime<Utc>,
    pub ends_at:     DateTime<Utc>,
}

/// 旅行ユースケース
pub struct TripUseCaseImpl {
    trip_repository: Arc<dyn TripRepository>,
}

impl TripUseCaseImpl {
    pub fn new(trip_repository: Arc<dyn TripRepository>) -> Self {
        Self { trip_repository }
    }

    /// 旅行を作成する（招待者は未確認の参加者として同時に登録される）
    pub async fn create_trip(&self, new_trip: NewTrip) -> Result<TripId, ApiError> {
        let id = self.trip_repository.insert(&new_trip).await?;
        tracing::info!(trip_id = %id, invites = new_trip.emails_to_invite().len(), "旅行を作成しました");
        Ok(id)
    }

    /// 旅行を取得する
    pub async fn get_trip(&self, id: &TripId) -> Result<Trip, ApiError> {
        let trip = self
            .trip_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| trip_not_found(id))?;
        Ok(trip)
    }

    /// 行き先と日程を変更する（確認フラグは保持する）
    pub async fn update_trip(&self, input: UpdateTripInput) -> Result<(), ApiError> {
        let trip = self.get_trip(&input.trip_id).await?;
        let updated = trip.rescheduled(input.destination, input.starts_at, input.ends_at)?;
        self.trip_repository.update(&updated).await?;
        Ok(())
    }

    /// 旅行の参加者一覧を取得する
    pub async fn list_participants(&self, id: &TripId) -> Result<Vec<Participant>, ApiError> {
        self.get_trip(id).await?;
        let participants = self.trip_repository.find_participants(id).await?;
        Ok(participants)
    }
}

pub(crate) fn trip_not_found(id: &TripId) -> DomainError {
    DomainError::NotFound {
        entity_type: "trip",
        id:          id.to_string(),
    }
}
