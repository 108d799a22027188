//! # 旅行ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /trips` - 旅行作成（招待者を参加者として登録）
//! - `GET /trips/{trip_id}` - 旅行詳細
//! - `PUT /trips/{trip_id}` - 行き先・日程の変更
//! - `GET /trips/{trip_id}/participants` - 参加者一覧
//! - `GET /trips/{trip_id}/confirm` - 未実装
//! - `POST /trips/{trip_id}/invites` - 未実装

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use planner_domain::{
    participant::Participant,
    trip::{NewTrip, Trip, TripId},
};
use planner_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::{
    error::ApiError,
    handler::{parse_id, validated_body},
    usecase::{TripUseCaseImpl, trip::UpdateTripInput},
};

/// 旅行 API の共有状態
pub struct TripState {
    pub usecase: TripUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 旅行作成リクエスト
///
/// 文字列の欠落は空文字、日時の欠落は `None` として受け取り、
/// どちらも検証エラー（`invalid input`）にする。
/// 文字列の上限 255 文字は `VARCHAR(255)` 列に合わせている。
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[serde(default)]
    #[validate(length(min = 4, max = 255))]
    pub destination:      String,
    #[validate(required)]
    pub starts_at:        Option<DateTime<Utc>>,
    #[validate(required)]
    pub ends_at:          Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(custom(function = "validate_invite_emails"))]
    pub emails_to_invite: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub owner_name:       String,
    #[serde(default)]
    #[validate(email, length(max = 255))]
    pub owner_email:      String,
}

/// 旅行更新リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[serde(default)]
    #[validate(length(min = 4, max = 255))]
    pub destination: String,
    #[validate(required)]
    pub starts_at:   Option<DateTime<Utc>>,
    #[validate(required)]
    pub ends_at:     Option<DateTime<Utc>>,
}

/// 参加者テーブルの `email` 列の上限
const MAX_EMAIL_LENGTH: usize = 255;

fn validate_invite_emails(emails: &[String]) -> Result<(), ValidationError> {
    if emails
        .iter()
        .all(|email| email.chars().count() <= MAX_EMAIL_LENGTH && email.validate_email())
    {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// 検証済みの日程を取り出す
fn required_schedule(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    match (starts_at, ends_at) {
        (Some(starts_at), Some(ends_at)) => Ok((starts_at, ends_at)),
        _ => Err(ApiError::invalid_input()),
    }
}

/// 旅行作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTripResponse {
    pub trip_id: Uuid,
}

/// 旅行 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TripDto {
    pub id:           Uuid,
    pub destination:  String,
    pub starts_at:    DateTime<Utc>,
    pub ends_at:      DateTime<Utc>,
    pub is_confirmed: bool,
}

impl From<Trip> for TripDto {
    fn from(trip: Trip) -> Self {
        Self {
            id:           *trip.id().as_uuid(),
            destination:  trip.destination().to_string(),
            starts_at:    trip.starts_at(),
            ends_at:      trip.ends_at(),
            is_confirmed: trip.is_confirmed(),
        }
    }
}

/// 旅行詳細レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct GetTripResponse {
    pub trip: TripDto,
}

/// 参加者 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDto {
    pub id:           Uuid,
    pub email:        String,
    pub is_confirmed: bool,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            id:           *participant.id().as_uuid(),
            email:        participant.email().to_string(),
            is_confirmed: participant.is_confirmed(),
        }
    }
}

/// 参加者一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<ParticipantDto>,
}

// --- ハンドラ ---

/// POST /trips
///
/// ## レスポンス
///
/// - `201 Created`: `{ "data": { "trip_id": ... } }`
/// - `400 Bad Request`: JSON 不正 / 入力値不正（何も登録しない）
#[tracing::instrument(skip_all)]
pub async fn create_trip(
    State(state): State<Arc<TripState>>,
    payload: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = validated_body(payload)?;
    let (starts_at, ends_at) = required_schedule(req.starts_at, req.ends_at)?;

    let new_trip = NewTrip::new(
        req.destination,
        req.owner_email,
        req.owner_name,
        starts_at,
        ends_at,
        req.emails_to_invite,
    )?;

    let trip_id = state.usecase.create_trip(new_trip).await?;

    let response = ApiResponse::new(CreateTripResponse {
        trip_id: *trip_id.as_uuid(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /trips/{trip_id}
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn get_trip(
    State(state): State<Arc<TripState>>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;

    let trip = state.usecase.get_trip(&id).await?;

    let response = ApiResponse::new(GetTripResponse {
        trip: TripDto::from(trip),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /trips/{trip_id}
///
/// 行き先と日程を変更する。確認フラグは変更しない。
///
/// ## レスポンス
///
/// - `204 No Content`: 更新成功
/// - `400 Bad Request`: ID 不正 / JSON 不正 / 入力値不正
/// - `404 Not Found`: 旅行が存在しない
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn update_trip(
    State(state): State<Arc<TripState>>,
    Path(trip_id): Path<String>,
    payload: Result<Json<UpdateTripRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;
    let req = validated_body(payload)?;
    let (starts_at, ends_at) = required_schedule(req.starts_at, req.ends_at)?;

    state
        .usecase
        .update_trip(UpdateTripInput {
            trip_id: id,
            destination: req.destination,
            starts_at,
            ends_at,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /trips/{trip_id}/participants
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn list_participants(
    State(state): State<Arc<TripState>>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;

    let participants = state.usecase.list_participants(&id).await?;

    let response = ApiResponse::new(ParticipantsResponse {
        participants: participants.into_iter().map(ParticipantDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// GET /trips/{trip_id}/confirm
///
/// 旅行確定とメール送信の仕様が決まっていないため未実装。
/// パニックは `CatchPanicLayer` が 500 に変換する。
pub async fn confirm_trip(Path(_trip_id): Path<String>) -> StatusCode {
    unimplemented!("旅行の確定は未実装")
}

/// POST /trips/{trip_id}/invites
///
/// 招待の仕様が決まっていないため未実装。
pub async fn invite_to_trip(Path(_trip_id): Path<String>) -> StatusCode {
    unimplemented!("参加者の追加招待は未実装")
}
