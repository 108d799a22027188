//! # アクティビティハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /trips/{trip_id}/activities` - アクティビティ一覧（発生日時順）
//! - `POST /trips/{trip_id}/activities` - アクティビティ作成

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use planner_domain::{
    activity::{Activity, NewActivity},
    trip::TripId,
};
use planner_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::ApiError,
    handler::{parse_id, validated_body},
    usecase::ActivityUseCaseImpl,
};

/// アクティビティ API の共有状態
pub struct ActivityState {
    pub usecase: ActivityUseCaseImpl,
}

/// アクティビティ作成リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub title:     String,
    #[validate(required)]
    pub occurs_at: Option<DateTime<Utc>>,
}

/// アクティビティ作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateActivityResponse {
    pub activity_id: Uuid,
}

/// アクティビティ DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityDto {
    pub id:        Uuid,
    pub title:     String,
    pub occurs_at: DateTime<Utc>,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            id:        *activity.id().as_uuid(),
            title:     activity.title().to_string(),
            occurs_at: activity.occurs_at(),
        }
    }
}

/// アクティビティ一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityDto>,
}

/// GET /trips/{trip_id}/activities
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn list_activities(
    State(state): State<Arc<ActivityState>>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;

    let activities = state.usecase.list_activities(&id).await?;

    let response = ApiResponse::new(ActivitiesResponse {
        activities: activities.into_iter().map(ActivityDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// POST /trips/{trip_id}/activities
///
/// ## レスポンス
///
/// - `201 Created`: `{ "data": { "activity_id": ... } }`
/// - `400 Bad Request`: ID 不正 / JSON 不正 / 入力値不正
/// - `404 Not Found`: 旅行が存在しない
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn create_activity(
    State(state): State<Arc<ActivityState>>,
    Path(trip_id): Path<String>,
    payload: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;
    let req = validated_body(payload)?;
    let occurs_at = req.occurs_at.ok_or_else(ApiError::invalid_input)?;

    let activity_id = state
        .usecase
        .create_activity(NewActivity {
            trip_id: id,
            title: req.title,
            occurs_at,
        })
        .await?;

    let response = ApiResponse::new(CreateActivityResponse {
        activity_id: *activity_id.as_uuid(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::Method, routing::get};
    use chrono::Duration;
    use planner_domain::trip::{Trip, TripRecord};
    use planner_infra::mock::{MockActivityRepository, MockTripRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::handler::test_support::{empty_request, error_detail, json_request, response_body};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_test_app() -> (Router, TripId) {
        let trips = MockTripRepository::new();
        let trip_id = TripId::new();
        trips.add_trip(Trip::from_db(TripRecord {
            id:           trip_id.clone(),
            destination:  "Lisbon".to_string(),
            owner_email:  "owner@example.com".to_string(),
            owner_name:   "Owner".to_string(),
            is_confirmed: false,
            starts_at:    now(),
            ends_at:      now() + Duration::days(3),
        }));
        let state = Arc::new(ActivityState {
            usecase: ActivityUseCaseImpl::new(
                Arc::new(trips),
                Arc::new(MockActivityRepository::new()),
            ),
        });

        let router = Router::new()
            .route(
                "/trips/{trip_id}/activities",
                get(list_activities).post(create_activity),
            )
            .with_state(state);
        (router, trip_id)
    }

    #[tokio::test]
    async fn test_post_作成したアクティビティが発生日時順で一覧に返る() {
        // Given
        let (sut, trip_id) = create_test_app();
        let uri = format!("/trips/{trip_id}/activities");
        for (title, occurs_at) in [
            ("Dinner", "2023-11-15T20:00:00Z"),
            ("Breakfast", "2023-11-15T08:00:00Z"),
        ] {
            let response = sut
                .clone()
                .oneshot(json_request(
                    Method::POST,
                    &uri,
                    json!({ "title": title, "occurs_at": occurs_at }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            let body: ApiResponse<CreateActivityResponse> = response_body(response).await;
            assert!(!body.data.activity_id.is_nil());
        }

        // When
        let response = sut.oneshot(empty_request(Method::GET, &uri)).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<ActivitiesResponse> = response_body(response).await;
        let titles: Vec<&str> = body
            .data
            .activities
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Breakfast", "Dinner"]);
    }

    #[rstest]
    #[case::empty_title(String::new())]
    #[case::too_long_title("t".repeat(256))]
    #[tokio::test]
    async fn test_post_タイトルが不正なら400で登録しない(#[case] title: String) {
        // Given
        let (sut, trip_id) = create_test_app();
        let uri = format!("/trips/{trip_id}/activities");

        // When
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::POST,
                &uri,
                json!({ "title": title, "occurs_at": "2023-11-15T20:00:00Z" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_detail(response).await, "invalid input");
        let response = sut.oneshot(empty_request(Method::GET, &uri)).await.unwrap();
        let body: ApiResponse<ActivitiesResponse> = response_body(response).await;
        assert!(body.data.activities.is_empty());
    }

    #[tokio::test]
    async fn test_get_存在しない旅行は404() {
        let (sut, _) = create_test_app();

        let response = sut
            .oneshot(empty_request(
                Method::GET,
                &format!("/trips/{}/activities", TripId::new()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_detail(response).await, "trip not found");
    }
}
