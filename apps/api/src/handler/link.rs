//! # リンクハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /trips/{trip_id}/links` - リンク一覧
//! - `POST /trips/{trip_id}/links` - リンク作成

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use planner_domain::{
    link::{Link, NewLink},
    trip::TripId,
};
use planner_shared::ApiResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::ApiError,
    handler::{parse_id, validated_body},
    usecase::LinkUseCaseImpl,
};

/// リンク API の共有状態
pub struct LinkState {
    pub usecase: LinkUseCaseImpl,
}

/// リンク作成リクエスト
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(url, length(max = 255))]
    pub url:   String,
}

/// リンク作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub link_id: Uuid,
}

/// リンク DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkDto {
    pub id:    Uuid,
    pub title: String,
    pub url:   String,
}

impl From<Link> for LinkDto {
    fn from(link: Link) -> Self {
        Self {
            id:    *link.id().as_uuid(),
            title: link.title().to_string(),
            url:   link.url().to_string(),
        }
    }
}

/// リンク一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LinksResponse {
    pub links: Vec<LinkDto>,
}

/// GET /trips/{trip_id}/links
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn list_links(
    State(state): State<Arc<LinkState>>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;

    let links = state.usecase.list_links(&id).await?;

    let response = ApiResponse::new(LinksResponse {
        links: links.into_iter().map(LinkDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// POST /trips/{trip_id}/links
///
/// ## レスポンス
///
/// - `201 Created`: `{ "data": { "link_id": ... } }`
/// - `400 Bad Request`: ID 不正 / JSON 不正 / タイトル空・URL 不正
/// - `404 Not Found`: 旅行が存在しない
#[tracing::instrument(skip_all, fields(%trip_id))]
pub async fn create_link(
    State(state): State<Arc<LinkState>>,
    Path(trip_id): Path<String>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&trip_id, TripId::parse)?;
    let req = validated_body(payload)?;

    let link_id = state
        .usecase
        .create_link(NewLink {
            trip_id: id,
            title:   req.title,
            url:     req.url,
        })
        .await?;

    let response = ApiResponse::new(CreateLinkResponse {
        link_id: *link_id.as_uuid(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}
