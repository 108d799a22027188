//! # API エラーハンドリング
//!
//! ハンドラ・ユースケースのエラー定義と、RFC 9457 Problem Details 形式の
//! レスポンスへの変換を行う。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError
//!        ↓ From
//! ApiError
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + ErrorResponse JSON)
//! ```
//!
//! クライアント向けの短いメッセージは `detail` に入る。
//! 500 系は内部情報を返さず、詳細はサーバーログにのみ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use planner_domain::DomainError;
use planner_infra::InfraError;
use planner_shared::ErrorResponse;
use thiserror::Error;

/// パスパラメータが UUID として解釈できない
pub const INVALID_UUID: &str = "invalid uuid";
/// リクエストボディが JSON として解釈できない
pub const INVALID_JSON: &str = "invalid JSON";
/// 宣言的バリデーション・日程の検証に失敗した
pub const INVALID_INPUT: &str = "invalid input";
/// 確認済みの参加者を再度確認しようとした
pub const PARTICIPANT_ALREADY_CONFIRMED: &str = "participant is already confirmed";

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト（400）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない（404）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベースエラー（500）
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl ApiError {
    pub fn invalid_uuid() -> Self {
        Self::BadRequest(INVALID_UUID.to_string())
    }

    pub fn invalid_json() -> Self {
        Self::BadRequest(INVALID_JSON.to_string())
    }

    pub fn invalid_input() -> Self {
        Self::BadRequest(INVALID_INPUT.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(reason) => {
                tracing::debug!(%reason, "ドメイン検証エラー");
                Self::invalid_input()
            }
            DomainError::NotFound { entity_type, .. } => {
                Self::NotFound(format!("{entity_type} not found"))
            }
            DomainError::AlreadyConfirmed => {
                Self::BadRequest(PARTICIPANT_ALREADY_CONFIRMED.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            ApiError::NotFound(detail) => ErrorResponse::not_found(detail),
            ApiError::Database(e) => {
                // SpanTrace にリポジトリ操作名と対象 ID が記録されている
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
