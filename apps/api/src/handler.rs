//! # HTTP ハンドラ
//!
//! 各エンドポイントのリクエスト処理を実装する。
//!
//! ## 共通の入力処理
//!
//! - パスパラメータの ID は文字列で受け取り、UUID として解釈できなければ
//!   400 `invalid uuid`（ストアには問い合わせない）
//! - ボディは `Result<Json<T>, JsonRejection>` で受け取り、解釈できなければ
//!   400 `invalid JSON`
//! - `validator` の宣言的検証に失敗した場合は 400 `invalid input`

pub mod activity;
pub mod health;
pub mod link;
pub mod participant;
pub mod trip;

use axum::{Json, extract::rejection::JsonRejection};
use validator::Validate;

pub use activity::{ActivityState, create_activity, list_activities};
pub use health::{ReadinessState, health_check, readiness_check};
pub use link::{LinkState, create_link, list_links};
pub use participant::{ParticipantState, confirm_participant};
pub use trip::{
    TripState,
    confirm_trip,
    create_trip,
    get_trip,
    invite_to_trip,
    list_participants,
    update_trip,
};

use crate::error::ApiError;

/// JSON ボディを取り出し、宣言的検証を行う
pub(crate) fn validated_body<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "JSON の解釈に失敗しました");
        ApiError::invalid_json()
    })?;

    body.validate().map_err(|errors| {
        tracing::debug!(error = %errors, "入力値の検証に失敗しました");
        ApiError::invalid_input()
    })?;

    Ok(body)
}

/// パスパラメータの ID を解釈する
pub(crate) fn parse_id<T>(raw: &str, parse: fn(&str) -> Result<T, uuid::Error>) -> Result<T, ApiError> {
    parse(raw).map_err(|_| ApiError::invalid_uuid())
}
