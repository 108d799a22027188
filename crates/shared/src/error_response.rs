//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全エンドポイント共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務
//! - クライアント向けの短いメッセージ（`invalid uuid` など）は `detail` に入る
//! - 500 系の `detail` は固定値で、内部情報を含めない

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://planner.example.com/errors";

/// サーバー内部エラー時にクライアントへ返す固定メッセージ
pub const INTERNAL_ERROR_DETAIL: &str = "something went wrong";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"not-found"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad-request", "Bad Request", 400, detail)
    }

    /// 404 Not Found
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", 404, detail)
    }

    /// 408 Request Timeout
    pub fn request_timeout() -> Self {
        Self::new("request-timeout", "Request Timeout", 408, "request timed out")
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            INTERNAL_ERROR_DETAIL,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_で全フィールドが正しく設定される() {
        let error = ErrorResponse::new("custom-error", "Custom Error", 418, "teapot");

        assert_eq!(
            error.error_type,
            "https://planner.example.com/errors/custom-error"
        );
        assert_eq!(error.title, "Custom Error");
        assert_eq!(error.status, 418);
        assert_eq!(error.detail, "teapot");
    }

    #[test]
    fn test_bad_request_はメッセージをdetailにそのまま入れる() {
        let error = ErrorResponse::bad_request("invalid uuid");

        assert_eq!(error.status, 400);
        assert_eq!(error.detail, "invalid uuid");
        assert_eq!(
            error.error_type,
            "https://planner.example.com/errors/bad-request"
        );
    }

    #[test]
    fn test_internal_error_が500と固定detailを返す() {
        let error = ErrorResponse::internal_error();

        assert_eq!(error.title, "Internal Server Error");
        assert_eq!(error.status, 500);
        assert_eq!(error.detail, "something went wrong");
    }

    #[test]
    fn test_jsonシリアライズでtypeフィールド名が正しい() {
        let error = ErrorResponse::not_found("participant not found");
        let json = serde_json::to_value(&error).unwrap();

        // serde(rename = "type") で `error_type` → `type` に変換される
        assert_eq!(json["type"], "https://planner.example.com/errors/not-found");
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "participant not found");
        assert!(json.get("error_type").is_none());
    }

    #[test]
    fn test_全便利コンストラクタのstatusが正しい() {
        assert_eq!(ErrorResponse::bad_request("x").status, 400);
        assert_eq!(ErrorResponse::not_found("x").status, 404);
        assert_eq!(ErrorResponse::request_timeout().status, 408);
        assert_eq!(ErrorResponse::internal_error().status, 500);
    }
}
