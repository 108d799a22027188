//! # API レスポンスエンベロープ
//!
//! 成功レスポンスの統一形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 成功レスポンスの統一型
///
/// ボディを返すすべてのエンドポイントは `{ "data": T }` 形式で応答する。
/// 204 No Content を返すエンドポイント（参加者確認、旅行更新）は使用しない。
///
/// ## 使用例
///
/// ```
/// use planner_shared::ApiResponse;
///
/// let response = ApiResponse::new("lisbon");
/// assert_eq!(response.data, "lisbon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
