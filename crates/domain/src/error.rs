//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `AlreadyConfirmed` | 400 Bad Request | 確認済みの参加者を再確認しようとした |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    /// 例: 旅行の終了日時が開始日時より前
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Trip", "Participant" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 参加者が既に確認済み
    ///
    /// 確認状態は未確認 → 確認済みの一方向のみ遷移する。
    /// 確認済みからの再確認は冪等な成功ではなくエラーとして扱う。
    #[error("参加者は既に確認済みです")]
    AlreadyConfirmed,
}
