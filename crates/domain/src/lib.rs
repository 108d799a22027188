//! # Planner ドメイン層
//!
//! 旅行計画（Trip）とそれに紐づく参加者・アクティビティ・リンクの
//! ドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘      ↓
//!     shared
//! ```
//!
//! ドメイン層はインフラ層（DB）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`trip`] - 旅行エンティティ
//! - [`participant`] - 参加者エンティティと確認状態の遷移
//! - [`activity`] - アクティビティエンティティ
//! - [`link`] - リンクエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use planner_domain::{DomainError, participant::ParticipantId};
//!
//! let id = ParticipantId::new();
//! let error = DomainError::NotFound {
//!     entity_type: "Participant",
//!     id:          id.to_string(),
//! };
//! assert!(error.to_string().contains("Participant"));
//! ```

#[macro_use]
mod macros;

pub mod activity;
pub mod error;
pub mod link;
pub mod participant;
pub mod trip;

pub use error::DomainError;
