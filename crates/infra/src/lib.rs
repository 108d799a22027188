//! # Planner インフラ層
//!
//! PostgreSQL との接続とデータアクセスを担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、マイグレーション適用
//! - **リポジトリ実装**: 1 メソッド = 1 つのパラメータ化 SQL
//! - **テスト用モック**: `test-utils` feature で公開するインメモリ実装
//!
//! ドライバのエラー（`sqlx::Error`）は加工せず [`InfraError`] に包んで返す。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use planner_infra::{db, repository::PostgresParticipantRepository};
//!
//! let pool = db::create_pool(connect_options).await?;
//! db::run_migrations(&pool).await?;
//! let participants = PostgresParticipantRepository::new(pool.clone());
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
