//! # リポジトリ実装
//!
//! 集約ごとのリポジトリトレイトと、その PostgreSQL 実装を提供する。
//!
//! - ユースケース層はトレイト（`Arc<dyn XxxRepository>`）にのみ依存する
//! - 各メソッドはパラメータ化した SQL を 1 つ（作成系は 1 トランザクション）実行する
//! - テスト用のインメモリ実装は [`crate::mock`]（`test-utils` feature）にある

pub mod activity_repository;
pub mod link_repository;
pub mod participant_repository;
pub mod trip_repository;

pub use activity_repository::{ActivityRepository, PostgresActivityRepository};
pub use link_repository::{LinkRepository, PostgresLinkRepository};
pub use participant_repository::{ParticipantRepository, PostgresParticipantRepository};
pub use trip_repository::{PostgresTripRepository, TripRepository};
