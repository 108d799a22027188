//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、マイグレーション適用、疎通確認を行う。
//!
//! 接続情報は URL 文字列ではなく [`PgConnectOptions`] で受け取る。
//! パスワードに `@` や `/` が含まれていてもエスケープを意識せずに済む。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use planner_infra::db;
//! use sqlx::postgres::PgConnectOptions;
//!
//! let options = PgConnectOptions::new()
//!     .host("localhost")
//!     .port(5432)
//!     .username("planner")
//!     .password("secret")
//!     .database("planner");
//! let pool = db::create_pool(options).await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// プールの最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 共通設定を適用した `PgPoolOptions` を返す
pub fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// PostgreSQL 接続プールを作成する
///
/// 起動時に一度だけ呼び出し、作成したプールをアプリケーション全体で共有する。
/// 最初の接続確立に失敗した場合はエラーを返す（起動失敗として扱う）。
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, InfraError> {
    let pool = pool_options().connect_with(options).await?;
    Ok(pool)
}

/// データベースマイグレーションを実行する
///
/// `migrations/` 配下の SQL をバイナリに埋め込み、未適用のものを順番に適用する。
/// sqlx が advisory lock を取るため、複数プロセスから同時に呼び出しても安全。
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// データベースへの疎通を確認する
///
/// Readiness Check から呼ばれる。`SELECT 1` が成功すれば `Ok(())`。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
