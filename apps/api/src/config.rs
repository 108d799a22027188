//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `PLANNER_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PLANNER_PORT` | No | `8080` | ポート番号 |
//! | `PLANNER_DATABASE_USER` | **Yes** | - | PostgreSQL ユーザー |
//! | `PLANNER_DATABASE_PASSWORD` | **Yes** | - | PostgreSQL パスワード |
//! | `PLANNER_DATABASE_HOST` | **Yes** | - | PostgreSQL ホスト |
//! | `PLANNER_DATABASE_PORT` | No | `5432` | PostgreSQL ポート |
//! | `PLANNER_DATABASE_NAME` | **Yes** | - | データベース名 |
//!
//! ログ関連（`LOG_FORMAT`, `RUST_LOG`）は `planner_shared::observability` が読む。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use planner_api::config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("サーバー: {}:{}", config.server.host, config.server.port);
//! ```

use std::{env, fmt};

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正（ポート番号が数値でないなど）
    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
    pub host: String,
    /// ポート番号
    pub port: u16,
}

/// データベース接続設定
///
/// URL 文字列ではなく個別の値で保持し、[`PgConnectOptions`] に組み立てる。
#[derive(Clone)]
pub struct DatabaseConfig {
    pub user:     String,
    pub password: String,
    pub host:     String,
    pub port:     u16,
    pub name:     String,
}

impl DatabaseConfig {
    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

// パスワードをログに出さない
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"********")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server:   ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `.env` の読み込み（`dotenvy::dotenv()`）は呼び出し側で行う。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストではプロセス環境を書き換えずに値を差し込むために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let port = |name: &'static str, default: u16| match lookup(name) {
            None => Ok(default),
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name, value }),
        };

        Ok(Self {
            server:   ServerConfig {
                host: lookup("PLANNER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: port("PLANNER_PORT", 8080)?,
            },
            database: DatabaseConfig {
                user:     required("PLANNER_DATABASE_USER")?,
                password: required("PLANNER_DATABASE_PASSWORD")?,
                host:     required("PLANNER_DATABASE_HOST")?,
                port:     port("PLANNER_DATABASE_PORT", 5432)?,
                name:     required("PLANNER_DATABASE_NAME")?,
            },
        })
    }
}
