//! # Planner API サーバー
//!
//! 旅行計画（旅行・参加者・アクティビティ・リンク）を扱う HTTP API。
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーター構築とミドルウェアスタック
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ（入力の検証とレスポンス整形）
//! - [`usecase`] - ユースケース（リポジトリを組み合わせた業務処理）
//!
//! ## 依存関係
//!
//! - `planner_domain`: エンティティ、状態遷移、ドメインエラー
//! - `planner_infra`: PostgreSQL 接続とリポジトリ
//! - `planner_shared`: レスポンス型、トレーシング初期化
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use planner_api::{app::{Repositories, build_app}, config::AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let pool = planner_infra::db::create_pool(config.database.connect_options()).await?;
//! let app = build_app(Repositories::postgres(pool.clone()), pool);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
