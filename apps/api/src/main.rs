//! # Planner API サーバー
//!
//! ## 起動シーケンス
//!
//! 1. `.env` 読み込み（存在する場合）とトレーシング初期化
//! 2. 環境変数から設定を読み込む
//! 3. PostgreSQL 接続プールを作成し、マイグレーションを適用
//! 4. ルーターを構築して待ち受け開始
//!
//! いずれかが失敗した場合はエラーを表示して終了コード 1 で終了する。
//!
//! ## シャットダウン
//!
//! SIGINT / SIGTERM を受けると新規接続の受け付けを止め、処理中のリクエストを
//! 最大 30 秒待ってから接続プールを閉じて終了する。
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run --bin planner
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use planner_api::{
    app::{Repositories, build_app},
    config::AppConfig,
};
use planner_infra::db;
use planner_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal, sync::Notify};

/// シャットダウン時に処理中のリクエストを待つ上限
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("planner");
    init_tracing(tracing_config.clone());

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        service = %tracing_config.service_name,
        host = %config.server.host,
        port = config.server.port,
        "サーバーを起動します"
    );

    let pool = db::create_pool(config.database.connect_options())
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let app = build_app(Repositories::postgres(pool.clone()), pool.clone());

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "ポートのバインドに失敗しました: {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!(addr = %listener.local_addr()?, "サーバーが起動しました");

    let shutdown = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
        }
    });

    tokio::select! {
        result = &mut server => {
            // シグナルを受ける前にサーバーが止まった
            result
                .context("サーバータスクが異常終了しました")?
                .context("サーバーエラーが発生しました")?;
        }
        () = shutdown_signal() => {
            // 待機者がいなくても permit が残るので取りこぼさない
            shutdown.notify_one();

            match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, &mut server).await {
                Ok(result) => {
                    result
                        .context("サーバータスクが異常終了しました")?
                        .context("サーバーエラーが発生しました")?;
                    tracing::info!("処理中のリクエストが完了しました");
                }
                Err(_) => {
                    tracing::warn!(
                        grace_period_secs = SHUTDOWN_GRACE_PERIOD.as_secs(),
                        "猶予時間内に完了しなかったリクエストを打ち切ります"
                    );
                    server.abort();
                }
            }
        }
    }

    pool.close().await;
    tracing::info!("シャットダウンしました");

    Ok(())
}

/// SIGINT（Ctrl+C）または SIGTERM を待つ
///
/// ハンドラの登録に失敗した場合、そのシグナルでは終了しない。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Ctrl+C を受信しました。シャットダウンを開始します");
        },
        () = terminate => {
            tracing::info!("SIGTERM を受信しました。シャットダウンを開始します");
        },
    }
}
