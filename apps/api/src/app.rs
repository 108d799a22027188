//! # ルーター構築
//!
//! リポジトリからユースケース・ハンドラ状態を組み立て、
//! 全エンドポイントとミドルウェアスタックを持つ [`Router`] を返す。
//!
//! ## ミドルウェア（外側から順に）
//!
//! 1. `SetRequestIdLayer`: `x-request-id` がなければ UUID v7 を採番
//! 2. `TraceLayer`: Request ID・メソッド・URI を持つスパンを作り、完了時にステータスとレイテンシを記録
//! 3. `PropagateRequestIdLayer`: レスポンスヘッダーに `x-request-id` をコピー
//! 4. `CatchPanicLayer`: ハンドラのパニックを RFC 9457 形式の 500 に変換
//! 5. `TimeoutLayer`: 1 リクエスト 5 秒で打ち切り

use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    Json,
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use planner_infra::repository::{
    ActivityRepository,
    LinkRepository,
    ParticipantRepository,
    PostgresActivityRepository,
    PostgresLinkRepository,
    PostgresParticipantRepository,
    PostgresTripRepository,
    TripRepository,
};
use planner_shared::{
    ErrorResponse,
    observability::{MakeRequestUuidV7, make_request_span},
};
use sqlx::PgPool;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    handler::{
        ActivityState,
        LinkState,
        ParticipantState,
        ReadinessState,
        TripState,
        confirm_participant,
        confirm_trip,
        create_activity,
        create_link,
        create_trip,
        get_trip,
        health_check,
        invite_to_trip,
        list_activities,
        list_links,
        list_participants,
        readiness_check,
        update_trip,
    },
    usecase::{ActivityUseCaseImpl, LinkUseCaseImpl, ParticipantUseCaseImpl, TripUseCaseImpl},
};

/// 1 リクエストあたりの処理時間上限
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// ルーターが依存するリポジトリ一式
pub struct Repositories {
    pub trips:        Arc<dyn TripRepository>,
    pub participants: Arc<dyn ParticipantRepository>,
    pub activities:   Arc<dyn ActivityRepository>,
    pub links:        Arc<dyn LinkRepository>,
}

impl Repositories {
    /// PostgreSQL 実装で組み立てる
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            trips:        Arc::new(PostgresTripRepository::new(pool.clone())),
            participants: Arc::new(PostgresParticipantRepository::new(pool.clone())),
            activities:   Arc::new(PostgresActivityRepository::new(pool.clone())),
            links:        Arc::new(PostgresLinkRepository::new(pool)),
        }
    }
}

/// 全エンドポイントとミドルウェアを持つルーターを構築する
///
/// `pool` は Readiness Check の疎通確認にのみ使う。
pub fn build_app(repositories: Repositories, pool: PgPool) -> Router {
    let Repositories {
        trips,
        participants,
        activities,
        links,
    } = repositories;

    let readiness_state = Arc::new(ReadinessState { pool });
    let participant_state = Arc::new(ParticipantState {
        usecase: ParticipantUseCaseImpl::new(participants),
    });
    let trip_state = Arc::new(TripState {
        usecase: TripUseCaseImpl::new(Arc::clone(&trips)),
    });
    let activity_state = Arc::new(ActivityState {
        usecase: ActivityUseCaseImpl::new(Arc::clone(&trips), activities),
    });
    let link_state = Arc::new(LinkState {
        usecase: LinkUseCaseImpl::new(trips, links),
    });

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        // 参加者 API
        .route(
            "/participants/{participant_id}/confirm",
            patch(confirm_participant),
        )
        .with_state(participant_state)
        // 旅行 API
        .route("/trips", post(create_trip))
        .route("/trips/{trip_id}", get(get_trip).put(update_trip))
        .route("/trips/{trip_id}/participants", get(list_participants))
        .route("/trips/{trip_id}/confirm", get(confirm_trip))
        .route("/trips/{trip_id}/invites", post(invite_to_trip))
        .with_state(trip_state)
        // アクティビティ API
        .route(
            "/trips/{trip_id}/activities",
            get(list_activities).post(create_activity),
        )
        .with_state(activity_state)
        // リンク API
        .route("/trips/{trip_id}/links", get(list_links).post(create_link))
        .with_state(link_state);

    with_middleware(router)
}

/// ミドルウェアスタックを適用する
///
/// `layer` は後から呼んだものほど外側になる。
fn with_middleware(router: Router) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// パニックを 500 レスポンスに変換する（プロセスは継続する）
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %message, "ハンドラがパニックしました");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Method};
    use planner_infra::mock::{
        MockActivityRepository,
        MockLinkRepository,
        MockTripRepository,
    };
    use planner_shared::ApiResponse;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use tower::ServiceExt;

    use super::*;
    use crate::handler::{
        test_support::{empty_request, error_detail, json_request, response_body},
        trip::{CreateTripResponse, ParticipantsResponse},
    };

    /// モックリポジトリと接続しない遅延プールでアプリを組み立てる
    fn create_test_app() -> Router {
        let trips = MockTripRepository::new();
        let repositories = Repositories {
            participants: Arc::new(trips.participant_repository()),
            trips:        Arc::new(trips),
            activities:   Arc::new(MockActivityRepository::new()),
            links:        Arc::new(MockLinkRepository::new()),
        };
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy_with(PgConnectOptions::new().host("127.0.0.1").port(1));

        build_app(repositories, pool)
    }

    #[tokio::test]
    async fn test_旅行作成から参加者確認までの一連の流れ() {
        let sut = create_test_app();

        // 旅行を作成
        let response = sut
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/trips",
                json!({
                    "destination": "Florianópolis",
                    "starts_at": "2024-07-10T10:00:00Z",
                    "ends_at": "2024-07-17T10:00:00Z",
                    "emails_to_invite": ["friend@example.com"],
                    "owner_name": "Owner",
                    "owner_email": "owner@example.com"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: ApiResponse<CreateTripResponse> = response_body(response).await;

        // 招待者が未確認の参加者として登録されている
        let response = sut
            .clone()
            .oneshot(empty_request(
                Method::GET,
                &format!("/trips/{}/participants", created.data.trip_id),
            ))
            .await
            .unwrap();
        let participants: ApiResponse<ParticipantsResponse> = response_body(response).await;
        let participant = &participants.data.participants[0];
        assert!(!participant.is_confirmed);

        // 確認は 1 回目のみ成功する
        let confirm_uri = format!("/participants/{}/confirm", participant.id);
        let first = sut
            .clone()
            .oneshot(empty_request(Method::PATCH, &confirm_uri))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = sut
            .oneshot(empty_request(Method::PATCH, &confirm_uri))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_detail(second).await, "participant is already confirmed");
    }

    #[tokio::test]
    async fn test_未実装エンドポイントのパニックは500になりサーバーは継続する() {
        let sut = create_test_app();

        let response = sut
            .clone()
            .oneshot(empty_request(
                Method::GET,
                "/trips/0190a5b8-0000-7000-8000-000000000000/confirm",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(error_detail(response).await, "something went wrong");

        // パニック後も通常のリクエストを処理できる
        let response = sut
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_招待エンドポイントも500になる() {
        let sut = create_test_app();

        let response = sut
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::POST)
                    .uri("/trips/0190a5b8-0000-7000-8000-000000000000/invites")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test(start_paused = true)]
    async fn test_5秒を超えるリクエストは408で打ち切られる() {
        // Given: ボディの読み取りもハンドラの処理時間に含まれる
        let sut = with_middleware(Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                StatusCode::OK
            }),
        ));

        // When
        let response = sut
            .oneshot(empty_request(Method::GET, "/slow"))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_5秒以内に終わるリクエストは打ち切られない() {
        let sut = with_middleware(Router::new().route(
            "/steady",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(4)).await;
                StatusCode::OK
            }),
        ));

        let response = sut
            .oneshot(empty_request(Method::GET, "/steady"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_handle_panic_はメッセージの型によらず500を返す() {
        let from_str = handle_panic(Box::new("boom"));
        let from_string = handle_panic(Box::new("boom".to_string()));
        let from_other = handle_panic(Box::new(42_u32));

        for response in [from_str, from_string, from_other] {
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
