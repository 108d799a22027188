//! # 参加者ハンドラ
//!
//! ## エンドポイント
//!
//! - `PATCH /participants/{participant_id}/confirm` - 参加者の確認

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use planner_domain::participant::ParticipantId;

use crate::{error::ApiError, handler::parse_id, usecase::ParticipantUseCaseImpl};

/// 参加者 API の共有状態
pub struct ParticipantState {
    pub usecase: ParticipantUseCaseImpl,
}

/// PATCH /participants/{participant_id}/confirm
///
/// 未確認の参加者を確認済みにする。
///
/// ## レスポンス
///
/// - `204 No Content`: 確認成功（ボディなし）
/// - `400 Bad Request`: ID が UUID でない / すでに確認済み
/// - `404 Not Found`: 参加者が存在しない
/// - `500 Internal Server Error`: ストアの失敗
#[tracing::instrument(skip_all, fields(participant_id = %participant_id))]
pub async fn confirm_participant(
    State(state): State<Arc<ParticipantState>>,
    Path(participant_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&participant_id, ParticipantId::parse)?;

    state.usecase.confirm_participant(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::Method, routing::patch};
    use planner_domain::{participant::Participant, trip::TripId};
    use planner_infra::mock::MockParticipantRepository;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;
    use crate::handler::test_support::{empty_request, error_detail};

    fn create_test_app(repo: MockParticipantRepository) -> Router {
        let state = Arc::new(ParticipantState {
            usecase: ParticipantUseCaseImpl::new(Arc::new(repo)),
        });

        Router::new()
            .route(
                "/participants/{participant_id}/confirm",
                patch(confirm_participant),
            )
            .with_state(state)
    }

    fn unconfirmed_participant(repo: &MockParticipantRepository) -> ParticipantId {
        let participant = Participant::from_db(
            ParticipantId::new(),
            TripId::new(),
            "guest@example.com".to_string(),
            false,
        );
        let id = participant.id().clone();
        repo.add_participant(participant);
        id
    }

    #[tokio::test]
    async fn test_patch_未確認の参加者を確認すると204が返る() {
        // Given
        let repo = MockParticipantRepository::new();
        let id = unconfirmed_participant(&repo);
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(empty_request(
                Method::PATCH,
                &format!("/participants/{id}/confirm"),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
        assert!(repo.find(&id).unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_patch_2回目の確認は400で状態は確認済みのまま() {
        // Given
        let repo = MockParticipantRepository::new();
        let id = unconfirmed_participant(&repo);
        let sut = create_test_app(repo.clone());
        let uri = format!("/participants/{id}/confirm");
        let first = sut
            .clone()
            .oneshot(empty_request(Method::PATCH, &uri))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        // When
        let second = sut.oneshot(empty_request(Method::PATCH, &uri)).await.unwrap();

        // Then
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_detail(second).await, "participant is already confirmed");
        assert!(repo.find(&id).unwrap().is_confirmed());
        assert_eq!(repo.confirm_calls(), 1);
    }

    #[rstest]
    #[case::literal_text("not-a-uuid")]
    #[case::digits_only("1234")]
    #[case::one_char_short("0190a5b8-0000-7000-8000-00000000000")]
    #[case::non_hex_char("0190a5b8-0000-7000-8000-00000000000g")]
    #[case::trailing_char("0190a5b8-0000-7000-8000-000000000000x")]
    #[case::encoded_space("%20")]
    #[tokio::test]
    async fn test_patch_uuidでないidは400でストアに問い合わせない(#[case] raw_id: &str) {
        // Given
        let repo = MockParticipantRepository::failing();
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(empty_request(
                Method::PATCH,
                &format!("/participants/{raw_id}/confirm"),
            ))
            .await
            .unwrap();

        // Then: failing モックに到達していれば 500 になる
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_detail(response).await, "invalid uuid");
        assert_eq!(repo.confirm_calls(), 0);
    }

    #[tokio::test]
    async fn test_patch_存在しない参加者は404() {
        // Given
        let sut = create_test_app(MockParticipantRepository::new());

        // When
        let response = sut
            .oneshot(empty_request(
                Method::PATCH,
                &format!("/participants/{}/confirm", ParticipantId::new()),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_detail(response).await, "participant not found");
    }

    #[tokio::test]
    async fn test_patch_ストアの失敗は500で汎用メッセージ() {
        // Given
        let sut = create_test_app(MockParticipantRepository::failing());

        // When
        let response = sut
            .oneshot(empty_request(
                Method::PATCH,
                &format!("/participants/{}/confirm", ParticipantId::new()),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_detail(response).await, "something went wrong");
    }
}
