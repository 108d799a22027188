//! 参加者確認ユースケース

use std::sync::Arc;

use planner_domain::{DomainError, participant::ParticipantId};
use planner_infra::repository::ParticipantRepository;

use crate::error::ApiError;

/// 参加者確認ユースケース
pub struct ParticipantUseCaseImpl {
    participant_repository: Arc<dyn ParticipantRepository>,
}

impl ParticipantUseCaseImpl {
    pub fn new(participant_repository: Arc<dyn ParticipantRepository>) -> Self {
        Self {
            participant_repository,
        }
    }

    /// 参加者を確認済みにする
    ///
    /// 1. 参加者を取得（存在しなければ NotFound）
    /// 2. ドメインの状態遷移で確認済みかを判定（確認済みなら書き込まない）
    /// 3. 条件付き UPDATE で確認済みにする
    ///
    /// 2 と 3 の間に別リクエストが確認した場合、3 が競合を返すので
    /// 2 と同じ「確認済み」エラーとして扱う。
    pub async fn confirm_participant(&self, id: &ParticipantId) -> Result<(), ApiError> {
        let participant = self
            .participant_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "participant",
                id:          id.to_string(),
            })?;

        // 永続化は遷移後のエンティティではなく条件付き UPDATE で行う
        let confirmed = participant.confirmed()?;

        self.participant_repository
            .confirm(confirmed.id())
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    ApiError::from(DomainError::AlreadyConfirmed)
                } else {
                    ApiError::Database(e)
                }
            })
    }
}
