//! # 参加者（Participant）
//!
//! 旅行に招待された人物。メールアドレスと確認状態を持つ。
//!
//! ## 確認状態の遷移
//!
//! ```text
//! Unconfirmed ──confirm──▶ Confirmed
//!                              │
//!                              └─confirm─▶ Err(AlreadyConfirmed)
//! ```
//!
//! 遷移は一方向のみ。確認済みの参加者を再度確認しようとした場合は
//! 何もせず成功とするのではなく、[`DomainError::AlreadyConfirmed`] を返す。

use crate::{DomainError, trip::TripId};

define_uuid_id! {
    /// 参加者の一意識別子
    pub struct ParticipantId;
}

/// 参加者の確認状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Unconfirmed,
    Confirmed,
}

impl From<bool> for ConfirmationStatus {
    fn from(is_confirmed: bool) -> Self {
        if is_confirmed {
            Self::Confirmed
        } else {
            Self::Unconfirmed
        }
    }
}

/// 参加者エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id:      ParticipantId,
    trip_id: TripId,
    email:   String,
    status:  ConfirmationStatus,
}

impl Participant {
    /// データベースから参加者を復元する
    pub fn from_db(id: ParticipantId, trip_id: TripId, email: String, is_confirmed: bool) -> Self {
        Self {
            id,
            trip_id,
            email,
            status: ConfirmationStatus::from(is_confirmed),
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> ConfirmationStatus {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ConfirmationStatus::Confirmed
    }

    /// 確認済みに遷移した参加者を返す
    pub fn confirmed(self) -> Result<Self, DomainError> {
        match self.status {
            ConfirmationStatus::Unconfirmed => Ok(Self {
                status: ConfirmationStatus::Confirmed,
                ..self
            }),
            ConfirmationStatus::Confirmed => Err(DomainError::AlreadyConfirmed),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn participant(is_confirmed: bool) -> Participant {
        Participant::from_db(
            ParticipantId::new(),
            TripId::new(),
            "guest@example.com".to_string(),
            is_confirmed,
        )
    }

    #[rstest]
    #[case(false, ConfirmationStatus::Unconfirmed)]
    #[case(true, ConfirmationStatus::Confirmed)]
    fn test_from_db_フラグから確認状態を復元する(
        #[case] is_confirmed: bool,
        #[case] expected: ConfirmationStatus,
    ) {
        assert_eq!(participant(is_confirmed).status(), expected);
    }

    #[test]
    fn test_confirmed_未確認から確認済みに遷移する() {
        let sut = participant(false);
        let id = sut.id().clone();

        let confirmed = sut.confirmed().unwrap();

        assert!(confirmed.is_confirmed());
        assert_eq!(confirmed.id(), &id);
        assert_eq!(confirmed.email(), "guest@example.com");
    }

    #[test]
    fn test_confirmed_確認済みの再確認はエラー() {
        let sut = participant(true);

        let result = sut.confirmed();

        assert_eq!(result, Err(DomainError::AlreadyConfirmed));
    }
}
