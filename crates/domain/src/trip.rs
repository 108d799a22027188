//! # 旅行（Trip）
//!
//! 行き先・主催者・日程・確認フラグを持つ旅行エンティティ。
//!
//! ## 不変条件
//!
//! - 終了日時（`ends_at`）は開始日時（`starts_at`）より前にならない
//!
//! 作成時と日程変更時の両方でこの条件を検証する。
//! DB から復元する場合（[`Trip::from_db`]）は検証しない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::{Duration, Utc};
//! use planner_domain::trip::NewTrip;
//!
//! let starts_at = Utc::now();
//! let new_trip = NewTrip::new(
//!     "Florianópolis".to_string(),
//!     "owner@example.com".to_string(),
//!     "Owner".to_string(),
//!     starts_at,
//!     starts_at + Duration::days(7),
//!     vec!["friend@example.com".to_string()],
//! )?;
//!
//! assert_eq!(new_trip.emails_to_invite().len(), 1);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::DomainError;

define_uuid_id! {
    /// 旅行の一意識別子
    pub struct TripId;
}

/// 日程の検証
fn ensure_schedule(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), DomainError> {
    if ends_at < starts_at {
        return Err(DomainError::Validation(
            "終了日時は開始日時以降である必要があります".to_string(),
        ));
    }
    Ok(())
}

/// 作成前の旅行
///
/// ID は DB が採番するため持たない。招待メールアドレスは
/// 旅行と同時に参加者（未確認）として登録される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrip {
    destination:      String,
    owner_email:      String,
    owner_name:       String,
    starts_at:        DateTime<Utc>,
    ends_at:          DateTime<Utc>,
    emails_to_invite: Vec<String>,
}

impl NewTrip {
    pub fn new(
        destination: String,
        owner_email: String,
        owner_name: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        emails_to_invite: Vec<String>,
    ) -> Result<Self, DomainError> {
        ensure_schedule(starts_at, ends_at)?;

        Ok(Self {
            destination,
            owner_email,
            owner_name,
            starts_at,
            ends_at,
            emails_to_invite,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    pub fn emails_to_invite(&self) -> &[String] {
        &self.emails_to_invite
    }
}

/// DB から旅行を復元するためのレコード
#[derive(Debug, Clone)]
pub struct TripRecord {
    pub id:           TripId,
    pub destination:  String,
    pub owner_email:  String,
    pub owner_name:   String,
    pub is_confirmed: bool,
    pub starts_at:    DateTime<Utc>,
    pub ends_at:      DateTime<Utc>,
}

/// 旅行エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id:           TripId,
    destination:  String,
    owner_email:  String,
    owner_name:   String,
    is_confirmed: bool,
    starts_at:    DateTime<Utc>,
    ends_at:      DateTime<Utc>,
}

impl Trip {
    /// データベースから旅行を復元する
    pub fn from_db(record: TripRecord) -> Self {
        Self {
            id:           record.id,
            destination:  record.destination,
            owner_email:  record.owner_email,
            owner_name:   record.owner_name,
            is_confirmed: record.is_confirmed,
            starts_at:    record.starts_at,
            ends_at:      record.ends_at,
        }
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// 行き先と日程を変更した旅行を返す
    ///
    /// 確認フラグと主催者情報は変更しない。
    pub fn rescheduled(
        self,
        destination: String,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        ensure_schedule(starts_at, ends_at)?;

        Ok(Self {
            destination,
            starts_at,
            ends_at,
            ..self
        })
    }
}
