//! # アクティビティ（Activity）
//!
//! 旅行中に予定されたイベント。タイトルと発生日時を持つ。

use chrono::{DateTime, Utc};

use crate::trip::TripId;

define_uuid_id! {
    /// アクティビティの一意識別子
    pub struct ActivityId;
}

/// 作成前のアクティビティ（ID は DB が採番する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub trip_id:   TripId,
    pub title:     String,
    pub occurs_at: DateTime<Utc>,
}

/// アクティビティエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    id:        ActivityId,
    trip_id:   TripId,
    title:     String,
    occurs_at: DateTime<Utc>,
}

impl Activity {
    /// データベースからアクティビティを復元する
    pub fn from_db(
        id: ActivityId,
        trip_id: TripId,
        title: String,
        occurs_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            trip_id,
            title,
            occurs_at,
        }
    }

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn occurs_at(&self) -> DateTime<Utc> {
        self.occurs_at
    }
}
