//! # リンク（Link）
//!
//! 旅行に添付される参考 URL。

use crate::trip::TripId;

define_uuid_id! {
    /// リンクの一意識別子
    pub struct LinkId;
}

/// 作成前のリンク（ID は DB が採番する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub trip_id: TripId,
    pub title:   String,
    pub url:     String,
}

/// リンクエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id:      LinkId,
    trip_id: TripId,
    title:   String,
    url:     String,
}

impl Link {
    /// データベースからリンクを復元する
    pub fn from_db(id: LinkId, trip_id: TripId, title: String, url: String) -> Self {
        Self {
            id,
            trip_id,
            title,
            url,
        }
    }

    pub fn id(&self) -> &LinkId {
        &self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
