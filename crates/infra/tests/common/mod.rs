//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use planner_domain::trip::{NewTrip, TripId};
use planner_infra::repository::{PostgresTripRepository, TripRepository};
use sqlx::PgPool;

/// テスト用の固定時刻
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// 招待者付きの作成前旅行を組み立てる
pub fn new_trip(emails_to_invite: &[&str]) -> NewTrip {
    NewTrip::new(
        "Florianópolis".to_string(),
        "owner@example.com".to_string(),
        "Owner".to_string(),
        test_now(),
        test_now() + Duration::days(7),
        emails_to_invite.iter().map(|e| e.to_string()).collect(),
    )
    .unwrap()
}

/// 旅行を 1 件作成して ID を返す
pub async fn insert_trip(pool: &PgPool, emails_to_invite: &[&str]) -> TripId {
    PostgresTripRepository::new(pool.clone())
        .insert(&new_trip(emails_to_invite))
        .await
        .unwrap()
}
