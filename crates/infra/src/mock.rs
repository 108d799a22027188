//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! planner-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! `failing()` で生成したモックは全メソッドが [`InfraError::unexpected`] を返す。
//! 500 系の経路を検証するために使う。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use planner_domain::{
    activity::{Activity, ActivityId, NewActivity},
    link::{Link, LinkId, NewLink},
    participant::{Participant, ParticipantId},
    trip::{NewTrip, Trip, TripId, TripRecord},
};

use crate::{
    error::InfraError,
    repository::{ActivityRepository, LinkRepository, ParticipantRepository, TripRepository},
};

fn injected_failure() -> InfraError {
    InfraError::unexpected("injected failure")
}

// ===== MockTripRepository =====

#[derive(Clone, Default)]
pub struct MockTripRepository {
    trips:        Arc<Mutex<Vec<Trip>>>,
    participants: Arc<Mutex<Vec<Participant>>>,
    failing:      bool,
}

impl MockTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_trip(&self, trip: Trip) {
        self.trips.lock().unwrap().push(trip);
    }

    pub fn add_participant(&self, participant: Participant) {
        self.participants.lock().unwrap().push(participant);
    }

    /// 同じ参加者ストアを共有する参加者リポジトリを返す
    ///
    /// 旅行作成で登録された招待者を、確認 API から参照できるようにする。
    pub fn participant_repository(&self) -> MockParticipantRepository {
        MockParticipantRepository {
            participants: Arc::clone(&self.participants),
            ..MockParticipantRepository::default()
        }
    }

    /// 保存されている旅行の一覧（検証用）
    pub fn trips(&self) -> Vec<Trip> {
        self.trips.lock().unwrap().clone()
    }
}

#[async_trait]
impl TripRepository for MockTripRepository {
    async fn insert(&self, trip: &NewTrip) -> Result<TripId, InfraError> {
        if self.failing {
            return Err(injected_failure());
        }

        let id = TripId::new();
        self.trips.lock().unwrap().push(Trip::from_db(TripRecord {
            id:           id.clone(),
            destination:  trip.destination().to_string(),
            owner_email:  trip.owner_email().to_string(),
            owner_name:   trip.owner_name().to_string(),
            is_confirmed: false,
            starts_at:    trip.starts_at(),
            ends_at:      trip.ends_at(),
        }));

        let mut participants = self.participants.lock().unwrap();
        for email in trip.emails_to_invite() {
            participants.push(Participant::from_db(
                ParticipantId::new(),
                id.clone(),
                email.clone(),
                false,
            ));
        }

        Ok(id)
    }

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, InfraError> {
        if self.failing {
            return Err(injected_failure());
        }

        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn update(&self, trip: &Trip) -> Result<(), InfraError> {
        if self.failing {
            return Err(injected_failure());
        }

        let mut trips = self.trips.lock().unwrap();
        if let Some(pos) = trips.iter().position(|t| t.id() == trip.id()) {
            trips[pos] = trip.clone();
        }
        Ok(())
    }

    async fn find_participants(&self, trip_id: &TripId) -> Result<Vec<Participant>, InfraError> {
        if self.failing {
            return Err(injected_failure());
        }

        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.trip_id() == trip_id)
            .cloned()
            .collect())
    }
}

// ===== MockParticipantRepository =====

#[derive(Clone, Default)]
pub struct MockParticipantRepository {
    participants:  Arc<Mutex<Vec<Participant>>>,
    confirm_calls: Arc<AtomicUsize>,
    failing:       bool,
}

impl MockParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_participant(&self, participant: Participant) {
        self.participants.lock().unwrap().push(participant);
    }

    /// `confirm` が呼ばれた回数（書き込みが発生したかの検証用）
    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    pub fn find(&self, id: &ParticipantId) -> Option<Participant> {
        self.participants
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }
}

#[async_trait]
impl ParticipantRepository for MockParticipantRepository {
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, InfraError> {
        if self.failing {
            return Err(injected_failure());
        }

        Ok(self.find(id))
    }

    async fn confirm(&self, id: &ParticipantId) -> Result<(), InfraError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(injected_failure());
        }

        // 条件付き UPDATE と同じく、未確認の行だけを更新する
        let mut participants = self.participants.lock().unwrap();
        let Some(pos) = participants
            .iter()
            .position(|p| p.id() == id && !p.is_confirmed())
        else {
            return Err(InfraError::conflict("Participant", id.to_string()));
        };

        let current = participants[pos].clone();
        participants[pos] = Participant::from_db(
            current.id().clone(),
            current.trip_id().clone(),
            current.email().to_string(),
            true,
        );
        Ok(())
    }
}

// ===== MockActivityRepository =====

#[derive(Clone, Default)]
pub struct MockActivityRepository {
    activities: Arc<Mutex<Vec<Activity>>>,
}

impl MockActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_activity(&self, activity: Activity) {
        self.activities.lock().unwrap().push(activity);
    }
}

#[async_trait]
impl ActivityRepository for MockActivityRepository {
    async fn insert(&self, activity: &NewActivity) -> Result<ActivityId, InfraError> {
        let id = ActivityId::new();
        self.activities.lock().unwrap().push(Activity::from_db(
            id.clone(),
            activity.trip_id.clone(),
            activity.title.clone(),
            activity.occurs_at,
        ));
        Ok(id)
    }

    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Activity>, InfraError> {
        let mut activities: Vec<Activity> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.trip_id() == trip_id)
            .cloned()
            .collect();
        activities.sort_by_key(Activity::occurs_at);
        Ok(activities)
    }
}

// ===== MockLinkRepository =====

#[derive(Clone, Default)]
pub struct MockLinkRepository {
    links: Arc<Mutex<Vec<Link>>>,
}

impl MockLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }
}

#[async_trait]
impl LinkRepository for MockLinkRepository {
    async fn insert(&self, link: &NewLink) -> Result<LinkId, InfraError> {
        let id = LinkId::new();
        self.links.lock().unwrap().push(Link::from_db(
            id.clone(),
            link.trip_id.clone(),
            link.title.clone(),
            link.url.clone(),
        ));
        Ok(id)
    }

    async fn find_by_trip(&self, trip_id: &TripId) -> Result<Vec<Link>, InfraError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.trip_id() == trip_id)
            .cloned()
            .collect())
    }
}
