//! # ユースケース層
//!
//! リポジトリトレイト（`Arc<dyn ...>`）を組み合わせて業務処理を行う。
//! ハンドラは入力の検証とレスポンス整形のみを行い、ここを呼び出す。

pub mod activity;
pub mod link;
pub mod participant;
pub mod trip;

pub use activity::ActivityUseCaseImpl;
pub use link::LinkUseCaseImpl;
pub use participant::ParticipantUseCaseImpl;
pub use trip::TripUseCaseImpl;
