//! Platform abstraction layer
//!
//! Handles browser/native differences behind three narrow adapter contracts:
//! - `DrawSurface`: pixel dimensions plus primitive 2D drawing ops
//! - `TickScheduler`: request/cancel one future engine invocation
//! - `ScoreStore`: get/set for the persisted high score
//!
//! The engine consumes these traits only; browser implementations live in
//! the submodules behind `target_arch = "wasm32"`.

pub mod scheduler;
pub mod storage;
pub mod surface;

pub use scheduler::TickScheduler;
pub use storage::ScoreStore;
pub use surface::DrawSurface;

#[cfg(target_arch = "wasm32")]
pub use scheduler::AnimationFrameScheduler;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
#[cfg(target_arch = "wasm32")]
pub use surface::CanvasSurface;

pub use storage::MemoryStore;
