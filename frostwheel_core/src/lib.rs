//! Frost Wheel core: prize catalog, spin timing engine, easing, wheel geometry
//! and the session history. No rendering or device access lives here.

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod history;
pub mod prize;
pub mod rng;
pub mod timeline;

pub use crate::config::{WheelConfig, WheelFile, MIN_ROTATIONS, RESOLVE_BUFFER_MS, SPIN_DURATION_MS};
pub use crate::easing::{ease_spin, CubicBezier};
pub use crate::engine::{compute_spin, Engine, FrameUpdate, SpinPhase, SpinPlan, SpinState};
pub use crate::error::{WheelError, WheelResult};
pub use crate::feedback::{EventLog, FeedbackCue, SpinEvent, SpinObserver, Tone};
pub use crate::history::{History, WinRecord};
pub use crate::prize::{Catalog, Prize};
pub use crate::rng::{derive_floats, derive_hash_hex, PrizeDraw, RandomDraw, SeededDraw};
pub use crate::timeline::VirtualTimeline;
