#![forbid(unsafe_code)]

//! Dependency-light primitives for the PromptDeck console demo.
//!
//! Geometry, the intensity dial, and the static application catalog. No
//! timers, no I/O. Everything here is pure data and pure functions so the
//! higher layers stay deterministic.

pub mod catalog;
pub mod dial;
pub mod geometry;

pub use catalog::{AppId, AppSpec, BUTTONS_PER_APP, ButtonSpec};
pub use dial::{DialState, Tier};
pub use geometry::{Rect, Size};
