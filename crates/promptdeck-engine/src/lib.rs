#![forbid(unsafe_code)]

//! Timed state machines and canned-output lookup for the PromptDeck demo.
//!
//! Every animation in this crate is an explicit state machine advanced by
//! `advance(Duration)`; there are no timers, threads, or wall-clock reads.
//! The frontend owns the clock and feeds elapsed time each frame; tests feed
//! synthetic durations and assert on the resulting states. Components that
//! finish something report it by returning an event from `advance`, which is
//! how "completion callback fired exactly once" is expressed here.

pub mod grid;
pub mod macro_chain;
pub mod outputs;
pub mod session;
pub mod splash;
pub mod toast;
pub mod tour;
pub mod typewriter;

pub use session::{ConsoleSession, SessionEvent};
