//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio, or DOM dependencies:
//! - Input arrives as a per-tick snapshot
//! - Results leave as events in a `TickResult`
//! - Timers run on a virtual clock advanced by the caller

pub mod ai;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{ball_paddle_overlap, hit_offset, paddle_bounce, wall_bounce};
pub use input::{InputSnapshot, Key, KeyBindings, KeySet};
pub use state::{
    Ball, FrameSnapshot, GameEvent, GameOverReport, GamePhase, Paddle, Player, Scoreboard,
    TickResult, Winner,
};
pub use tick::Engine;
pub use timer::{TimerHandle, TimerKind, Timers};
