//! Duel Pong - a two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation engine (entities, movement, collisions, scoring, AI)
//! - `config`: Overridable game constants and AI tiers
//! - `settings`: Mode enumerations and menu ball settings
//! - `renderer`: WebGPU rendering of frame snapshots
//! - `audio`: Sound triggers and Web Audio beeps
//! - `ui`: Menu/event sink and tick dispatch

pub mod audio;
pub mod config;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use config::{AiTier, ConfigError, GameConfig};
pub use settings::{BallSettings, ControlMode, Difficulty, GameMode, PvpMode};

/// Default game constants
pub mod consts {
    /// Play surface dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// First player to reach this wins
    pub const WINNING_SCORE: u32 = 11;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 20.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Tilt limit in degrees (either direction)
    pub const MAX_TILT: f32 = 30.0;
    /// Tilt change per tick in degrees
    pub const TILT_STEP: f32 = 2.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Pixels per tick
    pub const BALL_SPEED: f32 = 2.0;
    pub const BALL_COLOR: &str = "#ffffff";

    /// Velocity multiplier applied on every paddle hit
    pub const PADDLE_HIT_SPEEDUP: f32 = 1.025;
    /// Vertical deflection for a hit at the paddle's very edge
    pub const DEFLECTION_SCALE: f32 = 10.0;
    /// Degrees of tilt to vertical velocity
    pub const TILT_DEFLECTION: f32 = 0.1;

    /// AI tiers: (speed px/tick, accuracy 0-1)
    pub const AI_EASY: (f32, f32) = (2.0, 0.5);
    pub const AI_MEDIUM: (f32, f32) = (3.0, 0.6);
    pub const AI_HARD: (f32, f32) = (5.0, 0.7);
    /// Prediction noise in pixels at accuracy 0
    pub const AI_NOISE_SCALE: f32 = 100.0;
    /// AI ignores targets closer than this (prevents jitter)
    pub const AI_DEADBAND: f32 = 5.0;

    /// Pause after a point before the next serve (seconds)
    pub const SCORE_PAUSE_SECS: f32 = 1.0;
    /// Screen shake duration after a point (seconds)
    pub const SHAKE_SECS: f32 = 0.5;
    /// Nominal frame time used by drivers that don't measure one
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Parse a `#rrggbb` or `#rgb` color into linear-ish RGBA floats
pub fn parse_hex_color(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            1.0,
        ]),
        3 => {
            let expand = |i: usize| {
                let c = &hex[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            Some([expand(0)?, expand(1)?, expand(2)?, 1.0])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#f00"), Some([1.0, 0.0, 0.0, 1.0]));
        assert!(parse_hex_color("ffffff").is_none());
        assert!(parse_hex_color("#12345").is_none());
        assert!(parse_hex_color("#gggggg").is_none());
    }
}
