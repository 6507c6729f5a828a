//! Game configuration
//!
//! Every tunable constant in one struct. Defaults come from `crate::consts`;
//! callers can override any subset from JSON before building an engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::parse_hex_color;
use crate::settings::Difficulty;

/// AI opponent tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiTier {
    /// Max paddle travel per tick (pixels)
    pub speed: f32,
    /// 1.0 = perfect prediction, 0.0 = up to ±50 px of noise
    pub accuracy: f32,
}

impl AiTier {
    pub const fn new(speed: f32, accuracy: f32) -> Self {
        Self { speed, accuracy }
    }

    /// Full width of the prediction noise band in pixels
    pub fn noise_span(&self) -> f32 {
        (1.0 - self.accuracy) * AI_NOISE_SCALE
    }
}

/// AI tiers indexed by difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTiers {
    pub easy: AiTier,
    pub medium: AiTier,
    pub hard: AiTier,
}

impl Default for AiTiers {
    fn default() -> Self {
        Self {
            easy: AiTier::new(AI_EASY.0, AI_EASY.1),
            medium: AiTier::new(AI_MEDIUM.0, AI_MEDIUM.1),
            hard: AiTier::new(AI_HARD.0, AI_HARD.1),
        }
    }
}

impl AiTiers {
    pub fn get(&self, difficulty: Difficulty) -> AiTier {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub winning_score: u32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,

    pub ball_size: f32,
    /// Serve speed; `update_settings` changes this for later serves
    pub ball_speed: f32,
    pub ball_color: String,

    pub ai: AiTiers,

    pub score_pause_secs: f32,
    pub shake_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            winning_score: WINNING_SCORE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            ball_color: BALL_COLOR.to_string(),
            ai: AiTiers::default(),
            score_pause_secs: SCORE_PAUSE_SECS,
            shake_secs: SHAKE_SECS,
        }
    }
}

impl GameConfig {
    /// Build a config from a (possibly partial) JSON object; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization can't fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject configurations the engine can't honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::NonPositive("canvas size"));
        }
        if !(self.paddle_width > 0.0 && self.paddle_height > 0.0) {
            return Err(ConfigError::NonPositive("paddle size"));
        }
        if !(self.ball_size > 0.0) {
            return Err(ConfigError::NonPositive("ball size"));
        }
        if !(self.paddle_speed >= 0.0 && self.ball_speed >= 0.0) {
            return Err(ConfigError::NonPositive("speed"));
        }
        if self.paddle_height > self.canvas_height
            || self.paddle_width > self.canvas_width / 2.0
            || self.paddle_margin + self.paddle_width > self.canvas_width / 2.0
        {
            return Err(ConfigError::PaddleTooLarge);
        }
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        for (name, tier) in [
            ("easy", self.ai.easy),
            ("medium", self.ai.medium),
            ("hard", self.ai.hard),
        ] {
            if !(0.0..=1.0).contains(&tier.accuracy) || tier.speed < 0.0 {
                return Err(ConfigError::InvalidAiTier(name));
            }
        }
        if parse_hex_color(&self.ball_color).is_none() {
            return Err(ConfigError::InvalidColor(self.ball_color.clone()));
        }
        if self.score_pause_secs < 0.0 || self.shake_secs < 0.0 {
            return Err(ConfigError::NonPositive("timer duration"));
        }
        Ok(())
    }

    /// Left edge of player1's paddle in the fixed-x submodes
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// Left edge of player2's paddle in the fixed-x submodes
    pub fn right_paddle_x(&self) -> f32 {
        self.canvas_width - self.paddle_margin - self.paddle_width
    }

    /// Paddle y that centers it vertically
    pub fn centered_paddle_y(&self) -> f32 {
        (self.canvas_height - self.paddle_height) / 2.0
    }
}

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    NonPositive(&'static str),
    PaddleTooLarge,
    ZeroWinningScore,
    InvalidAiTier(&'static str),
    InvalidColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config JSON: {msg}"),
            Self::NonPositive(what) => write!(f, "{what} must be positive"),
            Self::PaddleTooLarge => write!(f, "paddle does not fit in its half of the court"),
            Self::ZeroWinningScore => write!(f, "winning score must be at least 1"),
            Self::InvalidAiTier(name) => write!(f, "AI tier '{name}' is out of range"),
            Self::InvalidColor(color) => write!(f, "'{color}' is not a #rrggbb or #rgb color"),
        }
    }
}

impl std::error::Error for ConfigError {}
