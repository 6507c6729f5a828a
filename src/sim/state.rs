//! Entity state and simulation types
//!
//! Ball, paddles, scoreboard, and the events a tick can report.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{MAX_TILT, TILT_STEP};
use crate::settings::GameMode;

/// Current phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Before `start_game` (menu showing)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Waiting out the pause after a point
    Paused,
    /// A player reached the winning score
    GameOver,
}

/// Paddle owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Left side
    Player1,
    /// Right side (the computer in PvC)
    Player2,
}

impl Player {
    /// Horizontal direction a ball leaves this player's paddle
    pub fn serve_direction(&self) -> f32 {
        match self {
            Player::Player1 => 1.0,
            Player::Player2 => -1.0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Radius; also the half extent used for paddle overlap tests
    pub size: f32,
    pub color: String,
}

impl Ball {
    /// Ball at the center of the court, moving diagonally at the configured speed
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.canvas_width / 2.0, config.canvas_height / 2.0),
            vel: Vec2::splat(config.ball_speed),
            size: config.ball_size,
            color: config.ball_color.clone(),
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rescale velocity to `speed` keeping direction. A stationary ball has
    /// no direction, so it stays put.
    pub fn set_speed(&mut self, speed: f32) {
        let current = self.speed();
        if current > 0.0 {
            self.vel *= speed / current;
        }
    }
}

/// A paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub owner: Player,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees, within ±MAX_TILT
    pub tilt: f32,
}

impl Paddle {
    /// Paddle at its home position (side margin, vertically centered)
    pub fn new(owner: Player, config: &GameConfig) -> Self {
        let x = match owner {
            Player::Player1 => config.left_paddle_x(),
            Player::Player2 => config.right_paddle_x(),
        };
        Self {
            owner,
            pos: Vec2::new(x, config.centered_paddle_y()),
            width: config.paddle_width,
            height: config.paddle_height,
            tilt: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Rotate by one tilt step; `direction` is -1 (up) or 1 (down)
    pub fn tilt_by(&mut self, direction: f32) {
        self.tilt = (self.tilt + direction * TILT_STEP).clamp(-MAX_TILT, MAX_TILT);
    }

    /// Keep the paddle inside [0, canvas_height - height]
    pub fn clamp_y(&mut self, canvas_height: f32) {
        self.pos.y = self.pos.y.clamp(0.0, (canvas_height - self.height).max(0.0));
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player1: u32,
    pub player2: u32,
}

impl Scoreboard {
    pub fn award(&mut self, player: Player) {
        match player {
            Player::Player1 => self.player1 += 1,
            Player::Player2 => self.player2 += 1,
        }
    }

    /// Either side has reached the winning score
    pub fn has_winner(&self, winning_score: u32) -> bool {
        self.player1 >= winning_score || self.player2 >= winning_score
    }

    /// Player 1 wins only on a strictly higher score; anything else goes to
    /// the right-hand side (Player 2, or the computer in PvC).
    pub fn winner(&self, mode: GameMode) -> Winner {
        if self.player1 > self.player2 {
            Winner::Player1
        } else {
            match mode {
                GameMode::PvP => Winner::Player2,
                GameMode::PvC => Winner::Computer,
            }
        }
    }
}

/// Who won the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
    Computer,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player1 => write!(f, "Player 1"),
            Winner::Player2 => write!(f, "Player 2"),
            Winner::Computer => write!(f, "Computer"),
        }
    }
}

/// Final result handed to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub winner: Winner,
    pub player1_score: u32,
    pub player2_score: u32,
}

/// Something that happened during a tick (or a lifecycle call)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `start_game` served the first ball
    GameStarted,
    /// Ball bounced off the top or bottom edge
    WallHit,
    /// Ball bounced off a paddle
    PaddleHit { player: Player },
    /// Ball left the court; `scorer` gets the point
    Score { scorer: Player, scores: Scoreboard },
    /// Pause window ended and a new ball was served
    Resumed,
    /// Score-shake window ended
    ShakeEnded,
    /// Match finished
    GameOver(GameOverReport),
}

/// What a single tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    /// Phase after the tick
    pub phase: GamePhase,
    /// Scores after the tick (reported every frame)
    pub scores: Scoreboard,
}

impl TickResult {
    pub fn game_over(&self) -> Option<GameOverReport> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver(report) => Some(*report),
            _ => None,
        })
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub ball: Ball,
    pub paddles: [Paddle; 2],
    pub scores: Scoreboard,
    pub phase: GamePhase,
    /// Inside the post-score shake window
    pub shaking: bool,
    pub canvas_size: Vec2,
}
