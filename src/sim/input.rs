//! Input snapshot and key bindings
//!
//! The driver collects key and pointer state between frames; the engine
//! reads one snapshot per tick.

use serde::{Deserialize, Serialize};

use super::state::{Paddle, Player};
use crate::settings::PvpMode;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    W,
    S,
    A,
    D,
    Q,
    E,
    I,
    K,
    J,
    L,
    U,
    O,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value; letters match in either case
    pub fn from_key_str(key: &str) -> Option<Self> {
        if key == "Escape" {
            return Some(Key::Escape);
        }
        let mut chars = key.chars();
        let c = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }
        Some(match c {
            'w' => Key::W,
            's' => Key::S,
            'a' => Key::A,
            'd' => Key::D,
            'q' => Key::Q,
            'e' => Key::E,
            'i' => Key::I,
            'k' => Key::K,
            'j' => Key::J,
            'l' => Key::L,
            'u' => Key::U,
            'o' => Key::O,
            _ => return None,
        })
    }

    fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Per-player key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub tilt_up: Key,
    pub tilt_down: Key,
}

impl KeyBindings {
    pub const PLAYER1: Self = Self {
        up: Key::W,
        down: Key::S,
        left: Key::A,
        right: Key::D,
        tilt_up: Key::Q,
        tilt_down: Key::E,
    };

    pub const PLAYER2: Self = Self {
        up: Key::I,
        down: Key::K,
        left: Key::J,
        right: Key::L,
        tilt_up: Key::U,
        tilt_down: Key::O,
    };

    pub fn for_player(player: Player) -> Self {
        match player {
            Player::Player1 => Self::PLAYER1,
            Player::Player2 => Self::PLAYER2,
        }
    }
}

/// Bitset of held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet(u16);

impl KeySet {
    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Input state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys: KeySet,
    /// Pointer y relative to the play surface; `None` when unknown
    pub pointer_y: Option<f32>,
}

impl InputSnapshot {
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut snapshot = Self::default();
        for &key in keys {
            snapshot.keys.press(key);
        }
        snapshot
    }

    pub fn with_pointer(pointer_y: f32) -> Self {
        Self {
            pointer_y: Some(pointer_y).filter(|y| y.is_finite()),
            ..Self::default()
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    /// Record a DOM key event; unknown keys are ignored
    pub fn key_event(&mut self, key: &str, down: bool) {
        if let Some(key) = Key::from_key_str(key) {
            if down {
                self.keys.press(key);
            } else {
                self.keys.release(key);
            }
        }
    }
}

/// Apply one tick of keyboard movement to `paddle` under `mode`.
/// Bounds are not enforced here; the engine constrains afterwards.
pub fn apply_keyboard(paddle: &mut Paddle, input: &InputSnapshot, mode: PvpMode, speed: f32) {
    let keys = KeyBindings::for_player(paddle.owner);

    if input.is_down(keys.up) {
        paddle.pos.y -= speed;
    }
    if input.is_down(keys.down) {
        paddle.pos.y += speed;
    }

    match mode {
        PvpMode::Default => {}
        PvpMode::Horizontal => {
            if input.is_down(keys.left) {
                paddle.pos.x -= speed;
            }
            if input.is_down(keys.right) {
                paddle.pos.x += speed;
            }
        }
        PvpMode::Tilting => {
            if input.is_down(keys.tilt_up) {
                paddle.tilt_by(-1.0);
            }
            if input.is_down(keys.tilt_down) {
                paddle.tilt_by(1.0);
            }
        }
    }
}

/// Mouse control: center the paddle on the pointer, no smoothing
pub fn apply_pointer(paddle: &mut Paddle, input: &InputSnapshot) {
    if let Some(y) = input.pointer_y {
        paddle.pos.y = y - paddle.height / 2.0;
    }
}
