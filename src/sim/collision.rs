//! Collision detection and response
//!
//! Axis-aligned overlap between the ball's square bounds and a paddle, the
//! paddle bounce with its "english", and the top/bottom wall bounce.

use super::state::{Ball, Paddle};
use crate::consts::{DEFLECTION_SCALE, PADDLE_HIT_SPEEDUP, TILT_DEFLECTION};

/// Whether the ball's bounding box overlaps the paddle (strict inequalities)
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x - ball.size < paddle.pos.x + paddle.width
        && ball.pos.x + ball.size > paddle.pos.x
        && ball.pos.y - ball.size < paddle.pos.y + paddle.height
        && ball.pos.y + ball.size > paddle.pos.y
}

/// Where along the paddle the ball hit: 0 at the top edge, 1 at the bottom.
///
/// Not clamped: a ball overlapping past a paddle end yields values outside
/// [0, 1] and a correspondingly steeper return.
pub fn hit_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.pos.y - paddle.pos.y) / paddle.height
}

/// Bounce the ball off `paddle`.
///
/// Sends the ball toward the opponent, moves it clear of the paddle face,
/// replaces dy with the offset-based deflection (plus tilt when enabled) and
/// speeds both components up.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle, tilt_enabled: bool) {
    let direction = paddle.owner.serve_direction();
    ball.vel.x = ball.vel.x.abs() * direction;
    ball.pos.x = if direction > 0.0 {
        paddle.pos.x + paddle.width + ball.size
    } else {
        paddle.pos.x - ball.size
    };

    ball.vel.y = (hit_offset(ball, paddle) - 0.5) * DEFLECTION_SCALE;
    if tilt_enabled {
        ball.vel.y += paddle.tilt * TILT_DEFLECTION;
    }

    ball.vel *= PADDLE_HIT_SPEEDUP;
}

/// Reflect off the top/bottom edge. Returns true if the ball was out of
/// [0, height]; the ball is pulled back onto the edge and sent inward so a
/// fast ball can't stay outside and flip direction every tick.
pub fn wall_bounce(ball: &mut Ball, height: f32) -> bool {
    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.pos.y > height {
        ball.pos.y = height;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}
