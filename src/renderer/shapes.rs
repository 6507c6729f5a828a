//! Shape generation for 2D primitives
//!
//! All positions are in court pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::parse_hex_color;
use crate::sim::{FrameSnapshot, Paddle, Player};

/// Center line dash pattern (pixels)
const DASH_LENGTH: f32 = 10.0;
const DASH_GAP: f32 = 10.0;
const LINE_WIDTH: f32 = 2.0;
/// Max screen shake displacement (pixels)
const SHAKE_AMPLITUDE: f32 = 5.0;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Rectangle rotated about its center. `left`/`right` colors make a
/// horizontal gradient.
pub fn rotated_rect(
    center: Vec2,
    size: Vec2,
    angle: f32,
    left: [f32; 4],
    right: [f32; 4],
) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));

    let tl = corner(-half.x, -half.y);
    let tr = corner(half.x, -half.y);
    let bl = corner(-half.x, half.y);
    let br = corner(half.x, half.y);

    vec![
        Vertex::new(tl.x, tl.y, left),
        Vertex::new(bl.x, bl.y, left),
        Vertex::new(tr.x, tr.y, right),
        Vertex::new(tr.x, tr.y, right),
        Vertex::new(bl.x, bl.y, left),
        Vertex::new(br.x, br.y, right),
    ]
}

/// Dashed vertical line down the middle of the court
pub fn center_line(width: f32, height: f32) -> Vec<Vertex> {
    let x = width / 2.0;
    let mut vertices = Vec::new();
    let mut y = 0.0;
    while y < height {
        let len = DASH_LENGTH.min(height - y);
        vertices.extend(rotated_rect(
            Vec2::new(x, y + len / 2.0),
            Vec2::new(LINE_WIDTH, len),
            0.0,
            colors::CENTER_LINE,
            colors::CENTER_LINE,
        ));
        y += DASH_LENGTH + DASH_GAP;
    }
    vertices
}

/// Paddle with its tilt; the gradient runs from the court edge inward
pub fn paddle(paddle: &Paddle) -> Vec<Vertex> {
    let (left, right) = match paddle.owner {
        Player::Player1 => (colors::PADDLE_INNER, colors::PADDLE_OUTER),
        Player::Player2 => (colors::PADDLE_OUTER, colors::PADDLE_INNER),
    };
    rotated_rect(
        paddle.center(),
        Vec2::new(paddle.width, paddle.height),
        paddle.tilt.to_radians(),
        left,
        right,
    )
}

/// Deterministic shake offset for a frame number
pub fn shake_offset(frame: u64) -> Vec2 {
    let t = frame as f32;
    Vec2::new((t * 2.3).sin(), (t * 3.7).cos()) * SHAKE_AMPLITUDE
}

/// Build every vertex for one frame
pub fn frame(snapshot: &FrameSnapshot, frame: u64) -> Vec<Vertex> {
    let mut vertices = center_line(snapshot.canvas_size.x, snapshot.canvas_size.y);
    for p in &snapshot.paddles {
        vertices.extend(paddle(p));
    }

    let ball_color = parse_hex_color(&snapshot.ball.color).unwrap_or(colors::BALL_FALLBACK);
    vertices.extend(circle(snapshot.ball.pos, snapshot.ball.size, ball_color, 24));

    if snapshot.shaking {
        let offset = shake_offset(frame);
        for v in &mut vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
        }
    }

    vertices
}
