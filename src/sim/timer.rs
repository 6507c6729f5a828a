//! One-shot timers on a virtual clock
//!
//! Time only moves when the engine advances it with the tick's `dt`, so
//! tests run pause windows without sleeping. Every handle carries the
//! scheduler epoch; `cancel_all` starts a new epoch so nothing scheduled
//! before a reset can fire after it.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End the post-score pause (serve again or finish the match)
    ResumeAfterScore,
    /// Clear the screen shake flag
    EndShake,
}

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    epoch: u64,
    id: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    kind: TimerKind,
    due: f64,
}

/// Slack for float accumulation of per-frame dt
const DUE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct Timers {
    now: f64,
    epoch: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` once, `delay_secs` from now
    pub fn schedule(&mut self, kind: TimerKind, delay_secs: f32) -> TimerHandle {
        let handle = TimerHandle {
            epoch: self.epoch,
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            kind,
            due: self.now + delay_secs.max(0.0) as f64,
        });
        handle
    }

    /// Drop every pending timer and invalidate all outstanding handles
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.epoch += 1;
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        handle.epoch == self.epoch && self.pending.iter().any(|p| p.handle == handle)
    }

    /// Move the clock forward and return the timers that came due, earliest first
    pub fn advance(&mut self, dt: f32) -> Vec<TimerKind> {
        self.now += dt.max(0.0) as f64;

        let now = self.now;
        let mut fired: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now + DUE_EPSILON {
                fired.push(p.clone());
                false
            } else {
                true
            }
        });
        fired.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.handle.id.cmp(&b.handle.id)));
        fired.into_iter().map(|p| p.kind).collect()
    }
}
