//! One-shot startup delay before the first digital-twin frame.
//!
//! Time only advances through [`LoadingGate::tick`]; there is no clock access.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Pending,
    Ready,
    /// The view went away before the delay elapsed.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingGate {
    delay: f64,
    elapsed: f64,
    state: LoadingState,
}

impl LoadingGate {
    pub fn new(delay_secs: f64) -> Self {
        let delay = if delay_secs.is_finite() {
            delay_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            delay,
            elapsed: 0.0,
            state: if delay == 0.0 {
                LoadingState::Ready
            } else {
                LoadingState::Pending
            },
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadingState::Ready
    }

    /// Fraction of the delay that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.state {
            LoadingState::Ready => 1.0,
            _ if self.delay == 0.0 => 1.0,
            _ => (self.elapsed / self.delay).clamp(0.0, 1.0),
        }
    }

    /// Advances time by `dt` seconds. Returns `true` only on the tick that fires.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state != LoadingState::Pending || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.state = LoadingState::Ready;
            return true;
        }
        false
    }

    /// Cancels a pending gate. A gate that already fired stays ready.
    pub fn cancel(&mut self) {
        if self.state == LoadingState::Pending {
            self.state = LoadingState::Cancelled;
        }
    }
}
