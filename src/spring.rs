use crate::time::micros_to_secs;
use crate::types::ValueRange;

/// Smoothing cutoff below which the spring snaps straight to its goal.
const SNAP_SMOOTH: f32 = 1e-4;

/// Critically damped spring driving `value` toward `goal`, with an
/// optional `undamp` term that feeds velocity back in and lets the
/// motion overshoot or ring.
///
/// `smooth` is the response time in seconds; larger is lazier.
#[derive(Debug, Clone)]
pub struct ScalarSpring {
    pub smooth: f32,
    pub undamp: f32,
    pub goal: f32,
    pub value: f32,
    pub vel: f32,
    pub time: u64,
    pub enabled: bool,
}

impl ScalarSpring {
    pub fn new(smooth: f32, undamp: f32, initial: f32) -> ScalarSpring {
        ScalarSpring {
            smooth,
            undamp,
            goal: initial,
            value: initial,
            vel: 0.0,
            time: 0,
            enabled: true,
        }
    }

    /// Retargets the spring without disturbing position or velocity.
    pub fn spring_to(&mut self, goal: f32) {
        self.goal = goal;
    }

    /// Jumps straight to `goal` with zero velocity.
    pub fn jump_to(&mut self, goal: f32) {
        self.goal = goal;
        self.value = goal;
        self.vel = 0.0;
    }

    /// The spring is unbounded in principle.
    pub fn range(&self) -> ValueRange {
        ValueRange::default()
    }

    pub fn advance(&mut self, dt: u64) {
        self.time += dt;
        if self.smooth < SNAP_SMOOTH {
            self.value = self.goal;
            self.vel = 0.0;
            return;
        }

        let dt_s = micros_to_secs(dt);
        let omega = 2.0 / self.smooth;
        let x = omega * dt_s;
        let ex = 1.0 / x.exp();
        let ud = dt_s * self.undamp;

        let d = self.value - self.goal;
        let v = self.vel;
        let t = (v + omega * d) * dt_s;

        self.vel = (v - omega * t) * ex + v * ud;
        self.value = self.goal + (d + t) * ex;
    }
}
