use rand::Rng;

use crate::time::micros_to_secs;
use crate::types::ValueRange;

/// Substitute rate when an acceleration or deceleration draw is
/// effectively zero, so the phase ratio stays finite.
const NEAR_INSTANT: f32 = 1_000_000.0;

/// Cumulative phase boundaries of one move, in seconds from its start.
/// Always `acceleration <= sustain <= deceleration`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseTime {
    pub acceleration: f32,
    pub sustain: f32,
    pub deceleration: f32,
}

/// Kinematic motion toward a goal: accelerate to a speed limit, cruise,
/// then decelerate to arrive with zero velocity. Speed limit,
/// acceleration and deceleration are redrawn from their ranges on every
/// retarget, so repeated moves between the same points differ.
#[derive(Debug, Clone)]
pub struct Newtonian {
    pub speed_limit_range: ValueRange,
    pub acceleration_range: ValueRange,
    pub deceleration_range: ValueRange,
    pub goal: f32,
    pub value: f32,
    pub time: u64,
    pub enabled: bool,
    /// Instantaneous parameters of the move in flight. Signed along the
    /// travel direction: `s` and `a` carry the direction of travel while
    /// `d` opposes it.
    pub s: f32,
    pub a: f32,
    pub d: f32,
    /// Origin the current move started from.
    pub f: f32,
    pub phase: PhaseTime,
}

fn accelerate(a: f32, t: f32) -> f32 {
    a * t * t * 0.5
}

fn forward(s: f32, t: f32) -> f32 {
    s * t
}

impl Newtonian {
    pub fn new(
        speed_limit_range: ValueRange,
        acceleration_range: ValueRange,
        deceleration_range: ValueRange,
        initial: f32,
    ) -> Newtonian {
        Newtonian {
            speed_limit_range,
            acceleration_range,
            deceleration_range,
            goal: initial,
            value: initial,
            time: 0,
            enabled: true,
            s: 0.0,
            a: 0.0,
            d: 0.0,
            f: initial,
            phase: PhaseTime::default(),
        }
    }

    /// Forgets any move in flight and holds at `value`.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.goal = value;
        self.s = 0.0;
        self.a = 0.0;
        self.d = 0.0;
        self.f = value;
        self.phase = PhaseTime::default();
    }

    /// Starts a fresh move from the current position toward `goal`,
    /// drawing new speed/acceleration/deceleration parameters.
    pub fn move_to(&mut self, goal: f32, rng: &mut impl Rng) {
        self.time = 0;
        self.goal = goal;
        self.s = self.speed_limit_range.sample(rng);
        self.a = self.acceleration_range.sample(rng);
        self.d = self.deceleration_range.sample(rng);
        self.f = self.value;
        self.calculate_events();
    }

    /// Solves the phase boundary times for the drawn parameters.
    ///
    /// The acceleration time comes from covering the full distance with
    /// accel and decel alone; if the speed peak would exceed the limit,
    /// the profile is truncated and a sustain segment absorbs the rest.
    fn calculate_events(&mut self) {
        let x = (self.goal - self.f).abs();

        let a = if self.a > f32::EPSILON {
            self.a
        } else {
            NEAR_INSTANT
        };
        let d = if self.d > f32::EPSILON {
            self.d
        } else {
            NEAR_INSTANT
        };
        let r = a / d;

        self.phase.acceleration = (x * 2.0 / (a * (1.0 + r))).sqrt();

        let mut v = a * self.phase.acceleration;
        if v > self.s {
            v = self.s;
            self.phase.acceleration = self.s / a;
        } else {
            self.s = v;
        }

        let decel_duration = self.phase.acceleration * r;
        let d0 = self.phase.acceleration * self.phase.acceleration * a * 0.5;
        let d2 = decel_duration * decel_duration * d * 0.5;
        let sustain_duration = if v > f32::EPSILON {
            ((x - d0 - d2) / v).max(0.0)
        } else {
            0.0
        };

        if self.goal > self.f {
            self.a = a;
            self.d = -d;
        } else {
            self.s = -self.s;
            self.a = -a;
            self.d = d;
        }

        self.phase.sustain = self.phase.acceleration + sustain_duration;
        self.phase.deceleration = self.phase.sustain + decel_duration;
    }

    /// Phase boundaries never bound the output, so the advertised range
    /// is empty.
    pub fn range(&self) -> ValueRange {
        ValueRange::default()
    }

    pub fn advance(&mut self, dt: u64) {
        self.time += dt;
        let t = micros_to_secs(self.time);
        let pa = self.phase.acceleration;
        let ps = self.phase.sustain;
        let pd = self.phase.deceleration;

        self.value = self.f + accelerate(self.a, t.min(pa));
        if t > pa {
            self.value += forward(self.s, t.min(pd) - pa);
            if t > ps {
                self.value += accelerate(self.d, t.min(pd) - ps);
            }
        }
    }
}
