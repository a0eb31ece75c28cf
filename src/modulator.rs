use std::fmt;

use rand::Rng;

use crate::follower::ScalarGoalFollower;
use crate::newtonian::Newtonian;
use crate::shift_register::ShiftRegister;
use crate::spring::ScalarSpring;
use crate::types::{Interpolation, ValueRange};
use crate::wave::Wave;

/// Discriminant over the closed set of modulator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulatorKind {
    Wave,
    ScalarSpring,
    ScalarGoalFollower,
    Newtonian,
    ShiftRegister,
}

impl fmt::Display for ModulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            ModulatorKind::Wave => "Wave",
            ModulatorKind::ScalarSpring => "ScalarSpring",
            ModulatorKind::ScalarGoalFollower => "ScalarGoalFollower",
            ModulatorKind::Newtonian => "Newtonian",
            ModulatorKind::ShiftRegister => "ShiftRegister",
        };
        write!(f, "{}", label)
    }
}

/// Payload of one modulator kind. `ScalarGoalFollower` nests another
/// `Modulator` behind a box, so the sum type stays finitely sized.
#[derive(Debug, Clone)]
pub enum Source {
    Wave(Wave),
    ScalarSpring(ScalarSpring),
    ScalarGoalFollower(ScalarGoalFollower),
    Newtonian(Newtonian),
    ShiftRegister(ShiftRegister),
}

/// A named producer of a time-varying scalar. All kinds answer the same
/// eight operations; everything stochastic draws from the `Rng` handed
/// in by the caller.
#[derive(Debug, Clone)]
pub struct Modulator {
    name: String,
    pub source: Source,
}

impl Modulator {
    pub fn new(name: &str, source: Source) -> Modulator {
        if name.is_empty() {
            panic!("Modulator requires a non-empty name");
        }
        Modulator {
            name: name.to_string(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModulatorKind {
        match &self.source {
            Source::Wave(_) => ModulatorKind::Wave,
            Source::ScalarSpring(_) => ModulatorKind::ScalarSpring,
            Source::ScalarGoalFollower(_) => ModulatorKind::ScalarGoalFollower,
            Source::Newtonian(_) => ModulatorKind::Newtonian,
            Source::ShiftRegister(_) => ModulatorKind::ShiftRegister,
        }
    }

    /// Last computed output.
    pub fn value(&self) -> f32 {
        match &self.source {
            Source::Wave(w) => w.value,
            Source::ScalarSpring(s) => s.value,
            Source::ScalarGoalFollower(f) => f.follower.value(),
            Source::Newtonian(n) => n.value,
            Source::ShiftRegister(sr) => sr.value,
        }
    }

    /// Output bounds where the kind has meaningful ones; the unbounded
    /// kinds report an empty range.
    pub fn range(&self) -> ValueRange {
        match &self.source {
            Source::Wave(w) => w.range(),
            Source::ScalarSpring(s) => s.range(),
            Source::ScalarGoalFollower(f) => f.range(),
            Source::Newtonian(n) => n.range(),
            Source::ShiftRegister(sr) => sr.value_range,
        }
    }

    /// Current target. Kinds without target semantics report their value.
    pub fn goal(&self) -> f32 {
        match &self.source {
            Source::Wave(w) => w.value,
            Source::ScalarSpring(s) => s.goal,
            Source::ScalarGoalFollower(f) => f.follower.goal(),
            Source::Newtonian(n) => n.goal,
            Source::ShiftRegister(sr) => sr.value,
        }
    }

    /// Retargets the modulator. A no-op for the goalless kinds; a
    /// Newtonian starts a whole new move with freshly drawn parameters.
    pub fn set_goal(&mut self, goal: f32, rng: &mut impl Rng) {
        match &mut self.source {
            Source::Wave(_) => {}
            Source::ScalarSpring(s) => s.spring_to(goal),
            Source::ScalarGoalFollower(f) => f.follower.set_goal(goal, rng),
            Source::Newtonian(n) => n.move_to(goal, rng),
            Source::ShiftRegister(_) => {}
        }
    }

    /// Microseconds accumulated since construction or the last internal
    /// clock reset.
    pub fn elapsed_us(&self) -> u64 {
        match &self.source {
            Source::Wave(w) => w.time,
            Source::ScalarSpring(s) => s.time,
            Source::ScalarGoalFollower(f) => f.time,
            Source::Newtonian(n) => n.time,
            Source::ShiftRegister(sr) => sr.time,
        }
    }

    /// Advisory flag; advancing a disabled modulator is still permitted.
    pub fn enabled(&self) -> bool {
        match &self.source {
            Source::Wave(w) => w.enabled,
            Source::ScalarSpring(s) => s.enabled,
            Source::ScalarGoalFollower(f) => f.enabled,
            Source::Newtonian(n) => n.enabled,
            Source::ShiftRegister(sr) => sr.enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        match &mut self.source {
            Source::Wave(w) => w.enabled = enabled,
            Source::ScalarSpring(s) => s.enabled = enabled,
            Source::ScalarGoalFollower(f) => f.enabled = enabled,
            Source::Newtonian(n) => n.enabled = enabled,
            Source::ShiftRegister(sr) => sr.enabled = enabled,
        }
    }

    /// Integrates `dt` microseconds of motion.
    pub fn advance(&mut self, dt: u64, rng: &mut impl Rng) {
        match &mut self.source {
            Source::Wave(w) => w.advance(dt),
            Source::ScalarSpring(s) => s.advance(dt),
            Source::ScalarGoalFollower(f) => f.advance(dt, rng),
            Source::Newtonian(n) => n.advance(dt),
            Source::ShiftRegister(sr) => sr.advance(dt, rng),
        }
    }

    /// Snaps a spring to `goal` with zero velocity. Panics on any other
    /// kind.
    pub fn jump_to(&mut self, goal: f32) {
        match &mut self.source {
            Source::ScalarSpring(s) => s.jump_to(goal),
            _ => panic!(
                "jump_to requires a ScalarSpring, \"{}\" is a {}",
                self.name,
                self.kind()
            ),
        }
    }

    /// Forces a Newtonian to hold at `value` with no move in flight.
    /// Panics on any other kind.
    pub fn reset(&mut self, value: f32) {
        match &mut self.source {
            Source::Newtonian(n) => n.reset(value),
            _ => panic!(
                "reset requires a Newtonian, \"{}\" is a {}",
                self.name,
                self.kind()
            ),
        }
    }

    /// Full sweep duration of a shift register, in microseconds. Panics
    /// on any other kind.
    pub fn total_period_us(&self) -> u64 {
        match &self.source {
            Source::ShiftRegister(sr) => sr.total_period_us(),
            _ => panic!(
                "total_period_us requires a ShiftRegister, \"{}\" is a {}",
                self.name,
                self.kind()
            ),
        }
    }

    /// Single-bucket dwell time of a shift register, in microseconds.
    /// Panics on any other kind.
    pub fn bucket_period_us(&self) -> u64 {
        match &self.source {
            Source::ShiftRegister(sr) => sr.bucket_period_us(),
            _ => panic!(
                "bucket_period_us requires a ShiftRegister, \"{}\" is a {}",
                self.name,
                self.kind()
            ),
        }
    }
}

pub fn wave_modulator(name: &str, amplitude: f32, frequency: f32) -> Modulator {
    Modulator::new(name, Source::Wave(Wave::new(amplitude, frequency)))
}

pub fn scalar_spring(name: &str, smooth: f32, undamp: f32, initial: f32) -> Modulator {
    Modulator::new(
        name,
        Source::ScalarSpring(ScalarSpring::new(smooth, undamp, initial)),
    )
}

/// Wraps `follower` in a goal follower. Regions, thresholds and the
/// pause range are configured on the payload afterwards.
pub fn scalar_goal_follower(name: &str, follower: Modulator) -> Modulator {
    Modulator::new(
        name,
        Source::ScalarGoalFollower(ScalarGoalFollower::new(Box::new(follower))),
    )
}

pub fn newtonian(
    name: &str,
    speed_limit_range: ValueRange,
    acceleration_range: ValueRange,
    deceleration_range: ValueRange,
    initial: f32,
) -> Modulator {
    Modulator::new(
        name,
        Source::Newtonian(Newtonian::new(
            speed_limit_range,
            acceleration_range,
            deceleration_range,
            initial,
        )),
    )
}

/// Builds a shift register with `buckets` slots pre-filled from
/// `value_range`. Panics when `buckets` is zero.
pub fn shift_register(
    name: &str,
    buckets: usize,
    value_range: ValueRange,
    odds: f32,
    period: f32,
    interp: Interpolation,
    rng: &mut impl Rng,
) -> Modulator {
    Modulator::new(
        name,
        Source::ShiftRegister(ShiftRegister::new(
            buckets,
            value_range,
            odds,
            period,
            interp,
            rng,
        )),
    )
}
