use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::environment::Registry;
use crate::modulator::{
    newtonian, scalar_goal_follower, scalar_spring, shift_register, wave_modulator, Modulator,
    Source,
};
use crate::types::{Interpolation, ValueRange};

/// Construction parameters for one modulator, as written in a patch
/// file. Patches describe how to build a modulator, never its live
/// state; building the same patch twice yields two independent
/// instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModulatorPatch {
    Wave {
        name: String,
        amplitude: f32,
        frequency: f32,
    },
    ScalarSpring {
        name: String,
        smooth: f32,
        undamp: f32,
        initial: f32,
    },
    Newtonian {
        name: String,
        speed_limit: ValueRange,
        acceleration: ValueRange,
        deceleration: ValueRange,
        initial: f32,
    },
    ShiftRegister {
        name: String,
        buckets: usize,
        value_range: ValueRange,
        odds: f32,
        period: f32,
        interp: Interpolation,
    },
    GoalFollower {
        name: String,
        follower: Box<ModulatorPatch>,
        regions: Vec<ValueRange>,
        #[serde(default)]
        random_region: bool,
        #[serde(default)]
        pause_range: ValueRange,
    },
}

impl ModulatorPatch {
    /// Instantiates the described modulator, drawing any stochastic
    /// initial state from `rng`.
    pub fn build(&self, rng: &mut impl Rng) -> Modulator {
        match self {
            ModulatorPatch::Wave {
                name,
                amplitude,
                frequency,
            } => wave_modulator(name, *amplitude, *frequency),
            ModulatorPatch::ScalarSpring {
                name,
                smooth,
                undamp,
                initial,
            } => scalar_spring(name, *smooth, *undamp, *initial),
            ModulatorPatch::Newtonian {
                name,
                speed_limit,
                acceleration,
                deceleration,
                initial,
            } => newtonian(name, *speed_limit, *acceleration, *deceleration, *initial),
            ModulatorPatch::ShiftRegister {
                name,
                buckets,
                value_range,
                odds,
                period,
                interp,
            } => shift_register(name, *buckets, *value_range, *odds, *period, *interp, rng),
            ModulatorPatch::GoalFollower {
                name,
                follower,
                regions,
                random_region,
                pause_range,
            } => {
                let inner = follower.build(rng);
                let mut m = scalar_goal_follower(name, inner);
                if let Source::ScalarGoalFollower(f) = &mut m.source {
                    for region in regions {
                        f.add_region(*region);
                    }
                    f.random_region = *random_region;
                    f.pause_range = *pause_range;
                }
                m
            }
        }
    }
}

/// A set of environments with the modulators to populate them, the
/// JSON-facing shape consumed by the demo harness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    pub environments: HashMap<String, Vec<ModulatorPatch>>,
}

impl PatchSet {
    pub fn from_json(text: &str) -> serde_json::Result<PatchSet> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Builds every described modulator into `registry`.
    pub fn build(&self, registry: &mut Registry, rng: &mut impl Rng) {
        for (env_name, patches) in &self.environments {
            for patch in patches {
                registry.add_modulator(env_name, patch.build(rng));
            }
        }
    }
}
