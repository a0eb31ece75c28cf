use std::env;
use std::fs;
use std::process;

use log::{debug, info};
use rand::thread_rng;

use modulators::environment::Registry;
use modulators::modulator::{
    newtonian, scalar_goal_follower, scalar_spring, shift_register, wave_modulator, Source,
};
use modulators::patch::PatchSet;
use modulators::time::micros_to_secs;
use modulators::types::{Interpolation, ValueRange};

/// 60Hz driver tick.
const STEP_US: u64 = 16_667;
const DEFAULT_STEPS: u64 = 180;

fn default_registry(rng: &mut impl rand::Rng) -> Registry {
    let mut registry = Registry::new();

    registry.add_modulator("env1", wave_modulator("wave_1", 1.0, 0.5));
    registry.add_modulator("env1", scalar_spring("spring_1", 1.0, 1.0, 1.0));

    let mut follow = scalar_goal_follower("follow_1", scalar_spring("follow_core", 0.3, 0.0, 0.0));
    if let Source::ScalarGoalFollower(f) = &mut follow.source {
        f.add_region(ValueRange::new(-1.0, 0.0));
        f.add_region(ValueRange::new(0.0, 1.0));
        f.pause_range = ValueRange::new(100_000.0, 400_000.0);
    }
    registry.add_modulator("env1", follow);

    registry.add_modulator(
        "env2",
        newtonian(
            "newtonian_1",
            ValueRange::new(0.5, 1.0),
            ValueRange::new(0.1, 1.0),
            ValueRange::new(0.1, 1.0),
            0.5,
        ),
    );

    registry.add_modulator(
        "env3",
        shift_register(
            "shift_1",
            8,
            ValueRange::new(0.0, 1.0),
            0.2,
            0.5,
            Interpolation::Quadratic,
            rng,
        ),
    );

    registry
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!(
            r#"Usage:
  modulators [patch.json] [steps]"#
        );
        process::exit(1);
    }

    let mut rng = thread_rng();
    let mut registry = match args.get(1) {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Could not read patch file {}: {}", path, e);
                process::exit(1);
            });
            let patch = PatchSet::from_json(&text).unwrap_or_else(|e| {
                eprintln!("Could not parse patch file {}: {}", path, e);
                process::exit(1);
            });
            let mut registry = Registry::new();
            patch.build(&mut registry, &mut rng);
            registry
        }
        None => default_registry(&mut rng),
    };

    let steps: u64 = match args.get(2) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("steps must be an integer, got {}", raw);
            process::exit(1);
        }),
        None => DEFAULT_STEPS,
    };

    for env in registry.environments() {
        info!("environment \"{}\": {} modulators", env.name(), env.len());
        for m in env.modulators() {
            info!(
                "  {} \"{}\" value {:.4} range [{}, {}]",
                m.kind(),
                m.name(),
                m.value(),
                m.range().min,
                m.range().max
            );
        }
    }

    for step in 0..steps {
        for env in registry.environments_mut() {
            for m in env.modulators_mut() {
                m.advance(STEP_US, &mut rng);
            }
        }

        if step % 30 == 0 {
            let t = micros_to_secs(step * STEP_US);
            println!("t = {:.2}s", t);
            for env in registry.environments() {
                for m in env.modulators() {
                    println!("  {:<12} {:<12} {:>10.4}", env.name(), m.name(), m.value());
                    debug!(
                        "{}/{} goal {:.4} elapsed {}us",
                        env.name(),
                        m.name(),
                        m.goal(),
                        m.elapsed_us()
                    );
                }
            }
        }
    }
}
