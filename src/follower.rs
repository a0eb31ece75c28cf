use rand::Rng;

use crate::modulator::Modulator;
use crate::time::micros_to_secs;
use crate::types::ValueRange;

/// Drives an owned inner modulator between goals drawn from a list of
/// regions, pausing between arrivals. Regions are visited cyclically or
/// at random; each arrival draws a pause from `pause_range`, read as
/// microseconds, before the next goal is set.
#[derive(Debug, Clone)]
pub struct ScalarGoalFollower {
    pub regions: Vec<ValueRange>,
    pub random_region: bool,
    /// Positional slack for the arrival test.
    pub threshold: f32,
    /// Velocity slack for the arrival test, in units per second.
    pub vel_threshold: f32,
    /// Pause between arrivals, in microseconds.
    pub pause_range: ValueRange,
    pub follower: Box<Modulator>,
    pub current_region: usize,
    pub paused_left: u64,
    pub time: u64,
    pub enabled: bool,
}

impl ScalarGoalFollower {
    pub fn new(follower: Box<Modulator>) -> ScalarGoalFollower {
        ScalarGoalFollower {
            regions: Vec::new(),
            random_region: false,
            threshold: 0.01,
            vel_threshold: 0.0001,
            pause_range: ValueRange::default(),
            follower,
            current_region: 0,
            paused_left: 0,
            time: 0,
            enabled: true,
        }
    }

    pub fn add_region(&mut self, region: ValueRange) {
        self.regions.push(region);
    }

    /// Union of all goal regions; empty when none are configured.
    pub fn range(&self) -> ValueRange {
        match self.regions.split_first() {
            Some((first, rest)) => rest.iter().fold(*first, |acc, r| acc.union(r)),
            None => ValueRange::default(),
        }
    }

    /// Picks the next region and sends the inner modulator toward a goal
    /// drawn from it. Does nothing while no regions are configured.
    fn set_new_goal(&mut self, rng: &mut impl Rng) {
        let n = self.regions.len();
        if n == 0 {
            return;
        }
        if self.random_region {
            self.current_region = rng.gen_range(0..n);
        } else if self.current_region + 1 < n {
            self.current_region += 1;
        } else {
            self.current_region = 0;
        }
        let goal = self.regions[self.current_region].sample(rng);
        self.follower.set_goal(goal, rng);
    }

    pub fn advance(&mut self, dt: u64, rng: &mut impl Rng) {
        self.time += dt;

        if self.paused_left > 0 {
            self.paused_left -= self.paused_left.min(dt);
        } else {
            let p0 = self.follower.value();
            self.follower.advance(dt, rng);
            let p1 = self.follower.value();
            let secs = micros_to_secs(dt);
            let vel = if secs > f32::MIN_POSITIVE {
                (p1 - p0) / secs
            } else {
                0.0
            };

            // Signed positional test: any position at or below |goal|
            // counts as arrived.
            if p1 - self.follower.goal().abs() > self.threshold || vel.abs() > self.vel_threshold {
                return;
            }
            self.paused_left = self.pause_range.sample(rng) as u64;
        }

        if self.paused_left == 0 {
            self.set_new_goal(rng);
        }
    }
}
