use rand::Rng;

use crate::types::{AgeRange, Interpolation, ValueRange};

/// Cyclic sequence of value buckets swept by a playhead with a fixed
/// period. Each time the playhead leaves a bucket, the bucket it just
/// left may be regenerated with probability `odds`, biased upward by the
/// bucket's age when an age window is set. Output between bucket centers
/// follows the configured interpolation.
#[derive(Debug, Clone)]
pub struct ShiftRegister {
    pub buckets: Vec<f32>,
    /// Playhead visits since each bucket was last regenerated. Always
    /// parallel to `buckets`.
    pub value_ages: Vec<u32>,
    pub value_range: ValueRange,
    pub odds: f32,
    pub age_range: AgeRange,
    /// Seconds for one full sweep of all buckets.
    pub period: f32,
    pub interp: Interpolation,
    pub time: u64,
    pub value: f32,
    pub enabled: bool,
}

impl ShiftRegister {
    pub fn new(
        buckets: usize,
        value_range: ValueRange,
        odds: f32,
        period: f32,
        interp: Interpolation,
        rng: &mut impl Rng,
    ) -> ShiftRegister {
        if buckets == 0 {
            panic!("ShiftRegister requires at least one bucket");
        }
        let buckets: Vec<f32> = (0..buckets).map(|_| value_range.sample(rng)).collect();
        let value = buckets[0];
        ShiftRegister {
            value_ages: vec![0; buckets.len()],
            buckets,
            value_range,
            odds,
            age_range: AgeRange::DISABLED,
            period,
            interp,
            time: 0,
            value,
            enabled: true,
        }
    }

    /// Duration of one full sweep, in microseconds.
    pub fn total_period_us(&self) -> u64 {
        (self.period * 1_000_000.0) as u64
    }

    /// Time the playhead spends on one bucket, in microseconds.
    pub fn bucket_period_us(&self) -> u64 {
        self.total_period_us() / self.buckets.len() as u64
    }

    fn next_bucket(&self, index: usize) -> usize {
        if index + 1 < self.buckets.len() {
            index + 1
        } else {
            0
        }
    }

    fn previous_bucket(&self, index: usize) -> usize {
        let n = self.buckets.len();
        if index > 0 && index < n {
            index - 1
        } else {
            n - 1
        }
    }

    /// Regeneration probability for the bucket at `index`: the base odds
    /// clamped to [0, 1], pushed toward 1 as the bucket ages through the
    /// age window.
    fn regeneration_odds(&self, index: usize) -> f32 {
        let mut odds = self.odds.clamp(0.0, 1.0);
        let age = self.value_ages[index];
        if self.age_range.enabled() && age >= self.age_range.min {
            let t = ((age - self.age_range.min) as f32
                / (self.age_range.max - self.age_range.min) as f32)
                .min(1.0);
            odds += (1.0 - odds) * t;
        }
        odds
    }

    pub fn advance(&mut self, dt: u64, rng: &mut impl Rng) {
        let n = self.buckets.len();
        let p = self.total_period_us();
        let bp = self.bucket_period_us();
        if p == 0 || bp == 0 {
            self.time += dt;
            return;
        }

        let pt = self.time % p;
        let mut bi = ((pt / bp) as usize).min(n - 1);
        let bt = pt - bp * bi as u64;
        let crossings = (bt + dt) / bp;

        for _ in 0..crossings {
            let bh = self.previous_bucket(bi);
            if rng.gen::<f32>() < self.regeneration_odds(bh) {
                self.buckets[bh] = self.value_range.sample(rng);
                self.value_ages[bh] = 0;
            } else {
                self.value_ages[bh] += 1;
            }
            bi = self.next_bucket(bi);
        }

        self.time += dt;
        let pt = self.time % p;
        let bi = ((pt / bp) as usize).min(n - 1);
        let bt = pt - bp * bi as u64;
        let tt = bt as f32 / bp as f32;

        self.value = match self.interp {
            Interpolation::Quadratic => {
                let bh = self.previous_bucket(bi);
                let bj = self.next_bucket(bi);
                let v1 = self.buckets[bi];
                let v0 = (self.buckets[bh] + v1) * 0.5;
                let v2 = (self.buckets[bj] + v1) * 0.5;
                let a0 = v0 + (v1 - v0) * tt;
                let a1 = v1 + (v2 - v1) * tt;
                a0 + (a1 - a0) * tt
            }
            Interpolation::Linear => {
                let v0 = self.buckets[bi];
                let v1 = self.buckets[self.next_bucket(bi)];
                v0 + (v1 - v0) * tt
            }
            Interpolation::None => self.buckets[bi],
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_register(interp: Interpolation) -> ShiftRegister {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = ShiftRegister::new(4, ValueRange::new(0.0, 1.0), 0.0, 1.0, interp, &mut rng);
        sr.buckets = vec![0.1, 0.2, 0.3, 0.4];
        sr.value = sr.buckets[0];
        sr
    }

    #[test]
    fn test_playhead_steps_through_buckets() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = fixed_register(Interpolation::None);

        sr.advance(0, &mut rng);
        assert_eq!(sr.value, 0.1);
        sr.advance(250_000, &mut rng);
        assert_eq!(sr.value, 0.2);
        sr.advance(500_000, &mut rng);
        assert_eq!(sr.value, 0.4);
    }

    #[test]
    fn test_linear_interpolation_midpoint() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = fixed_register(Interpolation::Linear);

        sr.advance(125_000, &mut rng);
        assert!(
            (sr.value - 0.15).abs() < 1e-6,
            "expected halfway between buckets 0 and 1, got {}",
            sr.value
        );
    }

    #[test]
    fn test_quadratic_interpolation_at_bucket_center() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = fixed_register(Interpolation::Quadratic);

        // at a bucket boundary tt == 0, so output is the midpoint of the
        // previous and current bucket
        sr.advance(250_000, &mut rng);
        assert!(((0.1 + 0.2) * 0.5 - sr.value).abs() < 1e-6);
    }

    #[test]
    fn test_zero_odds_never_regenerates() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = fixed_register(Interpolation::None);
        let snapshot = sr.buckets.clone();

        for _ in 0..40 {
            sr.advance(250_000, &mut rng);
        }
        assert_eq!(sr.buckets, snapshot);
        // ten full sweeps, one visit per bucket per sweep
        assert_eq!(sr.value_ages, vec![10, 10, 10, 10]);
    }

    #[test]
    fn test_certain_odds_regenerates_every_visit() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = fixed_register(Interpolation::None);
        sr.odds = 1.0;
        sr.value_ages = vec![5, 5, 5, 5];

        sr.advance(1_000_000, &mut rng);
        assert_eq!(sr.value_ages, vec![0, 0, 0, 0]);
        for (i, b) in sr.buckets.iter().enumerate() {
            assert!(
                *b >= 0.0 && *b < 1.0,
                "bucket {} regenerated outside its value range: {}",
                i,
                b
            );
        }
    }

    #[test]
    fn test_aging_forces_regeneration() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sr = ShiftRegister::new(
            2,
            ValueRange::new(0.0, 1.0),
            0.0,
            1.0,
            Interpolation::None,
            &mut rng,
        );
        sr.age_range = AgeRange::new(0, 1);

        // first sweep: ages are 0, interpolant is 0, nothing regenerates
        sr.advance(1_000_000, &mut rng);
        assert_eq!(sr.value_ages, vec![1, 1]);

        // second sweep: ages reached the window top, odds saturate at 1
        sr.advance(1_000_000, &mut rng);
        assert_eq!(sr.value_ages, vec![0, 0]);
    }

    #[test]
    fn test_output_stays_in_value_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sr = ShiftRegister::new(
            8,
            ValueRange::new(-3.0, 3.0),
            0.5,
            0.8,
            Interpolation::Linear,
            &mut rng,
        );
        for _ in 0..300 {
            sr.advance(33_000, &mut rng);
            assert!(sr.value >= -3.0 && sr.value <= 3.0);
        }
    }

    #[test]
    fn test_ages_stay_parallel_to_buckets() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sr = ShiftRegister::new(
            5,
            ValueRange::new(0.0, 1.0),
            0.3,
            0.25,
            Interpolation::Quadratic,
            &mut rng,
        );
        for _ in 0..100 {
            sr.advance(90_000, &mut rng);
            assert_eq!(sr.buckets.len(), sr.value_ages.len());
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_buckets_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        ShiftRegister::new(
            0,
            ValueRange::new(0.0, 1.0),
            0.0,
            1.0,
            Interpolation::None,
            &mut rng,
        );
    }

    #[test]
    fn test_degenerate_period_only_accumulates_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sr = ShiftRegister::new(
            4,
            ValueRange::new(0.0, 1.0),
            1.0,
            0.0,
            Interpolation::Linear,
            &mut rng,
        );
        let value = sr.value;
        sr.advance(500_000, &mut rng);
        assert_eq!(sr.time, 500_000);
        assert_eq!(sr.value, value);
    }
}
