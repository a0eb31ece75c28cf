use rand::rngs::StdRng;
use rand::SeedableRng;

use modulators::modulator::{
    newtonian, scalar_goal_follower, scalar_spring, shift_register, wave_modulator, Modulator,
};
use modulators::types::{Interpolation, ValueRange};

pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}

/// One modulator of every kind, for contract-wide assertions.
pub fn one_of_each(rng: &mut StdRng) -> Vec<Modulator> {
    vec![
        wave_modulator("wave", 1.0, 1.0),
        scalar_spring("spring", 0.25, 0.0, 0.0),
        scalar_goal_follower("follower", scalar_spring("inner", 0.0, 0.0, 0.0)),
        newtonian(
            "newtonian",
            ValueRange::new(0.5, 1.0),
            ValueRange::new(0.1, 1.0),
            ValueRange::new(0.1, 1.0),
            0.0,
        ),
        shift_register(
            "shift",
            4,
            ValueRange::new(0.0, 1.0),
            0.2,
            1.0,
            Interpolation::Linear,
            rng,
        ),
    ]
}
