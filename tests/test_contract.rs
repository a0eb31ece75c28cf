mod common;

use modulators::modulator::ModulatorKind;

#[test]
fn test_elapsed_is_monotonic() {
    let mut rng = common::test_rng();
    for mut m in common::one_of_each(&mut rng) {
        let mut last = m.elapsed_us();
        for dt in [0, 1, 1_000, 16_667, 250_000, 0, 33_333] {
            m.advance(dt, &mut rng);
            assert!(
                m.elapsed_us() >= last,
                "{} elapsed went backwards",
                m.name()
            );
            last = m.elapsed_us();
        }
    }
}

#[test]
fn test_zero_advance_keeps_time_and_value() {
    let mut rng = common::test_rng();
    for mut m in common::one_of_each(&mut rng) {
        m.advance(40_000, &mut rng);
        let time = m.elapsed_us();
        let value = m.value();
        m.advance(0, &mut rng);
        assert_eq!(m.elapsed_us(), time, "{} accumulated time from dt=0", m.name());
        assert!(
            (m.value() - value).abs() < 1e-6,
            "{} moved on dt=0: {} -> {}",
            m.name(),
            value,
            m.value()
        );
    }
}

#[test]
fn test_enabled_round_trips() {
    let mut rng = common::test_rng();
    for mut m in common::one_of_each(&mut rng) {
        assert!(m.enabled(), "{} should start enabled", m.name());
        m.set_enabled(false);
        assert!(!m.enabled());
        m.set_enabled(true);
        assert!(m.enabled());
    }
}

#[test]
fn test_bounded_kinds_respect_range() {
    let mut rng = common::test_rng();
    for mut m in common::one_of_each(&mut rng) {
        let bounded = matches!(
            m.kind(),
            ModulatorKind::Wave | ModulatorKind::ShiftRegister
        );
        if !bounded {
            continue;
        }
        let range = m.range();
        for _ in 0..200 {
            m.advance(17_000, &mut rng);
            assert!(
                m.value() >= range.min && m.value() <= range.max,
                "{} value {} escaped [{}, {}]",
                m.name(),
                m.value(),
                range.min,
                range.max
            );
        }
    }
}

#[test]
fn test_names_are_stable() {
    let mut rng = common::test_rng();
    for mut m in common::one_of_each(&mut rng) {
        let name = m.name().to_string();
        m.advance(100_000, &mut rng);
        m.set_goal(1.0, &mut rng);
        assert_eq!(m.name(), name);
    }
}
