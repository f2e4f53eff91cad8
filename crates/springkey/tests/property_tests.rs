#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

use proptest::prelude::*;
use springkey::{
    Dialects, ImmediateScheduler, Particle, SpringParams, StopReason, build_descriptor, force,
    quantize, run_live, sample,
};

/// Spring constants inside the integrator's stable region: damping/mass in
/// `0.1..1.5` and stiffness/mass in `1..80`.
fn stable_spring() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.5f64..4.0, 0.1f64..1.5, 1.0f64..80.0)
        .prop_map(|(mass, c, w)| (mass, w * mass, c * mass))
}

// =============================================================================
// Sampler termination properties
// =============================================================================

proptest! {
    #[test]
    fn stable_springs_come_to_rest(
        (mass, stiffness, damping) in stable_spring(),
        x0 in -100.0f64..100.0,
        v0 in -100.0f64..100.0,
    ) {
        let curve = sample(x0, v0, mass, stiffness, damping);
        prop_assert!(
            curve.is_ok(),
            "did not settle: m={}, k={}, b={}, x0={}, v0={}, err={:?}",
            mass, stiffness, damping, x0, v0, curve
        );
    }

    #[test]
    fn curve_stops_exactly_one_step_before_rest(
        (mass, stiffness, damping) in stable_spring(),
        x0 in -50.0f64..50.0,
        v0 in -50.0f64..50.0,
    ) {
        let curve = sample(x0, v0, mass, stiffness, damping).unwrap();
        let params = SpringParams::new(stiffness, damping).unwrap();
        let mut particle = Particle::new(x0, v0, mass).unwrap();

        for (i, &expected) in curve.iter().enumerate() {
            let x = particle.step(&params);
            prop_assert_eq!(x, expected, "sample {} differs", i);
            prop_assert!(!particle.is_resting(), "sample {} was already resting", i);
        }

        particle.step(&params);
        prop_assert!(particle.is_resting(), "step after the last sample should rest");
    }

    #[test]
    fn sampling_is_deterministic(
        (mass, stiffness, damping) in stable_spring(),
        x0 in -100.0f64..100.0,
        v0 in -100.0f64..100.0,
    ) {
        let a = sample(x0, v0, mass, stiffness, damping).unwrap();
        let b = sample(x0, v0, mass, stiffness, damping).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn samples_are_finite(
        (mass, stiffness, damping) in stable_spring(),
        x0 in -1e3f64..1e3,
        v0 in -1e3f64..1e3,
    ) {
        let curve = sample(x0, v0, mass, stiffness, damping).unwrap();
        for x in &curve {
            prop_assert!(x.is_finite(), "non-finite sample {}", x);
        }
    }
}

// =============================================================================
// Quantizer properties
// =============================================================================

proptest! {
    #[test]
    fn quantize_spans_zero_to_hundred(samples in prop::collection::vec(-1e3f64..1e3, 2..2000)) {
        let set = quantize(&samples, |v| v.to_string()).unwrap();
        let percents: Vec<f64> = set.percents().collect();

        prop_assert_eq!(percents.len(), samples.len());
        prop_assert_eq!(percents[0], 0.0);
        prop_assert_eq!(*percents.last().unwrap(), 100.0);
        for pair in percents.windows(2) {
            prop_assert!(pair[0] < pair[1], "not increasing: {:?}", pair);
        }
    }

    #[test]
    fn quantize_spacing_is_even(samples in prop::collection::vec(-1.0f64..1.0, 2..500)) {
        let set = quantize(&samples, |v| v.to_string()).unwrap();
        let spacing = 100.0 / (samples.len() - 1) as f64;
        for (i, percent) in set.percents().enumerate() {
            prop_assert!((percent - i as f64 * spacing).abs() <= 5e-6);
        }
    }

    #[test]
    fn quantize_applies_mapper_in_order(samples in prop::collection::vec(-1e3f64..1e3, 1..200)) {
        let set = quantize(&samples, |v| format!("v:{v}")).unwrap();
        for (frame, sample) in set.frames().iter().zip(&samples) {
            prop_assert_eq!(&frame.value, &format!("v:{sample}"));
        }
    }

    #[test]
    fn descriptor_emits_one_block_per_dialect(
        samples in prop::collection::vec(-10.0f64..10.0, 1..50),
        prefixes in prop::collection::vec(prop::sample::select(vec!["-webkit-", "-moz-", "-o-", ""]), 1..4),
    ) {
        let dialects = Dialects::new(prefixes.clone());
        let css = build_descriptor(&samples, "spring", 100, |v| v.to_string(), &dialects).unwrap();

        prop_assert_eq!(css.matches("keyframes spring {").count(), prefixes.len());
        prop_assert_eq!(css.matches("animation-name:spring;").count(), prefixes.len());
        prop_assert!(css.ends_with('}'), "descriptor does not close its rule: {}", css);
    }
}

// =============================================================================
// Force model and live stepping
// =============================================================================

proptest! {
    #[test]
    fn force_is_linear(
        x in -1e3f64..1e3,
        v in -1e3f64..1e3,
        k in 0.0f64..500.0,
        b in 0.0f64..50.0,
    ) {
        prop_assert_eq!(force(x, v, k, b), -(k * x) - (b * v));
        prop_assert_eq!(force(x, 0.0, k, 0.0) + force(0.0, v, 0.0, b), force(x, v, k, b));
    }

    #[test]
    fn live_run_replays_sampled_curve(
        (mass, stiffness, damping) in stable_spring(),
        x0 in -50.0f64..50.0,
        v0 in -50.0f64..50.0,
    ) {
        let curve = sample(x0, v0, mass, stiffness, damping).unwrap();
        let mut frames = Vec::new();
        let outcome = run_live(
            x0, v0, mass, stiffness, damping,
            &mut ImmediateScheduler::new(),
            |x| frames.push(x),
        ).unwrap();

        prop_assert_eq!(outcome.reason, StopReason::Resting);
        prop_assert_eq!(frames.as_slice(), curve.as_slice());
    }
}
