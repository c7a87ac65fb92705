//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_compatibility() -> impl Strategy<Value = Compatibility> {
    prop_oneof![Just(Compatibility::Cmb05), Just(Compatibility::Latest)]
}

fn arb_distance() -> impl Strategy<Value = DistanceMode> {
    prop_oneof![
        Just(DistanceMode::WeightedEuclidean),
        Just(DistanceMode::PooledAuprc)
    ]
}

fn arb_valid_config() -> impl Strategy<Value = StatConfig> {
    (
        proptest::option::of(0.0f64..=100.0),
        1e-6f64..=1.0,
        arb_compatibility(),
        arb_distance(),
        1e-3f64..=1.0,
    )
        .prop_map(
            |(threshold, sig_level, compatibility, distance, hierarchy_weight)| StatConfig {
                threshold,
                sig_level,
                compatibility,
                distance,
                mean_estimator: MeanEstimator::Plain,
                hierarchy_weight,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_sig_level_above_one_fails(config in arb_valid_config(), excess in 1e-6f64..10.0) {
        let mut config = config;
        config.sig_level = 1.0 + excess;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidSigLevel(_))
        ));
    }

    #[test]
    fn prop_threshold_above_percent_fails(config in arb_valid_config(), excess in 1e-6f64..1e6) {
        let config = config.with_threshold(100.0 + excess);
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidThreshold(_))
        ));
    }
}
