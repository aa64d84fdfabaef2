//! Property tests for snapshot merge semantics.

use proptest::prelude::*;
use vital_core::models::BloodworkSnapshot;

fn arb_snapshot() -> impl Strategy<Value = BloodworkSnapshot> {
    (
        proptest::option::of(1.0..10.0f64),
        proptest::option::of(0.1..5.0f64),
        proptest::option::of(50.0..200.0f64),
        proptest::option::of(0.0..20.0f64),
        proptest::option::of(10.0..60.0f64),
    )
        .prop_map(|(albumin, creatinine, glucose, crp, lymphocyte_percent)| {
            BloodworkSnapshot {
                albumin,
                creatinine,
                glucose,
                crp,
                lymphocyte_percent,
                ..Default::default()
            }
        })
}

proptest! {
    /// merge(A, {}) = A
    #[test]
    fn merge_with_empty_is_identity(a in arb_snapshot()) {
        let mut merged = a.clone();
        merged.merge_from(&BloodworkSnapshot::default());
        prop_assert_eq!(merged, a);
    }

    /// merge(A, A) = A
    #[test]
    fn merge_with_self_is_idempotent(a in arb_snapshot()) {
        let mut merged = a.clone();
        merged.merge_from(&a);
        prop_assert_eq!(merged, a);
    }

    /// Values defined in A survive any merge where B leaves them undefined,
    /// and every value defined in B is present afterwards.
    #[test]
    fn merge_never_loses_defined_values(a in arb_snapshot(), b in arb_snapshot()) {
        let mut merged = a.clone();
        merged.merge_from(&b);
        for id in BloodworkSnapshot::KNOWN_IDS {
            let expected = b.get_known(id).or(a.get_known(id));
            prop_assert_eq!(merged.get_known(id), expected);
        }
    }
}
