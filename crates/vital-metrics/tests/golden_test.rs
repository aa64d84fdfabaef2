//! Golden vector tests for the PhenoAge formula.
//!
//! The reference panel must reproduce exactly: any drift in weights,
//! conversions, or rounding breaks downstream longevity events.

use vital_core::models::BloodworkSnapshot;
use vital_metrics::calculate_pheno_age;

fn reference_panel() -> BloodworkSnapshot {
    BloodworkSnapshot {
        albumin: Some(4.5),
        creatinine: Some(0.9),
        glucose: Some(85.0),
        crp: Some(0.5),
        lymphocyte_percent: Some(30.0),
        mcv: Some(88.0),
        rdw: Some(12.5),
        alkaline_phosphatase: Some(50.0),
        wbc: Some(5.5),
        ..Default::default()
    }
}

#[test]
fn golden_reference_panel() {
    let result = calculate_pheno_age(&reference_panel(), 35.0).unwrap();
    assert_eq!(result.pheno_age, 33.2);
    assert_eq!(result.delta, -1.8);
}

#[test]
fn any_missing_marker_yields_none() {
    let clear: &[fn(&mut BloodworkSnapshot)] = &[
        |s| s.albumin = None,
        |s| s.creatinine = None,
        |s| s.glucose = None,
        |s| s.crp = None,
        |s| {
            s.lymphocyte_percent = None;
            s.lymphocytes = None;
        },
        |s| s.mcv = None,
        |s| s.rdw = None,
        |s| s.alkaline_phosphatase = None,
        |s| s.wbc = None,
    ];
    for clear_marker in clear {
        let mut panel = reference_panel();
        clear_marker(&mut panel);
        assert!(calculate_pheno_age(&panel, 35.0).is_none());
    }
}

#[test]
fn zero_crp_is_finite() {
    let mut panel = reference_panel();
    panel.crp = Some(0.0);
    let result = calculate_pheno_age(&panel, 35.0).unwrap();
    assert!(result.pheno_age.is_finite());
    assert!(result.pheno_age > 0.0);
}

#[test]
fn derived_lymphocyte_percent_matches_direct() {
    let direct = calculate_pheno_age(&reference_panel(), 35.0).unwrap();

    let mut panel = reference_panel();
    panel.lymphocyte_percent = None;
    panel.lymphocytes = Some(1650.0); // 30% of 5.5 × 1000
    let derived = calculate_pheno_age(&panel, 35.0).unwrap();

    assert_eq!(direct, derived);
}

#[test]
fn empty_snapshot_yields_none() {
    assert!(calculate_pheno_age(&BloodworkSnapshot::default(), 35.0).is_none());
}
