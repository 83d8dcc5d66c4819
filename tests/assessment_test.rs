use growth_screen::core::guidance::{InterventionFocus, RecommendedAction};
use growth_screen::domain::model::CURVE_POINTS;
use growth_screen::{
    classify, guidance, interpolate_at, reference_set, Classification, RiskSelection, Sex,
};

#[test]
fn test_table_values_at_every_whole_month() {
    for sex in [Sex::Male, Sex::Female] {
        let set = reference_set(sex);
        for curve in [&set.p15, &set.p50, &set.p85] {
            for month in 0..CURVE_POINTS {
                let expected = curve.points()[month].weight_kg;
                assert_eq!(interpolate_at(curve, month as f64), expected);
            }
            assert_eq!(interpolate_at(curve, -1.5), curve.points()[0].weight_kg);
            assert_eq!(interpolate_at(curve, 30.0), curve.points()[24].weight_kg);
        }
    }
}

#[test]
fn test_zero_weight_is_within() {
    let result = classify(6.0, 0.0, Sex::Male);
    assert_eq!(result.classification, Classification::Within);
}

#[test]
fn test_six_month_old_boy_under() {
    let result = classify(6.0, 6.8, Sex::Male);
    assert_eq!(result.p15, 7.2);
    assert_eq!(result.p50, 7.9);
    assert_eq!(result.p85, 8.9);
    assert_eq!(result.classification, Classification::Under);
    assert_eq!(result.label, "Under (below 15th centile)");
    assert_eq!(result.color, "#ffb74d");
}

#[test]
fn test_six_month_old_boy_over_and_within() {
    assert_eq!(classify(6.0, 10.0, Sex::Male).classification, Classification::Over);
    assert_eq!(classify(6.0, 7.5, Sex::Male).classification, Classification::Within);
}

#[test]
fn test_exact_interpolated_bounds_are_within() {
    for sex in [Sex::Male, Sex::Female] {
        for age in [0.0, 3.25, 6.5, 11.9, 24.0] {
            let band = classify(age, 1.0, sex);
            assert_eq!(classify(age, band.p15, sex).classification, Classification::Within);
            assert_eq!(classify(age, band.p85, sex).classification, Classification::Within);
        }
    }
}

#[test]
fn test_classify_is_deterministic() {
    let a = classify(13.7, 9.9, Sex::Female);
    let b = classify(13.7, 9.9, Sex::Female);
    assert_eq!(a, b);
}

#[test]
fn test_under_with_risks_walkthrough() {
    let mut risks = RiskSelection::new();
    risks.toggle("feeding_difficulties").unwrap();
    risks.toggle("food_security").unwrap();

    let result = classify(9.0, 7.0, Sex::Female);
    assert_eq!(result.classification, Classification::Under);

    let advice = guidance(&result, 7.0, risks.count(), 3);
    assert!(advice.next_step.starts_with("Under 15th centile."));
    assert_eq!(
        advice.actions[0].action,
        RecommendedAction::ProceedToIntervention {
            focus: Some(InterventionFocus::Undergrowth)
        }
    );
    assert!(advice.risk_note.starts_with("If >1 risk factor"));

    let plan = advice.intervention.expect("intervention expected");
    assert_eq!(plan.focus, InterventionFocus::Undergrowth);
}

#[test]
fn test_within_without_risks_has_no_intervention() {
    let result = classify(12.0, 9.6, Sex::Male);
    let advice = guidance(&result, 9.6, 0, 3);
    assert!(advice.intervention.is_none());
    assert_eq!(advice.actions[0].label, "Reassess in 3 Months");
}
