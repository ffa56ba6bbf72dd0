//! Tests for the fixed response-shape archetypes.

use expression_curves::archetype::{ARCHETYPE_DAYS, ARCHETYPES, Y_RANGE};
use expression_curves::data::model::TimePoint;

#[test]
fn test_six_archetypes_against_fixed_days() {
    assert_eq!(ARCHETYPES.len(), 6);
    assert_eq!(ARCHETYPE_DAYS, [12.5, 28.0, 56.0, 84.0, 119.0, 150.0]);
    assert_eq!(Y_RANGE, (0.0, 1.2));
}

/// Archetype days are the ages of the sampled time points, in axis order.
#[test]
fn test_days_follow_time_points() {
    assert_eq!(ARCHETYPE_DAYS, TimePoint::ALL.map(|t| t.days()));
}

/// Plotted points are the literal arrays, unmodified, paired with the days.
#[test]
fn test_points_are_literal_values() {
    let expected: [(&str, [f64; 6]); 6] = [
        ("Late Gradual Reduction Response", [1.0, 1.0, 0.8, 0.6, 0.4, 0.2]),
        ("Early Rapid Reduction Response", [1.0, 1.0, 0.2, 0.2, 0.2, 0.2]),
        ("Long Oscillatory Response", [1.0, 1.0, 0.2, 0.2, 0.2, 1.0]),
        ("Late Gradual Response (^)", [0.2, 0.3, 0.4, 0.6, 0.8, 1.0]),
        ("Rapid Long Response (v)", [0.2, 1.0, 1.0, 0.8, 0.6, 0.4]),
        ("Rapid Long Response (^)", [0.2, 0.8, 0.8, 0.8, 1.0, 1.0]),
    ];

    for (archetype, (title, values)) in ARCHETYPES.iter().zip(expected.iter()) {
        assert_eq!(archetype.title, *title);
        let points = archetype.points();
        assert_eq!(points.len(), 6);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p[0], ARCHETYPE_DAYS[i]);
            assert_eq!(p[1], values[i]);
        }
    }
}

#[test]
fn test_values_fit_y_range() {
    for archetype in &ARCHETYPES {
        assert!(
            archetype
                .values
                .iter()
                .all(|v| (Y_RANGE.0..=Y_RANGE.1).contains(v))
        );
    }
}
