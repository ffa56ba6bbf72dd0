use crate::data::model::TimePoint;

// ---------------------------------------------------------------------------
// Idealized response-shape archetypes
// ---------------------------------------------------------------------------

/// Sampled ages (days) the archetype curves are drawn against.
pub const ARCHETYPE_DAYS: [f64; 6] = [
    TimePoint::E12_5.days(),
    TimePoint::P28.days(),
    TimePoint::P56.days(),
    TimePoint::P84.days(),
    TimePoint::P119.days(),
    TimePoint::P150.days(),
];

/// Fixed y-axis range of every archetype chart.
pub const Y_RANGE: (f64, f64) = (0.0, 1.2);

pub const LINE_WIDTH: f32 = 3.0;

/// A hand-authored response curve. The values are illustrative constants,
/// drawn unmodified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub title: &'static str,
    pub values: [f64; 6],
}

pub const ARCHETYPES: [Archetype; 6] = [
    Archetype {
        title: "Late Gradual Reduction Response",
        values: [1.0, 1.0, 0.8, 0.6, 0.4, 0.2],
    },
    Archetype {
        title: "Early Rapid Reduction Response",
        values: [1.0, 1.0, 0.2, 0.2, 0.2, 0.2],
    },
    Archetype {
        title: "Long Oscillatory Response",
        values: [1.0, 1.0, 0.2, 0.2, 0.2, 1.0],
    },
    Archetype {
        title: "Late Gradual Response (^)",
        values: [0.2, 0.3, 0.4, 0.6, 0.8, 1.0],
    },
    Archetype {
        title: "Rapid Long Response (v)",
        values: [0.2, 1.0, 1.0, 0.8, 0.6, 0.4],
    },
    Archetype {
        title: "Rapid Long Response (^)",
        values: [0.2, 0.8, 0.8, 0.8, 1.0, 1.0],
    },
];

impl Archetype {
    /// `(day, value)` pairs exactly as plotted.
    pub fn points(&self) -> Vec<[f64; 2]> {
        ARCHETYPE_DAYS
            .iter()
            .zip(self.values.iter())
            .map(|(&d, &v)| [d, v])
            .collect()
    }

    /// File-name friendly form of the title, e.g. `rapid_long_response_up`.
    pub fn slug(&self) -> String {
        let words: Vec<String> = self
            .title
            .replace("(^)", "up")
            .replace("(v)", "down")
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_ascii_lowercase())
            .collect();
        words.join("_")
    }
}

/// Tick label for a day value: `12.5` stays fractional, whole days drop the `.0`.
pub fn day_label(day: f64) -> String {
    if day.fract() == 0.0 {
        format!("{day:.0}")
    } else {
        format!("{day}")
    }
}
