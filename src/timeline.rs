//! The cycling timeline and the sample reading a fresh tank starts with.

use chrono::{TimeZone, Utc};

use crate::models::{ExpectedReadings, Phase, WaterReading};

pub static PHASES: [Phase; 5] = [
    Phase {
        name: "Initial Setup",
        description: "Setting up your tank and starting the cycling process",
        start_day: 0,
        end_day: 7,
        expected_readings: ExpectedReadings {
            ammonia: "0-0.5 ppm",
            nitrite: "0 ppm",
            nitrate: "0 ppm",
        },
        tasks: &[
            "Set up tank and equipment",
            "Add substrate and decorations",
            "Fill tank with water",
            "Add water conditioner",
            "Start filter",
            "Add ammonia source",
        ],
    },
    Phase {
        name: "Ammonia Phase",
        description: "Bacteria begin converting ammonia to nitrite",
        start_day: 7,
        end_day: 14,
        expected_readings: ExpectedReadings {
            ammonia: "2-4 ppm",
            nitrite: "0-0.5 ppm",
            nitrate: "0 ppm",
        },
        tasks: &[
            "Test water parameters daily",
            "Maintain ammonia levels",
            "Check filter function",
            "Monitor water temperature",
        ],
    },
    Phase {
        name: "Nitrite Phase",
        description: "Bacteria begin converting nitrite to nitrate",
        start_day: 14,
        end_day: 28,
        expected_readings: ExpectedReadings {
            ammonia: "0-0.5 ppm",
            nitrite: "2-5 ppm",
            nitrate: "0-20 ppm",
        },
        tasks: &[
            "Continue daily testing",
            "Monitor nitrite levels",
            "Check for algae growth",
            "Maintain water temperature",
        ],
    },
    Phase {
        name: "Nitrate Phase",
        description: "Final phase of the cycling process",
        start_day: 28,
        end_day: 42,
        expected_readings: ExpectedReadings {
            ammonia: "0 ppm",
            nitrite: "0 ppm",
            nitrate: "5-40 ppm",
        },
        tasks: &[
            "Daily parameter testing",
            "Monitor nitrate levels",
            "Prepare for water change",
            "Plan fish additions",
        ],
    },
    Phase {
        name: "Completion",
        description: "Tank is ready for fish",
        start_day: 42,
        end_day: 42,
        expected_readings: ExpectedReadings {
            ammonia: "0 ppm",
            nitrite: "0 ppm",
            nitrate: "5-40 ppm",
        },
        tasks: &[
            "Perform large water change",
            "Final parameter check",
            "Add first fish",
            "Monitor fish behavior",
        ],
    },
];

/// The built-in timeline
pub fn phases() -> &'static [Phase] {
    &PHASES
}

/// Readings a brand new store starts with
pub fn initial_readings() -> Vec<WaterReading> {
    vec![WaterReading {
        date: Utc
            .with_ymd_and_hms(2025, 3, 1, 18, 30, 0)
            .single()
            .unwrap_or_default(),
        ammonia: 0.0,
        nitrite: 0.0,
        nitrate: 0.0,
        ph: 7.2,
        temperature: 78.0,
        notes: Some("Initial setup complete. Water clear.".to_string()),
    }]
}

/// Check that a phase list starts at day 0 and that each phase begins on the
/// day the previous one ended.
pub fn is_contiguous(phases: &[Phase]) -> bool {
    let Some(first) = phases.first() else {
        return true;
    };
    if first.start_day != 0 {
        return false;
    }
    phases.iter().all(|p| p.start_day <= p.end_day)
        && phases.windows(2).all(|w| w[1].start_day == w[0].end_day)
}
