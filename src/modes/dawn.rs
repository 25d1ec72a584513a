use std::fmt;

use serde::Serialize;

/// A gradual-wake lighting preset used by the alarm feature.
///
/// The firmware supports exactly nine presets; the duration is how long the
/// lamp fades in before the alarm time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DawnMode {
    /// 0-based id of the preset, `0..=8`. On the wire it is sent 1-based.
    pub id: u8,
    /// Fade-in duration in minutes.
    pub minutes: u16,
}

impl fmt::Display for DawnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

static MODES: [DawnMode; 9] = [
    DawnMode { id: 0, minutes: 5 },
    DawnMode { id: 1, minutes: 10 },
    DawnMode { id: 2, minutes: 15 },
    DawnMode { id: 3, minutes: 20 },
    DawnMode { id: 4, minutes: 25 },
    DawnMode { id: 5, minutes: 30 },
    DawnMode { id: 6, minutes: 40 },
    DawnMode { id: 7, minutes: 50 },
    DawnMode { id: 8, minutes: 60 },
];

/// Catalog of the lamp's dawn presets.
pub struct DawnModes;

impl DawnModes {
    /// Looks a preset up by its duration. Only the nine supported durations
    /// match; there is no nearest-value fallback.
    pub fn by_minutes(minutes: i32) -> Option<&'static DawnMode> {
        MODES.iter().find(|mode| i32::from(mode.minutes) == minutes)
    }

    /// Looks a preset up by its 0-based id.
    pub fn by_id(id: i32) -> Option<&'static DawnMode> {
        MODES.iter().find(|mode| i32::from(mode.id) == id)
    }

    /// All presets, in id order.
    pub fn all() -> &'static [DawnMode] {
        &MODES
    }
}
