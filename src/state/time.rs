//! Conversions between hours/minutes/seconds and remaining milliseconds

use std::time::Duration;

/// Interval between two ticks of a running countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Amount subtracted from the remaining time on every tick
pub const TICK_MILLIS: u64 = 1_000;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// A time split into its displayed components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Split a remaining duration into hours, minutes and seconds
    pub fn from_millis(millis: u64) -> Self {
        Self {
            hours: millis / MILLIS_PER_HOUR,
            minutes: (millis / MILLIS_PER_MINUTE) % 60,
            seconds: (millis / MILLIS_PER_SECOND) % 60,
        }
    }

    pub fn to_millis(&self) -> u64 {
        to_millis(self.hours, self.minutes, self.seconds)
    }
}

/// `((h * 60 + m) * 60 + s) * 1000`
pub fn to_millis(hours: u64, minutes: u64, seconds: u64) -> u64 {
    ((hours * 60 + minutes) * 60 + seconds) * MILLIS_PER_SECOND
}

/// Render a component as a two-digit zero-padded string
pub fn format_two_digits(value: u64) -> String {
    format!("{:02}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn converts_components_to_millis() {
        assert_eq!(to_millis(0, 0, 0), 0);
        assert_eq!(to_millis(0, 0, 1), 1_000);
        assert_eq!(to_millis(1, 1, 1), 3_661_000);
        assert_eq!(to_millis(99, 59, 59), 359_999_000);
    }

    #[test]
    fn decomposes_partial_seconds_by_flooring() {
        assert_eq!(Hms::from_millis(1_999), Hms::new(0, 0, 1));
        assert_eq!(Hms::from_millis(59_999), Hms::new(0, 0, 59));
    }

    #[test]
    fn pads_single_digits() {
        assert_eq!(format_two_digits(0), "00");
        assert_eq!(format_two_digits(7), "07");
        assert_eq!(format_two_digits(42), "42");
    }

    proptest! {
        #[test]
        fn prop_valid_components_survive_round_trip(
            hours in 0..=99u64,
            minutes in 0..=59u64,
            seconds in 0..=59u64,
        ) {
            let hms = Hms::new(hours, minutes, seconds);
            prop_assert_eq!(Hms::from_millis(hms.to_millis()), hms);
        }
    }
}
