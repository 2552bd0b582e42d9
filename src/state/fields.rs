//! Editable hours/minutes/seconds fields

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::time::{format_two_digits, Hms};

/// Text shown for an unset or cleared field
pub const PLACEHOLDER: &str = "00";

/// One of the three editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Largest value the field accepts
    pub fn max(&self) -> u64 {
        match self {
            Field::Hours => 99,
            Field::Minutes | Field::Seconds => 59,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        }
    }

    /// Normalize raw user input for this field.
    ///
    /// Non-digits are dropped and the digit run is clamped into range.
    /// Input without any digit yields an empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return String::new();
        }

        let value = digits.bytes().fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        });
        value.min(self.max()).to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(Field::Hours),
            "minutes" => Ok(Field::Minutes),
            "seconds" => Ok(Field::Seconds),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Texts of the three fields as currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl DisplayFields {
    /// All three fields set to the placeholder
    pub fn new() -> Self {
        Self {
            hours: PLACEHOLDER.to_string(),
            minutes: PLACEHOLDER.to_string(),
            seconds: PLACEHOLDER.to_string(),
        }
    }

    /// Read-only projection of a remaining duration
    pub fn from_millis(millis: u64) -> Self {
        let hms = Hms::from_millis(millis);
        Self {
            hours: format_two_digits(hms.hours),
            minutes: format_two_digits(hms.minutes),
            seconds: format_two_digits(hms.seconds),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    pub fn clear(&mut self, field: Field) {
        self.slot(field).clear();
    }

    /// Store normalized input, unpadded
    pub fn set_raw(&mut self, field: Field, raw: &str) {
        *self.slot(field) = field.normalize(raw);
    }

    /// Pad every non-empty field to two digits, restore the placeholder elsewhere
    pub fn finish_edit(&mut self) {
        for field in Field::ALL {
            let slot = self.slot(field);
            *slot = match slot.parse::<u64>() {
                Ok(value) => format_two_digits(value),
                Err(_) => PLACEHOLDER.to_string(),
            };
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Interpret the fields as a duration; unparsable fields count as zero
    pub fn to_hms(&self) -> Hms {
        let value = |field: Field| {
            self.get(field)
                .parse::<u64>()
                .map(|v| v.min(field.max()))
                .unwrap_or(0)
        };
        Hms::new(value(Field::Hours), value(Field::Minutes), value(Field::Seconds))
    }
}

impl Default for DisplayFields {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_digits() {
        assert_eq!(Field::Minutes.normalize("abc12xyz"), "12");
        assert_eq!(Field::Hours.normalize("1a2"), "12");
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(Field::Minutes.normalize("150"), "59");
        assert_eq!(Field::Seconds.normalize("60"), "59");
        assert_eq!(Field::Hours.normalize("150"), "99");
        assert_eq!(Field::Hours.normalize("99999999999999999999999"), "99");
    }

    #[test]
    fn leading_zeros_collapse() {
        assert_eq!(Field::Seconds.normalize("007"), "7");
        assert_eq!(Field::Seconds.normalize("012"), "12");
    }

    #[test]
    fn no_digits_yields_empty() {
        assert_eq!(Field::Hours.normalize(""), "");
        assert_eq!(Field::Hours.normalize("abc"), "");
        assert_eq!(Field::Hours.normalize("-"), "");
    }

    #[test]
    fn finish_edit_pads_or_restores_placeholder() {
        let mut fields = DisplayFields::new();
        fields.clear(Field::Hours);
        fields.set_raw(Field::Minutes, "7");
        fields.set_raw(Field::Seconds, "45");

        fields.finish_edit();

        assert_eq!(fields.hours, "00");
        assert_eq!(fields.minutes, "07");
        assert_eq!(fields.seconds, "45");
    }

    #[test]
    fn empty_fields_count_as_zero() {
        let mut fields = DisplayFields::new();
        fields.clear(Field::Hours);
        fields.set_raw(Field::Minutes, "2");
        assert_eq!(fields.to_hms(), Hms::new(0, 2, 0));
    }

    #[test]
    fn projects_remaining_time() {
        let fields = DisplayFields::from_millis(3_723_000);
        assert_eq!(fields.hours, "01");
        assert_eq!(fields.minutes, "02");
        assert_eq!(fields.seconds, "03");
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("minutes".parse::<Field>(), Ok(Field::Minutes));
        assert!("days".parse::<Field>().is_err());
    }
}
