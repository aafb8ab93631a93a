//! Announcement text
//!
//! Builds the phrase handed to the TTS engine. "A M"/"P M" are spelled with a
//! space so engines read the letters instead of the word "am".

use chrono::{Local, Timelike};

/// How the hour is phrased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementFormat {
    /// Spoken before the time, e.g. a station name
    pub prefix: String,
    pub use_12_hour: bool,
    pub include_ampm: bool,
}

impl Default for AnnouncementFormat {
    fn default() -> Self {
        Self {
            prefix: "West Comm, time is".to_string(),
            use_12_hour: true,
            include_ampm: true,
        }
    }
}

/// Phrase for a given hour of the day (0-23)
pub fn format_hour(hour: u32, format: &AnnouncementFormat) -> String {
    let hour = hour % 24;
    if !format.use_12_hour {
        return format!("{} {:02} hundred hours", format.prefix, hour);
    }

    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    if format.include_ampm {
        let ampm = if hour >= 12 { "P M" } else { "A M" };
        format!("{} {} o'clock {}", format.prefix, twelve, ampm)
    } else {
        format!("{} {} o'clock", format.prefix, twelve)
    }
}

/// Phrase for the current local hour
pub fn current_announcement(format: &AnnouncementFormat) -> String {
    format_hour(Local::now().hour(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(use_12_hour: bool, include_ampm: bool) -> AnnouncementFormat {
        AnnouncementFormat {
            prefix: "Test".to_string(),
            use_12_hour,
            include_ampm,
        }
    }

    #[test]
    fn test_twelve_hour_with_ampm() {
        let f = fmt(true, true);
        assert_eq!(format_hour(0, &f), "Test 12 o'clock A M");
        assert_eq!(format_hour(9, &f), "Test 9 o'clock A M");
        assert_eq!(format_hour(12, &f), "Test 12 o'clock P M");
        assert_eq!(format_hour(23, &f), "Test 11 o'clock P M");
    }

    #[test]
    fn test_twelve_hour_without_ampm() {
        let f = fmt(true, false);
        assert_eq!(format_hour(15, &f), "Test 3 o'clock");
    }

    #[test]
    fn test_twenty_four_hour() {
        let f = fmt(false, true);
        assert_eq!(format_hour(7, &f), "Test 07 hundred hours");
        assert_eq!(format_hour(18, &f), "Test 18 hundred hours");
    }

    #[test]
    fn test_default_prefix() {
        let text = current_announcement(&AnnouncementFormat::default());
        assert!(text.starts_with("West Comm, time is "));
    }
}
