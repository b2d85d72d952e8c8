//! Time rendering helpers

/// Render seconds as `MM:SS`, each field zero-padded to two digits.
///
/// Minutes are not wrapped into hours, so anything past 99 minutes simply
/// grows the minutes field (`6000` renders as `100:00`).
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_both_fields() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn minutes_grow_past_two_digits() {
        assert_eq!(format_time(5999), "99:59");
        assert_eq!(format_time(6000), "100:00");
    }
}
