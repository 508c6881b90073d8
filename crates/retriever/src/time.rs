use std::time::{SystemTime, UNIX_EPOCH};

#[must_use]
pub fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Calendar year of a unix-ms instant (civil-from-days conversion).
#[must_use]
pub fn year_of_unix_ms(ms: u64) -> i32 {
    let days = (ms / 86_400_000) as i64;
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (year + i64::from(month <= 2)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_instants_map_to_the_right_year() {
        assert_eq!(year_of_unix_ms(0), 1970);
        // 2026-08-29
        assert_eq!(year_of_unix_ms(1_787_616_000_000), 2026);
        // 2025-12-31T23:59:59Z
        assert_eq!(year_of_unix_ms(1_767_225_599_000), 2025);
        // 2026-01-01T00:00:00Z
        assert_eq!(year_of_unix_ms(1_767_225_600_000), 2026);
    }
}
