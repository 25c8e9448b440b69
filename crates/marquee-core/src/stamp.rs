use chrono::{DateTime, Local};

/// Millisecond timestamp id, bumped until it does not collide with `taken`.
pub fn time_derived_id<F>(now: &DateTime<Local>, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut millis = now.timestamp_millis();
    loop {
        let id = millis.to_string();
        if !taken(&id) {
            return id;
        }
        millis += 1;
    }
}

/// Short local date, e.g. `3/7/2024`
pub fn display_date(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_derived_id_skips_taken() {
        let now = Local.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(time_derived_id(&now, |_| false), "1700000000000");

        let id = time_derived_id(&now, |id| id == "1700000000000" || id == "1700000000001");
        assert_eq!(id, "1700000000002");
    }

    #[test]
    fn test_display_date_has_no_padding() {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(display_date(&date), "3/7/2024");
    }
}
