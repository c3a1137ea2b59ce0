use chrono::{DateTime, TimeZone, Utc};

/// Calendar date of `epoch` seconds in `tz`, formatted as `DD/MM/YYYY`.
///
/// Returns `None` for non-positive or out-of-range timestamps.
pub fn epoch_to_dmy<Tz: TimeZone>(epoch: i64, tz: &Tz) -> Option<String> {
    if epoch <= 0 {
        return None;
    }
    let date = tz.timestamp_opt(epoch, 0).single()?.date_naive();
    Some(date.format("%d/%m/%Y").to_string())
}

pub fn epoch_to_utc(epoch: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(epoch, 0)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::epoch_to_dmy;

    #[test]
    fn formats_day_month_year() {
        assert_eq!(epoch_to_dmy(1700000000, &Utc).as_deref(), Some("14/11/2023"));
        // 2023-11-14T22:13:20Z is already the next day in JST.
        let jst = FixedOffset::east_opt(9 * 60 * 60).unwrap();
        assert_eq!(epoch_to_dmy(1700000000, &jst).as_deref(), Some("15/11/2023"));
        assert_eq!(epoch_to_dmy(86400 * 31, &Utc).as_deref(), Some("01/02/1970"));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(epoch_to_dmy(0, &Utc), None);
        assert_eq!(epoch_to_dmy(-5, &Utc), None);
        assert_eq!(epoch_to_dmy(i64::MAX, &Utc), None);
    }
}
