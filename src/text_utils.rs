use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the `publishedOn` value of a post.
///
/// Accepts `2024-01-31`, `2024-01-31 10:42:32[.123]` and RFC 3339 timestamps.
/// Values without an offset are taken as UTC.
pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.\d{1,3})?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);
    let part = |idx: usize| caps.get(idx).map(|m| m.as_str()).unwrap_or("0");

    let y: i32 = to_i32(part(1))?;
    let m: u32 = to_u32(part(2))?;
    let d: u32 = to_u32(part(3))?;
    let h: u32 = to_u32(part(4))?;
    let mn: u32 = to_u32(part(5))?;
    let s: u32 = to_u32(part(6))?;

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Invalid date {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or_else(|| format!("Invalid time {}", buf))?;

    Ok(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}

/// `Mon Jan 01 2024`, the way the front end displays modification dates
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2017, 9, 10, 10, 42, 32).unwrap());

        let date_time = parse_date_time("2017-09-10 10:42:32").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2017, 9, 10, 10, 42, 32).unwrap());

        let date_time = parse_date_time("2024-01-01").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let date_time = parse_date_time("2024-06-01T12:00:00+02:00").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date_time("yesterday").is_err());
        assert!(parse_date_time("2024-13-01").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_display_date(&date), "Mon Jan 01 2024");
    }
}
