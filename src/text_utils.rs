use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref SPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

pub fn strip_html(buf: &str) -> String {
    let text = TAG_REGEX.replace_all(buf, "");
    let text = SPACE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// "2024-03-05" becomes "March 5, 2024". A date that does not parse is shown
/// as written.
pub fn format_display_date(raw_date: &str) -> String {
    match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw_date.to_string(),
    }
}

pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// RFC 2822 publish date for the feed, at UTC midnight. An unparsable raw
/// date yields an empty string, which the feed writer emits as-is.
pub fn feed_pub_date(raw_date: &str) -> String {
    match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
        Ok(date) => {
            let midnight = date.and_time(NaiveTime::default());
            Utc.from_utc_datetime(&midnight).to_rfc2822()
        }
        Err(_) => String::new(),
    }
}

/// Assumes 200 words per minute, never less than one minute. The count splits
/// the rendered HTML on whitespace, so markup tokens count as words.
pub fn reading_time_minutes(rendered: &str) -> usize {
    let words = rendered.split_whitespace().count();
    std::cmp::max(1, words / 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        let buf = "<p>Some <strong>bold</strong>\n text</p>";
        assert_eq!(strip_html(buf), "Some bold text");

        assert_eq!(strip_html("   "), "");
        assert_eq!(strip_html("no markup"), "no markup");
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_display_date("2023-12-25"), "December 25, 2023");
        assert_eq!(format_display_date("unknown"), "unknown");
    }

    #[test]
    fn test_feed_pub_date() {
        assert_eq!(feed_pub_date("2024-03-05"), "Tue, 5 Mar 2024 00:00:00 +0000");
        assert_eq!(feed_pub_date("unknown"), "");
    }

    #[test]
    fn test_reading_time_minutes() {
        let words_200 = vec!["word"; 200].join(" ");
        assert_eq!(reading_time_minutes(&words_200), 1);

        let words_401 = vec!["word"; 401].join(" ");
        assert_eq!(reading_time_minutes(&words_401), 2);

        let words_10 = vec!["word"; 10].join(" ");
        assert_eq!(reading_time_minutes(&words_10), 1);
    }

    #[test]
    fn test_reading_time_counts_tags_as_words() {
        assert_eq!(reading_time_minutes("<p>one two</p>"), 1);
    }
}
