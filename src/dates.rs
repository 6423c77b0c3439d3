//! `day/month/year` text dates as entered in the app's forms.

use time::{
    macros::{date, format_description},
    Date,
};

/// Stand-in for dates that fail to parse when ordering.
pub const EPOCH: Date = date!(1970 - 01 - 01);

/// Parses `31/12/2020` (leading zeros optional). `None` on anything else,
/// including impossible calendar dates such as `31/02/2020`.
pub fn parse_day_month_year(text: &str) -> Option<Date> {
    let format = format_description!("[day padding:none]/[month padding:none]/[year]");
    Date::parse(text.trim(), format).ok()
}

pub fn format_day_month_year(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded() {
        assert_eq!(parse_day_month_year("05/03/2021"), Some(date!(2021 - 03 - 05)));
        assert_eq!(parse_day_month_year("5/3/2021"), Some(date!(2021 - 03 - 05)));
        assert_eq!(parse_day_month_year(" 31/12/1999 "), Some(date!(1999 - 12 - 31)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_day_month_year("31/13/2020"), None);
        assert_eq!(parse_day_month_year("30/02/2020"), None);
        assert_eq!(parse_day_month_year("2020-01-01"), None);
        assert_eq!(parse_day_month_year(""), None);
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_day_month_year(date!(2010 - 01 - 02)), "02/01/2010");
    }
}
