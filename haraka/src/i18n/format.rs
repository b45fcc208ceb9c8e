//! Locale-aware display formatting. Currency is always US dollars.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use haraka_api::endpoints::Money;

use super::{Language, Locale};

const FR_GROUP_SEPARATOR: char = '\u{202F}';
const NO_BREAK_SPACE: char = '\u{00A0}';

const FR_SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// `$1,234.56` in English, `1 234,56 $US` in French.
pub fn format_currency(amount: Money, locale: &Locale) -> String {
    let fixed = amount.to_fixed();
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));
    let sign = if negative { "-" } else { "" };

    match locale.language() {
        Language::English => format!("{}${}.{}", sign, group_digits(whole, ','), cents),
        Language::French => format!(
            "{}{},{}{}$US",
            sign,
            group_digits(whole, FR_GROUP_SEPARATOR),
            cents,
            NO_BREAK_SPACE
        ),
    }
}

/// Short month, day and year: `Oct 19, 2026` / `19 oct. 2026`.
pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    match locale.language() {
        Language::English => date.format("%b %-d, %Y").to_string(),
        Language::French => format!(
            "{} {} {}",
            date.day(),
            FR_SHORT_MONTHS[date.month0() as usize],
            date.year()
        ),
    }
}

/// [`format_date`] followed by a 24-hour `HH:MM`.
pub fn format_date_time(datetime: NaiveDateTime, locale: &Locale) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_date(datetime.date(), locale),
        datetime.hour(),
        datetime.minute()
    )
}

/// Plain two-decimal value for input fields, e.g. `250.00`.
pub fn format_amount_input(amount: Money) -> String {
    amount.to_fixed()
}

fn group_digits(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::new(Language::English)
    }

    fn fr() -> Locale {
        Locale::new(Language::French)
    }

    #[test]
    fn currency_in_english() {
        assert_eq!(format_currency(Money::from_cents(123_456), &en()), "$1,234.56");
        assert_eq!(format_currency(Money::from(250), &en()), "$250.00");
        assert_eq!(format_currency(Money::ZERO, &en()), "$0.00");
        assert_eq!(
            format_currency(Money::from_cents(-123_456_789), &en()),
            "-$1,234,567.89"
        );
    }

    #[test]
    fn currency_in_french() {
        assert_eq!(
            format_currency(Money::from_cents(123_456), &fr()),
            "1\u{202F}234,56\u{00A0}$US"
        );
        assert_eq!(format_currency(Money::from(100), &fr()), "100,00\u{00A0}$US");
        assert_eq!(
            format_currency(Money::from_cents(-50), &fr()),
            "-0,50\u{00A0}$US"
        );
    }

    #[test]
    fn dates_use_short_months() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_date(date, &en()), "Oct 19, 2026");
        assert_eq!(format_date(date, &fr()), "19 oct. 2026");

        let date = NaiveDate::from_ymd_opt(2027, 2, 3).unwrap();
        assert_eq!(format_date(date, &en()), "Feb 3, 2027");
        assert_eq!(format_date(date, &fr()), "3 févr. 2027");
    }

    #[test]
    fn date_time_appends_24_hour_clock() {
        let datetime = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 59)
            .unwrap();
        assert_eq!(format_date_time(datetime, &en()), "Oct 19, 2026, 14:05");
        assert_eq!(format_date_time(datetime, &fr()), "19 oct. 2026, 14:05");
    }

    #[test]
    fn amount_input_has_two_decimals() {
        assert_eq!(format_amount_input(Money::from(250)), "250.00");
        assert_eq!(format_amount_input(Money::from_cents(8_333)), "83.33");
    }
}
