//! Mobile-money phone numbers for the DRC (`243` country prefix).

pub const COUNTRY_PREFIX: &str = "243";

const MIN_SUBSCRIBER_DIGITS: usize = 9;
const MAX_SUBSCRIBER_DIGITS: usize = 11;

/// Strip everything but digits, then force the `243` prefix.
///
/// A leading trunk `0` is replaced by the prefix; numbers already starting
/// with `243` are kept as they are.
pub fn normalize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    if let Some(local) = digits.strip_prefix('0') {
        format!("{}{}", COUNTRY_PREFIX, local)
    } else if digits.starts_with(COUNTRY_PREFIX) {
        digits
    } else {
        format!("{}{}", COUNTRY_PREFIX, digits)
    }
}

/// `243` followed by 9 to 11 digits.
pub fn is_valid_phone(normalized: &str) -> bool {
    match normalized.strip_prefix(COUNTRY_PREFIX) {
        Some(subscriber) => {
            (MIN_SUBSCRIBER_DIGITS..=MAX_SUBSCRIBER_DIGITS).contains(&subscriber.len())
                && subscriber.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
