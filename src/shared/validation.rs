use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// E.164-style phone number, optional leading "+"
    /// - Valid: "+911234567890", "14155552671"
    /// - Invalid: "+0123", "12-34", "phone", "+"
    pub static ref PHONE_NUMBER_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_regex_valid() {
        assert!(PHONE_NUMBER_REGEX.is_match("+911234567890"));
        assert!(PHONE_NUMBER_REGEX.is_match("14155552671"));
        assert!(PHONE_NUMBER_REGEX.is_match("+44"));
    }

    #[test]
    fn test_phone_number_regex_invalid() {
        assert!(!PHONE_NUMBER_REGEX.is_match("+0123456")); // leading zero
        assert!(!PHONE_NUMBER_REGEX.is_match("12-34-56")); // separators
        assert!(!PHONE_NUMBER_REGEX.is_match("+1234567890123456")); // too long
        assert!(!PHONE_NUMBER_REGEX.is_match("+")); // no digits
        assert!(!PHONE_NUMBER_REGEX.is_match("")); // empty
    }
}
