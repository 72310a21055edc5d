/// Strip a phone input down to digits, capped at 11 (Brazilian mobile
/// numbers: area code plus up to nine digits).
pub fn unmask_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(11).collect()
}

/// Render a digit string with the display mask `(xx) xxxx-xxxx` or
/// `(xx) xxxxx-xxxx` for eleven-digit numbers. Partial inputs get a
/// partial mask.
pub fn mask_phone(raw: &str) -> String {
    let digits = unmask_digits(raw);
    if digits.is_empty() {
        return String::new();
    }

    let (area, rest) = digits.split_at(digits.len().min(2));
    // Nine-digit subscriber numbers shift the hyphen one position right.
    let prefix_len = if digits.len() <= 10 { 4 } else { 5 };

    let mut out = format!("({area}");
    if rest.is_empty() {
        return out;
    }
    out.push_str(") ");

    let (prefix, suffix) = rest.split_at(rest.len().min(prefix_len));
    out.push_str(prefix);
    if !suffix.is_empty() {
        out.push('-');
        out.push_str(suffix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmask_strips_formatting() {
        assert_eq!(unmask_digits("(11) 91234-5678"), "11912345678");
        assert_eq!(unmask_digits("abc"), "");
    }

    #[test]
    fn test_unmask_caps_at_eleven_digits() {
        assert_eq!(unmask_digits("119123456789999"), "11912345678");
    }

    #[test]
    fn test_mask_ten_digit_number() {
        assert_eq!(mask_phone("1112345678"), "(11) 1234-5678");
    }

    #[test]
    fn test_mask_eleven_digit_number() {
        assert_eq!(mask_phone("11912345678"), "(11) 91234-5678");
    }

    #[test]
    fn test_mask_partial_input() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("1"), "(1");
        assert_eq!(mask_phone("11"), "(11");
        assert_eq!(mask_phone("119"), "(11) 9");
    }
}
