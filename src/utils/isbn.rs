// ISBN-10 uses a weighted mod-11 check digit where the last position may
// be 'X' (value 10); ISBN-13 uses alternating 1/3 weights mod 10.
pub fn validate_isbn(isbn: &str) -> bool {
    let s: String = isbn.chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect::<String>()
        .to_uppercase();
    match s.len() {
        10 => validate_isbn10(s.as_str()),
        13 => validate_isbn13(s.as_str()),
        _ => false,
    }
}

fn validate_isbn10(s: &str) -> bool {
    let mut total: u32 = 0;
    for (i, ch) in s.chars().enumerate() {
        let val = if ch == 'X' {
            if i != 9 {
                return false;
            }
            10
        } else {
            match ch.to_digit(10) {
                Some(d) => d,
                None => return false,
            }
        };
        total += (10 - i as u32) * val;
    }
    total % 11 == 0
}

fn validate_isbn13(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let total: u32 = s.chars()
        .enumerate()
        .map(|(i, c)| {
            let w = if i % 2 == 0 { 1 } else { 3 };
            w * c.to_digit(10).unwrap_or(0)
        })
        .sum();
    total % 10 == 0
}

#[cfg(test)]
mod tests {
    use crate::utils::isbn::validate_isbn;

    #[test]
    fn test_should_accept_valid_isbn10() {
        assert!(validate_isbn("0306406152"));
        assert!(validate_isbn("0-306-40615-2"));
        // trailing X check digit
        assert!(validate_isbn("097522980X"));
    }

    #[test]
    fn test_should_accept_valid_isbn13() {
        assert!(validate_isbn("9780306406157"));
        assert!(validate_isbn("978-0-306-40615-7"));
    }

    #[test]
    fn test_should_reject_invalid_isbn() {
        assert!(!validate_isbn("0306406153"));
        assert!(!validate_isbn("9780306406158"));
        assert!(!validate_isbn("030640615"));
        assert!(!validate_isbn("03064061AB"));
        // X anywhere but the last position is invalid
        assert!(!validate_isbn("0X06406152"));
        assert!(!validate_isbn(""));
    }
}
