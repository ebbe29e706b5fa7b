//! Answer checking for typed puzzle answers.

/// Read the leading base-10 integer from `input`.
///
/// Leading whitespace is skipped and a single `+` or `-` is accepted. Digits
/// are read up to the first non-digit; anything after is ignored. Returns
/// `None` when no digit follows.
pub fn parse_leading_int(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // f64 keeps very long inputs comparable, correctly rounded
    let magnitude: f64 = rest[..digits_len].parse().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

/// Whether the typed `input` equals `correct_answer`.
pub fn check_answer(input: &str, correct_answer: f64) -> bool {
    parse_leading_int(input).is_some_and(|value| value == correct_answer)
}
