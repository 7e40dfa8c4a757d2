//! Chilean national identity number (RUT) validation
//!
//! A RUT is a numeric body followed by a single check character
//! computed with the standard modulo-11 weighted checksum. Input
//! arrives with arbitrary dot/dash punctuation and casing; every
//! caller normalizes before validating, storing, or looking up.

/// Strip `.` and `-` separators and uppercase the remainder.
///
/// Idempotent: normalizing an already-normalized value is a no-op.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '.' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validate a raw RUT string.
///
/// Returns `false` for any malformed input (empty, punctuation-only,
/// non-numeric body, non-ASCII); never panics.
pub fn validate(raw: &str) -> bool {
    let rut = normalize(raw);

    // split into body and trailing check char without assuming the
    // last char is single-byte
    let mut chars = rut.chars();
    let dv = match chars.next_back() {
        Some(c) => c,
        None => return false,
    };
    let body_str = chars.as_str();

    if body_str.is_empty() {
        return false; // shorter than body + check char
    }
    if !body_str.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let body: u64 = match body_str.parse() {
        Ok(n) => n,
        Err(_) => return false, // more digits than u64 can hold
    };

    dv == expected_check_digit(body)
}

/// Compute the expected check character for a numeric body.
///
/// Digits are processed least-significant first against the cyclic
/// multiplier sequence 2, 3, 4, 5, 6, 7, 2, 3, ... A body of 0 skips
/// the loop entirely (sum 0, result '0').
pub fn expected_check_digit(mut body: u64) -> char {
    let mut m: u64 = 0;
    let mut s: u64 = 2;
    while body > 0 {
        m += (body % 10) * s;
        s += 1;
        if s == 8 {
            s = 2;
        }
        body /= 10;
    }

    match 11 - (m % 11) {
        10 => 'K',
        11 => '0',
        res => char::from_digit(res as u32, 10).unwrap(),
    }
}
