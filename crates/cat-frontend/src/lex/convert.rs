/// Parse a decimal literal, ignoring digit separators. Literals too large to
/// fit saturate, since only their type matters here.
pub fn parse_dec(text: &str) -> u64 {
    let mut res: u64 = 0;

    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            res = res.saturating_mul(10).saturating_add(digit as u64);
        }
    }

    res
}

/// Strip digit separators from a floating point literal.
pub fn clean_float(text: &str) -> String {
    text.chars().filter(|c| *c != '_').collect()
}
