/// Format a number the way Brazilian Portuguese displays it: two fraction
/// digits, `,` as decimal separator and `.` grouping thousands.
///
/// Rounding is half away from zero, applied to the shortest decimal
/// representation of `value` (so `1.005` becomes `1,01`).
pub fn format_pt_br(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Display for f64 is the shortest round-trip form and never uses exponents.
    let text = format!("{}", value.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    // Integer digits followed by exactly two fraction digits.
    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(2).map_or(false, |d| *d >= b'5') {
        round_up(&mut digits);
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - 2);
    let mut grouped = String::with_capacity(int_digits.len() + int_digits.len() / 3 + 4);
    for (i, d) in int_digits.iter().enumerate() {
        if i > 0 && (int_digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(char::from(b'0' + d));
    }

    let is_zero = digits.iter().all(|d| *d == 0);
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!(
        "{}{},{}{}",
        sign,
        grouped,
        frac_digits[0],
        frac_digits[1]
    )
}

/// Add one unit in the last place to a big-endian decimal digit string.
fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
