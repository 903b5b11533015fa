//! Low-level text scanning: field splitting and locale-free numeric and
//! timestamp decoding.
//!
//! The numeric decoders return `Option` rather than panicking or erroring:
//! `None` means no digit was consumed. Each format decoder picks its own
//! policy at the call site — the table and binary paths degrade a `None` to
//! zero, the pipe-log path turns it into a parse error.

/// Split `line` on every occurrence of `delimiter` into zero-copy spans.
///
/// Empty spans are preserved for consecutive, leading, and trailing
/// delimiters. No quoting or escaping; a delimiter inside a value is always
/// a field boundary.
pub fn split_fields<'a>(line: &'a str, delimiter: u8, fields: &mut Vec<&'a str>) {
    fields.clear();
    let bytes = line.as_bytes();
    let mut start = 0;
    for (pos, &b) in bytes.iter().enumerate() {
        if b == delimiter {
            fields.push(&line[start..pos]);
            start = pos + 1;
        }
    }
    fields.push(&line[start..]);
}

/// Decode an ASCII decimal floating value.
///
/// Optional leading sign, base-10 digits, optional `.` followed by fraction
/// digits accumulated with a shrinking power-of-ten factor. No exponent
/// notation, no hex, no overflow checking. Trailing garbage after the last
/// digit is ignored.
pub fn decode_f64(s: &[u8]) -> Option<f64> {
    if s.is_empty() {
        return None;
    }

    let mut result = 0.0f64;
    let mut sign = 1.0f64;
    let mut i = 0;
    let mut any_digit = false;

    match s[0] {
        b'-' => {
            sign = -1.0;
            i = 1;
        }
        b'+' => i = 1,
        _ => {}
    }

    while i < s.len() && s[i].is_ascii_digit() {
        result = result * 10.0 + f64::from(s[i] - b'0');
        any_digit = true;
        i += 1;
    }

    if i < s.len() && s[i] == b'.' {
        i += 1;
        let mut factor = 0.1f64;
        while i < s.len() && s[i].is_ascii_digit() {
            result += f64::from(s[i] - b'0') * factor;
            factor *= 0.1;
            any_digit = true;
            i += 1;
        }
    }

    if any_digit {
        Some(result * sign)
    } else {
        None
    }
}

/// Decode an ASCII decimal integer. Same contract as [`decode_f64`].
pub fn decode_i32(s: &[u8]) -> Option<i32> {
    if s.is_empty() {
        return None;
    }

    let mut result = 0i64;
    let mut sign = 1i64;
    let mut i = 0;
    let mut any_digit = false;

    match s[0] {
        b'-' => {
            sign = -1;
            i = 1;
        }
        b'+' => i = 1,
        _ => {}
    }

    while i < s.len() && s[i].is_ascii_digit() {
        result = result * 10 + i64::from(s[i] - b'0');
        any_digit = true;
        i += 1;
    }

    if any_digit {
        Some((result * sign) as i32)
    } else {
        None
    }
}

// Cumulative days before the start of each month (non-leap year).
const MONTH_DAYS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Decode a timestamp value into epoch milliseconds.
///
/// Two shapes are recognized, tried in order:
///
/// 1. A pure digit string of at most 13 characters is taken as an
///    already-epoch-millisecond value.
/// 2. A fixed-width date-time of at least 19 characters with `T` or space at
///    offset 10 is read positionally as `YYYY-MM-DDThh:mm:ss`; anything past
///    the first 19 characters (fractional seconds, timezone) is ignored.
///
/// Any other shape decodes to 0. No error is ever raised.
///
/// The day count uses a simplified Gregorian rule: every year divisible by 4
/// is treated as a leap year, so century years not divisible by 400 diverge
/// from the true calendar. This approximation is part of the format contract
/// and is kept as-is.
pub fn decode_timestamp(s: &str) -> i64 {
    if s.is_empty() {
        return 0;
    }

    let bytes = s.as_bytes();

    if bytes.len() <= 13 && bytes.iter().all(|b| b.is_ascii_digit()) {
        let mut result = 0i64;
        for &b in bytes {
            result = result * 10 + i64::from(b - b'0');
        }
        return result;
    }

    if bytes.len() >= 19 && (bytes[10] == b'T' || bytes[10] == b' ') {
        let d = |i: usize| i64::from(bytes[i].wrapping_sub(b'0'));
        let year = d(0) * 1000 + d(1) * 100 + d(2) * 10 + d(3);
        let month = d(5) * 10 + d(6);
        let day = d(8) * 10 + d(9);
        let hour = d(11) * 10 + d(12);
        let min = d(14) * 10 + d(15);
        let sec = d(17) * 10 + d(18);

        // Garbage digit positions can put month out of range.
        if !(1..=12).contains(&month) {
            return 0;
        }

        let mut days = (year - 1970) * 365 + (year - 1969) / 4;
        days += MONTH_DAYS[(month - 1) as usize] + day - 1;
        if month > 2 && year % 4 == 0 {
            days += 1;
        }

        return (days * 86400 + hour * 3600 + min * 60 + sec) * 1000;
    }

    0
}
