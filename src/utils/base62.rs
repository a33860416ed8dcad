//! Base62 codec for short codes.
//!
//! A short code is the base62 representation of the link's numeric id, using
//! the alphabet `0-9a-z A-Z` (most significant digit first, no padding).
//! Encoding is a bijection between non-negative ids and canonical codes, so
//! codes are unique whenever ids are.

/// Digits in value order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: i64 = 62;

/// Errors returned by [`encode`] and [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("Cannot encode negative id {0}")]
    Negative(i64),

    #[error("Short code is empty")]
    Empty,

    #[error("Invalid character {0:?} in short code")]
    InvalidChar(char),

    #[error("Short code is out of range")]
    Overflow,
}

/// Encodes a non-negative id.
///
/// ```ignore
/// assert_eq!(encode(0).unwrap(), "0");
/// assert_eq!(encode(61).unwrap(), "Z");
/// assert_eq!(encode(62).unwrap(), "10");
/// ```
pub fn encode(id: i64) -> Result<String, Base62Error> {
    if id < 0 {
        return Err(Base62Error::Negative(id));
    }

    if id == 0 {
        return Ok("0".to_string());
    }

    let mut n = id;
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Decodes a short code back to its id.
///
/// Leading zero digits are accepted, so `decode` is the inverse of
/// [`encode`] on canonical codes only.
pub fn decode(code: &str) -> Result<i64, Base62Error> {
    if code.is_empty() {
        return Err(Base62Error::Empty);
    }

    code.chars().try_fold(0i64, |acc, c| {
        let digit = digit_value(c).ok_or(Base62Error::InvalidChar(c))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Base62Error::Overflow)
    })
}

fn digit_value(c: char) -> Option<i64> {
    let v = match c {
        '0'..='9' => c as u8 - b'0',
        'a'..='z' => c as u8 - b'a' + 10,
        'A'..='Z' => c as u8 - b'A' + 36,
        _ => return None,
    };
    Some(i64::from(v))
}
