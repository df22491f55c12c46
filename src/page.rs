//! Page/size windowing for the product listing.

use crate::request::Request;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;

/// A validated `page`/`size` pair. Both are always `>= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub size: i64,
}

impl Page {
    /// Reads `page` and `size` from the query string.
    ///
    /// Invalid input never fails the request: anything that does not start
    /// with an integer `>= 1` falls back to the default.
    pub fn from_request(req: &Request) -> Self {
        Self::from_raw(
            req.query_param("page").as_deref(),
            req.query_param("size").as_deref(),
        )
    }

    pub fn from_raw(page: Option<&str>, size: Option<&str>) -> Self {
        Self {
            page: coerce(page, DEFAULT_PAGE),
            size: coerce(size, DEFAULT_SIZE),
        }
    }

    /// Rows to skip: `(page - 1) * size`, saturating on overflow.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, size: DEFAULT_SIZE }
    }
}

fn coerce(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_int).filter(|n| *n >= 1).unwrap_or(default)
}

/// Parses the integer at the start of `s`, ignoring anything after it.
///
/// Leading whitespace and a single sign are accepted, so `" 3"` is 3,
/// `"2.9"` is 2 and `"7px"` is 7. Returns `None` when no digit follows or
/// the value does not fit in an `i64`.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}
