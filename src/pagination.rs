//! Page/limit normalization for list endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Raw pagination parameters as they arrive in a query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl Pagination {
    /// Missing, non-integer, or non-positive values fall back to the defaults
    pub fn normalize(raw: &PageQuery) -> Self {
        Self {
            page: parse_positive(raw.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(raw.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Lower `limit` to `max_limit` when a maximum is configured
    pub fn capped(mut self, max_limit: Option<u32>) -> Self {
        if let Some(max) = max_limit.filter(|max| *max > 0) {
            if self.limit > max {
                tracing::warn!("Limit {} exceeds max {}, capping to max", self.limit, max);
                self.limit = max;
            }
        }
        self
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value <= 0 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        assert_eq!(Pagination::normalize(&PageQuery::default()), Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn non_positive_values_use_defaults() {
        let p = Pagination::normalize(&PageQuery::new(Some("-5"), Some("0")));
        assert_eq!(p, Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn parses_valid_values() {
        let p = Pagination::normalize(&PageQuery::new(Some("3"), Some("50")));
        assert_eq!(p, Pagination { page: 3, limit: 50 });
        assert_eq!(p.offset(), 100);
    }

    #[test]
    fn garbage_uses_defaults() {
        let p = Pagination::normalize(&PageQuery::new(Some("two"), Some("1.5")));
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn huge_values_saturate() {
        let p = Pagination::normalize(&PageQuery::new(Some("99999999999"), None));
        assert_eq!(p.page, u32::MAX);
        assert_eq!(p.offset(), u64::from(u32::MAX - 1) * 20);
    }

    #[test]
    fn caps_limit() {
        let p = Pagination { page: 1, limit: 500 };
        assert_eq!(p.capped(Some(100)).limit, 100);
        assert_eq!(p.capped(None).limit, 500);
        assert_eq!(Pagination { page: 1, limit: 50 }.capped(Some(100)).limit, 50);
    }
}
