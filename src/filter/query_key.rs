use super::types::RangeOp;

/// Separator between a base key and its range operator (`createdAt_gt`)
pub const RANGE_SEPARATOR: char = '_';

/// A raw query key split into its base key and optional range operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKey<'a> {
    pub base: &'a str,
    pub range: Option<RangeOp>,
}

impl<'a> QueryKey<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if let Some((base, suffix)) = raw.rsplit_once(RANGE_SEPARATOR) {
            if !base.is_empty() {
                if let Some(op) = RangeOp::from_suffix(suffix) {
                    return Self { base, range: Some(op) };
                }
            }
        }
        Self { base: raw, range: None }
    }
}

/// True when `key` ends in a reserved range suffix
pub fn has_range_suffix(key: &str) -> bool {
    QueryKey::parse(key).range.is_some()
}
