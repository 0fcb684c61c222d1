pub mod builder;

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest page number accepted; keeps `offset()` inside i64 at any page size.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir { Asc, #[default] Desc }

impl SortDir {
    /// Only an explicit `asc` sorts ascending; anything else is descending.
    pub fn from_token(token: Option<&str>) -> Self {
        if token == Some("asc") { SortDir::Asc } else { SortDir::Desc }
    }
    pub fn as_str(&self) -> &'static str {
        match self { SortDir::Asc => "asc", SortDir::Desc => "desc" }
    }
    pub fn as_sql(&self) -> &'static str {
        match self { SortDir::Asc => "ASC", SortDir::Desc => "DESC" }
    }
    pub fn toggle(&self) -> Self {
        match self { SortDir::Asc => SortDir::Desc, SortDir::Desc => SortDir::Asc }
    }
}

/// 1-based page number plus page size, already sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination { page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

impl Pagination {
    /// Non-numeric or non-positive values fall back to page 1 / the default size.
    /// Oversized values are capped.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(1).min(MAX_PAGE);
        let per_page = parse_positive(per_page)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        Pagination { page, per_page }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// ceil(total / per_page) without going through floats.
pub fn page_count(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).filter(|n| *n > 0)
}
