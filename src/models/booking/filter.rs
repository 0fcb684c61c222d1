use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::table_filter::builder::{BindValue, WhereClause, contains_pattern};
use crate::models::table_filter::{Pagination, SortDir};
use super::types::BookingType;

/// Sortable booking columns. Query-string keys use the camelCase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Type,
    Date,
    Time,
    Slot,
    CreatedAt,
}

impl SortColumn {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "id" => Some(SortColumn::Id),
            "firstName" | "first_name" => Some(SortColumn::FirstName),
            "lastName" | "last_name" => Some(SortColumn::LastName),
            "email" => Some(SortColumn::Email),
            "phone" => Some(SortColumn::Phone),
            "type" | "booking_type" => Some(SortColumn::Type),
            "date" => Some(SortColumn::Date),
            "time" => Some(SortColumn::Time),
            "slot" => Some(SortColumn::Slot),
            "createdAt" | "created_at" => Some(SortColumn::CreatedAt),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::FirstName => "firstName",
            SortColumn::LastName => "lastName",
            SortColumn::Email => "email",
            SortColumn::Phone => "phone",
            SortColumn::Type => "type",
            SortColumn::Date => "date",
            SortColumn::Time => "time",
            SortColumn::Slot => "slot",
            SortColumn::CreatedAt => "createdAt",
        }
    }

    /// Hardcoded SQL expression, never user input.
    fn sql(&self) -> &'static str {
        match self {
            SortColumn::Id => "b.id",
            SortColumn::FirstName => "b.first_name",
            SortColumn::LastName => "b.last_name",
            SortColumn::Email => "b.email",
            SortColumn::Phone => "b.phone",
            SortColumn::Type => "b.booking_type",
            SortColumn::Date => "b.date",
            SortColumn::Time => "b.time",
            SortColumn::Slot => "b.slot",
            SortColumn::CreatedAt => "b.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSort {
    pub column: SortColumn,
    pub dir: SortDir,
}

impl Default for BookingSort {
    fn default() -> Self {
        BookingSort { column: SortColumn::CreatedAt, dir: SortDir::Desc }
    }
}

impl BookingSort {
    /// Parse a `column.direction` token. Unknown columns fall back to newest first.
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else { return Self::default() };
        let mut parts = token.splitn(2, '.');
        let column = parts.next().and_then(SortColumn::parse);
        match column {
            Some(column) => BookingSort { column, dir: SortDir::from_token(parts.next()) },
            None => Self::default(),
        }
    }

    pub fn token(&self) -> String {
        format!("{}.{}", self.column.key(), self.dir.as_str())
    }

    /// ORDER BY body; id breaks ties so pages never overlap.
    pub fn order_by(&self) -> String {
        let dir = self.dir.as_sql();
        if self.column == SortColumn::Id {
            return format!("b.id {dir}");
        }
        format!("{} {dir}, b.id {dir}", self.column.sql())
    }
}

/// Optional predicates on top of the mandatory clinic scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub types: Vec<BookingType>,
    /// Raw `type` value as received. Set while `types` is empty, the
    /// request asked for types none of which exist, so nothing matches.
    pub type_param: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self.last_name.is_none()
            && self.email.is_none()
            && self.types.is_empty()
            && self.type_param.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    /// The single predicate shared by the page query, the count query and the export.
    pub fn where_clause(&self, clinic_id: i64) -> WhereClause {
        let mut w = WhereClause::new();
        w.push("b.clinic_id = {}", BindValue::Int(clinic_id));

        if let Some(last_name) = &self.last_name {
            w.push("b.last_name ILIKE {}", BindValue::Text(contains_pattern(last_name)));
        }
        if !self.types.is_empty() || self.type_param.is_some() {
            // An empty list makes `= ANY` false for every row.
            let types = self.types.iter().map(|t| t.as_str().to_string()).collect();
            w.push("b.booking_type = ANY({})", BindValue::TextList(types));
        }
        if let Some(email) = &self.email {
            w.push("b.email ILIKE {}", BindValue::Text(contains_pattern(email)));
        }
        if let Some(start) = self.from.and_then(start_of_day) {
            w.push("b.created_at >= {}", BindValue::Timestamp(start));
        }
        // Upper bound covers the whole `to` day.
        if let Some(end) = self.to.and_then(|d| d.succ_opt()).and_then(start_of_day) {
            w.push("b.created_at < {}", BindValue::Timestamp(end));
        }
        w
    }

    /// `type` query value: dot-separated stored names.
    pub fn types_token(&self) -> String {
        self.types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(".")
    }
}

/// Everything the bookings list reads from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingListParams {
    pub pagination: Pagination,
    pub sort: BookingSort,
    pub filter: BookingFilter,
}

impl BookingListParams {
    /// `date`, `time` and `slot` may be present in the query string; they are ignored.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let get = |key: &str| query.get(key).map(String::as_str);

        let pagination = Pagination::from_params(get("page"), get("per_page"));
        let sort = BookingSort::from_token(get("sort"));
        let filter = BookingFilter {
            last_name: non_empty(get("lastName")),
            email: non_empty(get("email")),
            types: parse_types(get("type")),
            type_param: non_empty(get("type")),
            from: get("from").and_then(parse_day),
            to: get("to").and_then(parse_day),
        };

        BookingListParams { pagination, sort, filter }
    }

    /// Query pairs describing this view, without `page`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];
        if self.pagination.per_page != Pagination::default().per_page {
            pairs.push(("per_page", self.pagination.per_page.to_string()));
        }
        if self.sort != BookingSort::default() {
            pairs.push(("sort", self.sort.token()));
        }
        if let Some(v) = &self.filter.last_name {
            pairs.push(("lastName", v.clone()));
        }
        if !self.filter.types.is_empty() {
            pairs.push(("type", self.filter.types_token()));
        } else if let Some(raw) = &self.filter.type_param {
            pairs.push(("type", raw.clone()));
        }
        if let Some(v) = &self.filter.email {
            pairs.push(("email", v.clone()));
        }
        if let Some(d) = self.filter.from {
            pairs.push(("from", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.filter.to {
            pairs.push(("to", d.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// Link to `base` for this view at `page`, optionally with another sort.
    pub fn href(&self, base: &str, page: i64, sort: Option<BookingSort>) -> String {
        let mut view = self.clone();
        if let Some(sort) = sort {
            view.sort = sort;
        }
        let mut pairs = view.query_pairs();
        if page > 1 {
            pairs.push(("page", page.to_string()));
        }
        if pairs.is_empty() {
            return base.to_string();
        }
        let qs = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        format!("{base}?{qs}")
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Unknown entries are dropped; duplicates collapse.
fn parse_types(raw: Option<&str>) -> Vec<BookingType> {
    let mut types: Vec<BookingType> = vec![];
    for t in raw.unwrap_or("").split('.').filter_map(BookingType::parse) {
        if !types.contains(&t) {
            types.push(t);
        }
    }
    types
}

/// `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its UTC day).
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn start_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}
