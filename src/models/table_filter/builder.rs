use chrono::{DateTime, Utc};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

/// A typed value bound to a `$N` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Text(String),
    TextList(Vec<String>),
    Timestamp(DateTime<Utc>),
}

/// Parameterized WHERE fragment built up one condition at a time.
/// Conditions are AND-ed; placeholders are numbered in push order starting at $1.
#[derive(Debug, Default)]
pub struct WhereClause {
    parts: Vec<String>,
    params: Vec<BindValue>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. `{}` in `template` is replaced by the next placeholder.
    /// `template` must be a hardcoded SQL expression, never user input.
    pub fn push(&mut self, template: &str, value: BindValue) -> &mut Self {
        let placeholder = format!("${}", self.params.len() + 1);
        self.parts.push(template.replace("{}", &placeholder));
        self.params.push(value);
        self
    }

    pub fn sql(&self) -> String {
        if self.parts.is_empty() {
            return "TRUE".to_string();
        }
        self.parts.join(" AND ")
    }

    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    /// Index of the first placeholder free for the caller (LIMIT/OFFSET etc).
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }
}

/// Bind every value of a WhereClause, in order, onto a query.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in params {
        query = match value {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v.clone()),
            BindValue::TextList(v) => query.bind(v.clone()),
            BindValue::Timestamp(v) => query.bind(*v),
        };
    }
    query
}

/// `%needle%` for (I)LIKE, with the wildcard characters in `needle` escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
