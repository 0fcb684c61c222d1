use askama::Template;

use crate::models::booking::{BookingListParams, BookingPage, BookingSort, BookingType, SortColumn};
use crate::models::clinic::Clinic;
use crate::models::table_filter::SortDir;
use super::PageContext;

pub const BOOKINGS_PATH: &str = "/dashboard/bookings";
pub const EXPORT_PATH: &str = "/dashboard/bookings/export.csv";

/// Page links shown on either side of the current page.
const PAGE_WINDOW: i64 = 3;

const TABLE_COLUMNS: &[(&str, SortColumn)] = &[
    ("Last name", SortColumn::LastName),
    ("First name", SortColumn::FirstName),
    ("Email", SortColumn::Email),
    ("Phone", SortColumn::Phone),
    ("Type", SortColumn::Type),
    ("Appointment", SortColumn::Date),
    ("Slot", SortColumn::Slot),
    ("Created", SortColumn::CreatedAt),
];

pub struct SortHeader {
    pub label: &'static str,
    pub href: String,
    pub indicator: &'static str,
}

pub struct PageLink {
    pub number: i64,
    pub href: String,
    pub current: bool,
}

pub struct TypeOption {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

/// Table shell for the bookings dashboard.
#[derive(Template)]
#[template(path = "bookings/list.html")]
pub struct BookingListTemplate {
    pub ctx: PageContext,
    pub clinic_id: i64,
    pub clinic_name: String,
    pub booking_page: BookingPage,
    pub headers: Vec<SortHeader>,
    pub pages: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub type_options: Vec<TypeOption>,
    pub hidden_fields: Vec<HiddenField>,
    pub export_href: String,
    pub clear_href: String,
    pub filter_active: bool,
    pub last_name: String,
    pub email: String,
    pub from: String,
    pub to: String,
}

impl BookingListTemplate {
    pub fn new(
        ctx: PageContext,
        clinic: &Clinic,
        booking_page: BookingPage,
        params: &BookingListParams,
    ) -> Self {
        let page = booking_page.page;
        let page_count = booking_page.page_count;

        let headers = TABLE_COLUMNS
            .iter()
            .map(|&(label, column)| sort_header(params, label, column))
            .collect();

        let first = page.saturating_sub(PAGE_WINDOW).max(1);
        let last = page.saturating_add(PAGE_WINDOW).min(page_count);
        let pages = (first..=last)
            .map(|number| PageLink {
                number,
                href: params.href(BOOKINGS_PATH, number, None),
                current: number == page,
            })
            .collect();

        let prev_href = (page > 1 && page_count > 0)
            .then(|| params.href(BOOKINGS_PATH, (page - 1).min(page_count), None));
        let next_href = (page < page_count).then(|| params.href(BOOKINGS_PATH, page + 1, None));

        let type_options = BookingType::ALL
            .iter()
            .map(|t| type_option(params, *t))
            .collect();

        let mut hidden_fields = vec![];
        for (name, value) in params.query_pairs() {
            if matches!(name, "per_page" | "sort" | "type") {
                hidden_fields.push(HiddenField { name, value });
            }
        }

        let mut cleared = BookingListParams::default();
        cleared.pagination.per_page = params.pagination.per_page;
        cleared.sort = params.sort;

        let filter = &params.filter;
        Self {
            ctx,
            clinic_id: clinic.id,
            clinic_name: clinic.name.clone(),
            booking_page,
            headers,
            pages,
            prev_href,
            next_href,
            type_options,
            hidden_fields,
            export_href: params.href(EXPORT_PATH, 1, None),
            clear_href: cleared.href(BOOKINGS_PATH, 1, None),
            filter_active: !filter.is_empty(),
            last_name: filter.last_name.clone().unwrap_or_default(),
            email: filter.email.clone().unwrap_or_default(),
            from: filter.from.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            to: filter.to.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        }
    }
}

/// Clicking the active column flips its direction; any other column starts ascending.
fn sort_header(params: &BookingListParams, label: &'static str, column: SortColumn) -> SortHeader {
    let active = params.sort.column == column;
    let dir = if active { params.sort.dir.toggle() } else { SortDir::Asc };
    let indicator = match (active, params.sort.dir) {
        (false, _) => "",
        (true, SortDir::Asc) => "▲",
        (true, SortDir::Desc) => "▼",
    };
    SortHeader {
        label,
        href: params.href(BOOKINGS_PATH, 1, Some(BookingSort { column, dir })),
        indicator,
    }
}

/// Link that toggles one type in or out of the type filter.
fn type_option(params: &BookingListParams, booking_type: BookingType) -> TypeOption {
    let active = params.filter.types.contains(&booking_type);
    let mut toggled = params.clone();
    if active {
        toggled.filter.types.retain(|t| *t != booking_type);
    } else {
        toggled.filter.types.push(booking_type);
    }
    toggled.filter.type_param = if toggled.filter.types.is_empty() {
        None
    } else {
        Some(toggled.filter.types_token())
    };
    TypeOption {
        label: booking_type.label(),
        href: toggled.href(BOOKINGS_PATH, 1, None),
        active,
    }
}
