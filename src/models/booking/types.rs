use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The fixed set of booking types a clinic offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingType {
    Consultation,
    Checkup,
    FollowUp,
    Treatment,
    Emergency,
}

impl BookingType {
    pub const ALL: [BookingType; 5] = [
        BookingType::Consultation,
        BookingType::Checkup,
        BookingType::FollowUp,
        BookingType::Treatment,
        BookingType::Emergency,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "consultation" => Some(BookingType::Consultation),
            "checkup" => Some(BookingType::Checkup),
            "follow_up" | "followUp" => Some(BookingType::FollowUp),
            "treatment" => Some(BookingType::Treatment),
            "emergency" => Some(BookingType::Emergency),
            _ => None,
        }
    }

    /// Value stored in `bookings.booking_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Consultation => "consultation",
            BookingType::Checkup => "checkup",
            BookingType::FollowUp => "follow_up",
            BookingType::Treatment => "treatment",
            BookingType::Emergency => "emergency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingType::Consultation => "Consultation",
            BookingType::Checkup => "Check-up",
            BookingType::FollowUp => "Follow-up",
            BookingType::Treatment => "Treatment",
            BookingType::Emergency => "Emergency",
        }
    }
}

/// Booking row as shown in the dashboard table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub clinic_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub booking_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub slot: i32,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn type_label(&self) -> &str {
        match BookingType::parse(&self.booking_type) {
            Some(t) => t.label(),
            None => &self.booking_type,
        }
    }

    pub fn appointment_display(&self) -> String {
        format!("{} {}", self.date.format("%Y-%m-%d"), self.time.format("%H:%M"))
    }

    pub fn created_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// One page slice plus the totals needed to paginate.
#[derive(Debug)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub page_count: i64,
}

/// Booking data for creation (demo seed and tests).
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub clinic_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub booking_type: BookingType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub slot: i32,
    pub created_at: DateTime<Utc>,
}
