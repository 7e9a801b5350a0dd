// src/models/appointment.rs
// DOCUMENTATION: Property viewing appointments
// PURPOSE: Booking form and appointment rows

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{format_date, status_label, NamedRef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub property: Option<NamedRef>,
    pub name: String,
    pub phone: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRow {
    pub id: i64,
    pub property: String,
    pub name: String,
    pub phone: String,
    pub when: String,
    pub status: String,
    pub status_label: &'static str,
    pub booked_at: Option<String>,
}

impl Appointment {
    pub fn to_row(&self) -> AppointmentRow {
        let status = self.status.clone().unwrap_or_else(|| "pending".to_string());
        let date = self.scheduled_date.format("%Y-%m-%d").to_string();
        AppointmentRow {
            id: self.id,
            property: self
                .property
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            name: self.name.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            when: match &self.scheduled_time {
                Some(time) => format!("{} {}", date, time),
                None => date,
            },
            status_label: status_label(&status),
            status,
            booked_at: format_date(self.created_at),
        }
    }
}

/// Viewing request from a property page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookAppointmentRequest {
    pub property_id: i64,

    #[validate(length(min = 2, max = 120))]
    pub name: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: String,

    pub scheduled_date: NaiveDate,

    pub scheduled_time: NaiveTime,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl BookAppointmentRequest {
    /// Bookings must be for today or later
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.scheduled_date >= today
    }
}
