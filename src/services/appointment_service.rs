// src/services/appointment_service.rs

use crate::errors::PortalError;
use crate::models::{Appointment, BookAppointmentRequest, Page};
use crate::services::{ApiClient, ApiQuery};
use chrono::NaiveDate;

/// Property viewing appointments on /appointments
pub struct AppointmentService;

impl AppointmentService {
    /// Book a viewing; dates before `today` are refused locally
    pub async fn book(
        api: &ApiClient,
        req: &BookAppointmentRequest,
        today: NaiveDate,
    ) -> Result<Appointment, PortalError> {
        if !req.is_upcoming(today) {
            return Err(PortalError::ValidationError(
                "Appointment date is in the past".to_string(),
            ));
        }
        let appointment: Appointment = api.post("/appointments", req).await?;
        log::info!(
            "Appointment {} booked for property {}",
            appointment.id,
            req.property_id
        );
        Ok(appointment)
    }

    pub async fn list(
        api: &ApiClient,
        query: &ApiQuery,
    ) -> Result<Page<Appointment>, PortalError> {
        api.get_page("/appointments", query).await
    }
}
