//! Notification email rendering and the delivery seam.
//!
//! Templates are pure functions over an appointment, so their content is
//! unit-testable; delivery goes through the [`Notifier`] trait. Actual SMTP
//! transport is an external collaborator of this service: the shipped
//! [`LogNotifier`] records deliveries in the log, and tests capture them.

use async_trait::async_trait;
use bookslot_core::models::Appointment;
use bookslot_core::schedule::slots::SlotLabel;
use eyre::Result;

/// A fully rendered notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Notifier that logs each message instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Notification email rendered (delivery handled externally)"
        );
        Ok(())
    }
}

/// Formats a slot label as customers read it, e.g. "2:30 PM".
pub fn format_time_12h(slot: SlotLabel) -> String {
    let hour = slot.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, slot.minute(), meridiem)
}

/// Confirmation sent to the customer right after booking.
pub fn customer_confirmation(business: &str, appointment: &Appointment) -> EmailMessage {
    let notes = appointment
        .notes
        .as_deref()
        .map(|n| format!("Notes: {n}\n"))
        .unwrap_or_default();

    EmailMessage {
        to: appointment.email.clone(),
        subject: format!("Appointment Confirmation - {business}"),
        body: format!(
            "Dear {name},\n\n\
             Your appointment has been successfully booked with {business}!\n\n\
             Appointment Details:\n\
             Date: {date}\n\
             Time: {time}\n\
             Status: Pending Confirmation\n\
             {notes}\n\
             We will review your appointment and send you a confirmation shortly.\n\
             If you need to make any changes, please contact us.\n\n\
             Thank you for choosing {business}!\n",
            name = appointment.name,
            date = appointment.date,
            time = format_time_12h(appointment.time),
        ),
    }
}

/// Heads-up sent to the admin address when a new request arrives.
pub fn admin_notification(business: &str, admin: &str, appointment: &Appointment) -> EmailMessage {
    let notes = appointment
        .notes
        .as_deref()
        .map(|n| format!("Notes: {n}\n"))
        .unwrap_or_default();

    EmailMessage {
        to: admin.to_string(),
        subject: format!("New Appointment Request - {business}"),
        body: format!(
            "A new appointment has been requested:\n\n\
             Name: {name}\n\
             Phone: {phone}\n\
             Email: {email}\n\
             Date: {date}\n\
             Time: {time}\n\
             {notes}\n\
             Please review and confirm this appointment.\n\
             Appointment ID: {id}\n",
            name = appointment.name,
            phone = appointment.phone_number,
            email = appointment.email,
            date = appointment.date,
            time = format_time_12h(appointment.time),
            id = appointment.id,
        ),
    }
}

/// Update sent to the customer when staff change the appointment status.
pub fn status_update(business: &str, appointment: &Appointment) -> EmailMessage {
    let status = capitalize(appointment.status.as_str());
    let notes = appointment
        .notes
        .as_deref()
        .map(|n| format!("Admin Notes: {n}\n"))
        .unwrap_or_default();

    EmailMessage {
        to: appointment.email.clone(),
        subject: format!("Appointment {status} - {business}"),
        body: format!(
            "Dear {name},\n\n\
             Your appointment status has been updated:\n\n\
             Date: {date}\n\
             Time: {time}\n\
             New Status: {status}\n\
             {notes}\n\
             If you have any questions, please contact us.\n\n\
             Thank you for choosing {business}!\n",
            name = appointment.name,
            date = appointment.date,
            time = format_time_12h(appointment.time),
        ),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
