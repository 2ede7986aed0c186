pub mod appointment;
pub mod availability;
