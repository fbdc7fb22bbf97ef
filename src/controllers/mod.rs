//! Controladores de los workflows
//!
//! Este módulo contiene las dos máquinas de estados de la aplicación:
//! la confirmación de reserva y la edición de perfil.

pub mod booking_controller;
pub mod profile_controller;

pub use booking_controller::BookingConfirmationController;
pub use profile_controller::ProfileController;
