//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de los dos workflows:
//! el borrador de reserva y el perfil de cuenta.

pub mod profile;
pub mod rental;

pub use profile::{EditableProfile, ProfileEditState, ProfileField, UserProfile};
pub use rental::{
    Attachment, BookingState, RentalDraft, RentalField, RentalFieldFlags, ResubmitPolicy,
};
