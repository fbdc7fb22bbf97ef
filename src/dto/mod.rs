//! DTOs de los servicios externos
//!
//! Este módulo contiene las formas del wire de los tres colaboradores
//! remotos: el servicio de reservas, el de perfil y el host de imágenes.

pub mod profile_dto;
pub mod rental_dto;
pub mod upload_dto;

pub use profile_dto::{AvatarUpdateRequest, ProfilePayload, UpdateProfileRequest};
pub use rental_dto::{RentalConfirmation, RentalDetailRequest};
pub use upload_dto::AssetUploadResponse;
