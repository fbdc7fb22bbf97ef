//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de los campos
//! del formulario de reserva y del perfil de cuenta.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Dígitos del número de teléfono, ignorando separadores habituales
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-\.\(\)]").expect("regex válida");
}

/// Validar que un string no esté vacío (tras recortar espacios)
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = PHONE_SEPARATORS.replace_all(value, "");
    let digits = clean_phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 7 || digits > 15 || digits != clean_phone.chars().count() {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que una URL de avatar sea vacía o resoluble (http/https)
pub fn validate_avatar_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    let mut error = ValidationError::new("avatar_url");
    error.add_param("value".into(), &value.to_string());
    Err(error)
}
