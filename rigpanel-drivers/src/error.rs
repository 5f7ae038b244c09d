//! Driver error types

use core::fmt;

/// Caller passed arguments the device protocol cannot express
///
/// Raised before any bus traffic; never retried or corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// CGRAM slot outside 0-7
    GlyphSlot(u8),
    /// Glyph bitmap is not 8x5 = 40 values
    GlyphLength(usize),
    /// Display row does not exist
    Row(u8),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::GlyphSlot(slot) => write!(f, "glyph slot {} out of range", slot),
            ValidationError::GlyphLength(len) => {
                write!(f, "glyph bitmap has {} values, expected 40", len)
            }
            ValidationError::Row(row) => write!(f, "display row {} out of range", row),
        }
    }
}

/// Errors returned by the device drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus open, address bind or transfer failed
    Io(E),
    /// Invalid arguments, no transaction was attempted
    Validation(ValidationError),
}

impl<E> From<ValidationError> for Error<E> {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I2C error: {:?}", e),
            Error::Validation(e) => fmt::Display::fmt(e, f),
        }
    }
}
