//! Error types for the status display and its OLED driver.

use core::fmt;

use display_interface::DisplayError;

/// Contract violations reported by the status renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    /// Slot index is out of bounds (must be < the slot table length).
    InvalidSlotIndex,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatusError::InvalidSlotIndex => write!(f, "Invalid slot index"),
        }
    }
}

/// Errors that can occur during SSD1331 operations.
///
/// SPI and data/command pin failures are folded into [`DisplayError`], so
/// this enum is non-generic.
#[derive(Debug)]
pub enum OledError {
    /// Display interface error (wraps SPI and D/C pin failures).
    Display(DisplayError),
    /// Display hardware did not accept the initialisation sequence.
    InitializationFailed,
    /// A flush was attempted before [`OledDriver::init()`](crate::OledDriver::init)
    /// succeeded.
    NotInitialized,
    /// The reset pin could not be driven.
    Pin,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Display(e) => write!(f, "Display interface error: {:?}", e),
            OledError::InitializationFailed => write!(f, "Initialization failed"),
            OledError::NotInitialized => write!(f, "Not initialized"),
            OledError::Pin => write!(f, "Reset pin error"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_e) => defmt::write!(f, "Display interface error"),
            OledError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
            OledError::Pin => defmt::write!(f, "Reset pin error"),
        }
    }
}
