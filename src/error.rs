//! Error types returned by the driver.

use core::fmt;

use crate::display::ControllerState;

/// Reasons a configuration was rejected before any I/O took place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    ZeroSize,
    /// Size plus offset does not fit the 16-bit column/row address registers.
    AddressOverflow,
    /// Rotation must be one of 0, 90, 180 or 270 degrees.
    UnsupportedRotation(u16),
    /// The selected controller has no display inversion option.
    InvertUnsupported,
    /// Data chunks must hold at least one byte.
    ZeroChunkSize,
    /// The SPI bus number is not available on this host.
    InvalidBus(u8),
    /// The chip select number is not available on this bus.
    InvalidChipSelect(u8),
    /// SPI clock mode must be 0-3.
    InvalidClockMode(u8),
    /// A GPIO line could not be claimed as an output.
    InvalidLine(u8),
}

/// The part of the transport which failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoError {
    /// The SPI bus rejected a transfer.
    Spi,
    /// The data/command select line could not be driven.
    DataCommand,
    /// The reset line could not be driven.
    Reset,
    /// The backlight line could not be driven.
    Backlight,
    /// The GPIO controller could not be opened.
    Gpio,
}

/// Any failure reported by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid construction parameters. See `ConfigError`.
    Configuration(ConfigError),
    /// A transport write or line change failed. The controller is `Faulted` afterwards.
    Io(IoError),
    /// A pixel buffer or address window does not fit the display. Sizes are (width, height).
    InvalidDimensions {
        expected: (u16, u16),
        actual: (u16, u16),
    },
    /// The operation needs a `Ready` controller.
    NotReady(ControllerState),
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Configuration(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroSize => write!(f, "display size must be non-zero"),
            ConfigError::AddressOverflow => {
                write!(f, "display size plus offset exceeds 16-bit addressing")
            }
            ConfigError::UnsupportedRotation(deg) => {
                write!(f, "unsupported rotation {} (use 0, 90, 180 or 270)", deg)
            }
            ConfigError::InvertUnsupported => {
                write!(f, "controller does not support the invert option")
            }
            ConfigError::ZeroChunkSize => write!(f, "chunk size must be non-zero"),
            ConfigError::InvalidBus(bus) => write!(f, "invalid SPI bus {}", bus),
            ConfigError::InvalidChipSelect(cs) => write!(f, "invalid chip select {}", cs),
            ConfigError::InvalidClockMode(mode) => write!(f, "invalid SPI clock mode {}", mode),
            ConfigError::InvalidLine(pin) => write!(f, "GPIO {} unavailable as output", pin),
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let what = match self {
            IoError::Spi => "SPI transfer",
            IoError::DataCommand => "data/command line",
            IoError::Reset => "reset line",
            IoError::Backlight => "backlight line",
            IoError::Gpio => "GPIO access",
        };
        write!(f, "{} failed", what)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "configuration error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidDimensions { expected, actual } => write!(
                f,
                "invalid dimensions: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Error::NotReady(state) => write!(f, "controller not ready (state {:?})", state),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
