//! Driver library for the Sitronix ST7789 and Ilitek ILI9341 TFT LCD display controllers, driven
//! over 4-wire SPI with 16 bit 5-6-5 colour.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
mod testing {
    macro_rules! send {
        ([$($d:tt),*]) => {$crate::interface::test_spy::Sent::Data(vec![$($d,)*])};
        ((delay $ms:tt)) => {$crate::interface::test_spy::Sent::Delay($ms)};
        ((reset $l:tt)) => {
            $crate::interface::test_spy::Sent::Line($crate::interface::Line::Reset, $l)
        };
        ((backlight $l:tt)) => {
            $crate::interface::test_spy::Sent::Line($crate::interface::Line::Backlight, $l)
        };
        ($c:tt) => {$crate::interface::test_spy::Sent::Cmd($c)};
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$(send!($e),)*]};
    }
}

pub mod command;
pub mod config;
pub mod display;
pub mod encoder;
pub mod error;
pub mod interface;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod variant;

// Re-exports for primary API.
pub use config::{Config, Geometry, Rotation};
pub use display::{AddressWindow, ControllerState, Display};
pub use encoder::{EncodedFrame, PixelBuffer};
pub use error::{ConfigError, Error, IoError};
pub use interface::spi::SpiInterface;
pub use interface::{DisplayInterface, Line};
pub use variant::Variant;
