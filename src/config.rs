//! Construction parameters for a display: which controller it is, how big the panel is, how it
//! is mounted, and the few per-controller options.

use crate::error::{ConfigError, Error};
use crate::variant::Variant;

/// Rotation of the panel, applied to every image written with `Display::display`. Images are
/// turned counter-clockwise by this amount before they are sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation given in degrees. Only multiples of 90 below 360 are accepted.
    pub fn from_degrees(degrees: u16) -> Result<Self, Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ConfigError::UnsupportedRotation(degrees).into()),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether width and height trade places under this rotation.
    pub fn swaps_axes(self) -> bool {
        match self {
            Rotation::Deg90 | Rotation::Deg270 => true,
            Rotation::Deg0 | Rotation::Deg180 => false,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Deg0
    }
}

/// Panel size in controller pixels, mounting rotation, and the position of the panel's top left
/// pixel within controller RAM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub rotation: Rotation,
    pub offset_left: u16,
    pub offset_top: u16,
}

impl Geometry {
    /// Width of the images accepted by `Display::display`.
    pub fn effective_width(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.height
        } else {
            self.width
        }
    }

    /// Height of the images accepted by `Display::display`.
    pub fn effective_height(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.width
        } else {
            self.height
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize);
        }
        let right = u32::from(self.offset_left) + u32::from(self.width) - 1;
        let bottom = u32::from(self.offset_top) + u32::from(self.height) - 1;
        if right > u32::from(u16::MAX) || bottom > u32::from(u16::MAX) {
            return Err(ConfigError::AddressOverflow);
        }
        Ok(())
    }
}

/// A configuration for the display. Builder methods offer a declarative way to override the
/// controller defaults; anything not set keeps the value given by the `Variant`.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    variant: Variant,
    width: Option<u16>,
    height: Option<u16>,
    rotation: Rotation,
    offset_left: u16,
    offset_top: u16,
    invert: Option<bool>,
}

impl Config {
    /// Create a new configuration for the controller `variant`.
    pub fn new(variant: Variant) -> Self {
        Config {
            variant,
            width: None,
            height: None,
            rotation: Rotation::Deg0,
            offset_left: 0,
            offset_top: 0,
            invert: None,
        }
    }

    /// Extend this `Config` with the panel size in unrotated controller pixels.
    pub fn size(self, width: u16, height: u16) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..self
        }
    }

    /// Extend this `Config` with the mounting rotation. Fixed for the life of the `Display`.
    pub fn rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Extend this `Config` with the column and row of controller RAM where the panel starts.
    /// Needed for panels smaller than the controller's 240x320 RAM that are not wired from 0.
    pub fn offset(self, left: u16, top: u16) -> Self {
        Self {
            offset_left: left,
            offset_top: top,
            ..self
        }
    }

    /// Extend this `Config` to explicitly enable or disable display inversion. Only the ST7789
    /// supports this; IPS panels on it generally need inversion on, which is the default.
    pub fn invert(self, invert: bool) -> Self {
        Self {
            invert: Some(invert),
            ..self
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Check the configuration and resolve defaults into the geometry and inversion setting the
    /// display will use.
    pub(crate) fn resolve(&self) -> Result<(Geometry, Option<bool>), Error> {
        let info = self.variant.info();
        let geometry = Geometry {
            width: self.width.unwrap_or(info.default_width),
            height: self.height.unwrap_or(info.default_height),
            rotation: self.rotation,
            offset_left: self.offset_left,
            offset_top: self.offset_top,
        };
        geometry.validate()?;
        let invert = match (info.default_invert, self.invert) {
            (Some(default), choice) => Some(choice.unwrap_or(default)),
            (None, None) => None,
            (None, Some(_)) => return Err(ConfigError::InvertUnsupported.into()),
        };
        Ok((geometry, invert))
    }
}
