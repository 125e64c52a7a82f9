//! The main API to the display driver. A `Display` owns the transport, brings the controller out
//! of reset into a known state, and writes whole frames or raw data into address windows.

use log::{debug, trace, warn};

use crate::command::{BufCommand, Command};
use crate::config::{Config, Geometry};
use crate::encoder::{self, PixelBuffer};
use crate::error::{ConfigError, Error};
use crate::interface::{DisplayInterface, Line};
use crate::variant::{InitStep, Variant};

/// Largest number of bytes `display` hands to the transport in one write. Kept below the
/// default 4096 byte transfer limit of the Linux spidev driver.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Hold times of the hardware reset pulse.
const RESET_HOLD_MS: u32 = 500;
/// Backlight off time while powering up.
const BACKLIGHT_BLINK_MS: u32 = 100;
/// Time the controller needs between sleep mode transitions.
const SLEEP_SETTLE_MS: u32 = 120;

/// Lifecycle of a `Display`. Moves forward only; `Faulted` is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed, nothing sent yet.
    Uninitialized,
    /// Pulsing the reset line.
    Resetting,
    /// Sending the register initialization sequence.
    Initializing,
    /// Accepting window and pixel writes.
    Ready,
    /// A transport write failed. The display must be rebuilt.
    Faulted,
}

/// Inclusive controller RAM bounds of a write, offsets already applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

/// A driver for an ST7789 or ILI9341 display.
pub struct Display<DI>
where
    DI: DisplayInterface,
{
    iface: DI,
    variant: Variant,
    geometry: Geometry,
    invert: Option<bool>,
    state: ControllerState,
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Construct a new display driver for the display connected to `iface`, as described by
    /// `config`. Nothing is sent until `init` is called.
    pub fn new(iface: DI, config: Config) -> Result<Self, Error> {
        let (geometry, invert) = config.resolve()?;
        Ok(Display {
            iface,
            variant: config.variant(),
            geometry,
            invert,
            state: ControllerState::Uninitialized,
        })
    }

    /// Power up the backlight, pulse the reset line if one is wired, and send the controller's
    /// initialization sequence. Blocks for well over a second when a reset line is present.
    ///
    /// May only be called once. On failure the display is left `Faulted`.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.state != ControllerState::Uninitialized {
            return Err(Error::NotReady(self.state));
        }
        self.faulting(|d| d.run_init())
    }

    fn run_init(&mut self) -> Result<(), Error> {
        let info = self.variant.info();
        debug!(
            "initializing {} {}x{} rotation {}",
            info.name,
            self.geometry.width,
            self.geometry.height,
            self.geometry.rotation.degrees()
        );

        if self.iface.has_line(Line::Backlight) {
            self.iface.set_line(Line::Backlight, false)?;
            self.iface.delay_ms(BACKLIGHT_BLINK_MS);
            self.iface.set_line(Line::Backlight, true)?;
        }

        if self.iface.has_line(Line::Reset) {
            self.state = ControllerState::Resetting;
            for &level in &[true, false, true] {
                self.iface.set_line(Line::Reset, level)?;
                self.iface.delay_ms(RESET_HOLD_MS);
            }
        }

        self.state = ControllerState::Initializing;
        for step in info.init {
            match *step {
                InitStep::Cmd(cmd, args) => BufCommand::Raw(cmd, args).send(&mut self.iface)?,
                InitStep::DelayMs(ms) => self.iface.delay_ms(ms),
                InitStep::Inversion => {
                    Command::SetInversion(self.invert.unwrap_or(false)).send(&mut self.iface)?
                }
            }
        }

        self.state = ControllerState::Ready;
        debug!("{} ready", info.name);
        Ok(())
    }

    /// Run `f`, moving to `Faulted` if it fails on the transport.
    fn faulting<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let result = f(self);
        if let Err(Error::Io(e)) = result {
            warn!("{} transport failure: {}", self.variant.info().name, e);
            self.state = ControllerState::Faulted;
        }
        result
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            ControllerState::Ready => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }

    /// Where the display is in its lifecycle.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The controller this display was built for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Panel size, rotation and offsets, with controller defaults filled in.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Width of the images `display` accepts, accounting for rotation.
    pub fn effective_width(&self) -> u16 {
        self.geometry.effective_width()
    }

    /// Height of the images `display` accepts, accounting for rotation.
    pub fn effective_height(&self) -> u16 {
        self.geometry.effective_height()
    }

    /// Compute the controller RAM window for panel columns `x0..=x1` and rows `y0..=y1`. `x1` and
    /// `y1` default to the last column and row of the panel. The window must lie on the panel;
    /// the panel offsets are then added to all four bounds.
    pub fn address_window(
        &self,
        x0: u16,
        y0: u16,
        x1: Option<u16>,
        y1: Option<u16>,
    ) -> Result<AddressWindow, Error> {
        let Geometry {
            width,
            height,
            offset_left,
            offset_top,
            ..
        } = self.geometry;
        let x1 = x1.unwrap_or(width - 1);
        let y1 = y1.unwrap_or(height - 1);
        if x0 > x1 || y0 > y1 || x1 >= width || y1 >= height {
            return Err(Error::InvalidDimensions {
                expected: (width, height),
                actual: (x1.saturating_add(1), y1.saturating_add(1)),
            });
        }
        Ok(AddressWindow {
            x0: x0 + offset_left,
            y0: y0 + offset_top,
            x1: x1 + offset_left,
            y1: y1 + offset_top,
        })
    }

    /// Set the pixel address window for following data writes, and put the controller in memory
    /// write mode. See `address_window` for the bounds.
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: Option<u16>,
        y1: Option<u16>,
    ) -> Result<(), Error> {
        self.ensure_ready()?;
        let window = self.address_window(x0, y0, x1, y1)?;
        self.faulting(|d| d.write_window(window))
    }

    fn write_window(&mut self, w: AddressWindow) -> Result<(), Error> {
        debug!("window ({}, {})..=({}, {})", w.x0, w.y0, w.x1, w.y1);
        Command::ColumnAddressSet(w.x0, w.x1).send(&mut self.iface)?;
        Command::RowAddressSet(w.y0, w.y1).send(&mut self.iface)?;
        BufCommand::WriteMemory(&[]).send(&mut self.iface)?;
        Ok(())
    }

    /// Write a full frame. `image` must be `effective_width()` x `effective_height()`; it is
    /// rotated by the configured rotation, packed into 5-6-5 and streamed in
    /// `DEFAULT_CHUNK_SIZE` pieces. A size mismatch is reported before anything is sent.
    pub fn display(&mut self, image: &PixelBuffer) -> Result<(), Error> {
        self.ensure_ready()?;
        let g = self.geometry;
        let frame = encoder::encode(image, g.rotation, g.width, g.height)?;
        let window = self.address_window(0, 0, None, None)?;
        self.faulting(|d| {
            d.write_window(window)?;
            d.write_chunks(&frame, DEFAULT_CHUNK_SIZE)
        })
    }

    /// Send raw bytes as data, at most `chunk_size` per transport write. Typically follows
    /// `set_window`.
    pub fn send_data_chunked(&mut self, data: &[u8], chunk_size: usize) -> Result<(), Error> {
        self.ensure_ready()?;
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize.into());
        }
        self.faulting(|d| d.write_chunks(data, chunk_size))
    }

    fn write_chunks(&mut self, data: &[u8], chunk_size: usize) -> Result<(), Error> {
        for (i, chunk) in data.chunks(chunk_size).enumerate() {
            trace!("chunk {}: {} bytes", i, chunk.len());
            self.iface.send_data(chunk)?;
        }
        Ok(())
    }

    /// Switch the backlight, if one is wired.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        self.faulting(|d| Ok(d.iface.set_line(Line::Backlight, on)?))
    }

    /// Control sleep mode. Blocks while the controller settles.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        self.faulting(|d| {
            Command::SetSleepMode(enabled).send(&mut d.iface)?;
            d.iface.delay_ms(SLEEP_SETTLE_MS);
            Ok(())
        })
    }

    /// Turn the panel output on or off, keeping display RAM.
    pub fn power(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_ready()?;
        self.faulting(|d| Ok(Command::SetDisplayOn(on).send(&mut d.iface)?))
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }
}
