//! Transport for displays wired to a Raspberry Pi's SPI header, using the Linux spidev and GPIO
//! character devices through `rppal`.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use log::debug;
use rppal::gpio::{Gpio, OutputPin};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::error::{ConfigError, Error, IoError};
use crate::interface::{DisplayInterface, Line};
use crate::variant::Variant;

static GPIO: Mutex<Option<Gpio>> = Mutex::new(None);

/// Open the GPIO controller on first use and hand out clones of it afterwards.
fn shared_gpio() -> Result<Gpio, Error> {
    let mut slot = GPIO.lock().map_err(|_| IoError::Gpio)?;
    if let Some(gpio) = slot.as_ref() {
        return Ok(gpio.clone());
    }
    let gpio = Gpio::new().map_err(|_| IoError::Gpio)?;
    debug!("opened GPIO controller");
    *slot = Some(gpio.clone());
    Ok(gpio)
}

/// Where and how a display is connected. Pins use BCM numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    pub bus: u8,
    pub chip_select: u8,
    pub dc_pin: u8,
    pub reset_pin: Option<u8>,
    pub backlight_pin: Option<u8>,
    /// Defaults to the controller's known-good clock.
    pub clock_speed_hz: Option<u32>,
    /// Defaults to the controller's clock mode.
    pub clock_mode: Option<u8>,
}

impl TransportConfig {
    pub fn new(bus: u8, chip_select: u8, dc_pin: u8) -> Self {
        TransportConfig {
            bus,
            chip_select,
            dc_pin,
            reset_pin: None,
            backlight_pin: None,
            clock_speed_hz: None,
            clock_mode: None,
        }
    }

    pub fn reset_pin(self, pin: u8) -> Self {
        Self {
            reset_pin: Some(pin),
            ..self
        }
    }

    pub fn backlight_pin(self, pin: u8) -> Self {
        Self {
            backlight_pin: Some(pin),
            ..self
        }
    }

    pub fn clock_speed_hz(self, hz: u32) -> Self {
        Self {
            clock_speed_hz: Some(hz),
            ..self
        }
    }

    pub fn clock_mode(self, mode: u8) -> Self {
        Self {
            clock_mode: Some(mode),
            ..self
        }
    }
}

fn bus(n: u8) -> Result<Bus, ConfigError> {
    Ok(match n {
        0 => Bus::Spi0,
        1 => Bus::Spi1,
        2 => Bus::Spi2,
        3 => Bus::Spi3,
        4 => Bus::Spi4,
        5 => Bus::Spi5,
        6 => Bus::Spi6,
        _ => return Err(ConfigError::InvalidBus(n)),
    })
}

#[cfg_attr(rustfmt, rustfmt_skip)]
fn slave_select(n: u8) -> Result<SlaveSelect, ConfigError> {
    Ok(match n {
        0 => SlaveSelect::Ss0,   1 => SlaveSelect::Ss1,   2 => SlaveSelect::Ss2,
        3 => SlaveSelect::Ss3,   4 => SlaveSelect::Ss4,   5 => SlaveSelect::Ss5,
        6 => SlaveSelect::Ss6,   7 => SlaveSelect::Ss7,   8 => SlaveSelect::Ss8,
        9 => SlaveSelect::Ss9,   10 => SlaveSelect::Ss10, 11 => SlaveSelect::Ss11,
        12 => SlaveSelect::Ss12, 13 => SlaveSelect::Ss13, 14 => SlaveSelect::Ss14,
        15 => SlaveSelect::Ss15,
        _ => return Err(ConfigError::InvalidChipSelect(n)),
    })
}

fn mode(n: u8) -> Result<Mode, ConfigError> {
    Ok(match n {
        0 => Mode::Mode0,
        1 => Mode::Mode1,
        2 => Mode::Mode2,
        3 => Mode::Mode3,
        _ => return Err(ConfigError::InvalidClockMode(n)),
    })
}

/// Claim `pin` as an output that stays driven after it is dropped.
fn output(gpio: &Gpio, pin: u8) -> Result<OutputPin, Error> {
    let mut out = gpio
        .get(pin)
        .map_err(|_| ConfigError::InvalidLine(pin))?
        .into_output();
    out.set_reset_on_drop(false);
    Ok(out)
}

/// spidev bus plus GPIO lines, as a `DisplayInterface`.
///
/// The D/C, reset and backlight lines keep their last level when the interface is dropped, so
/// the panel stays lit and out of reset after the program exits.
pub struct RpiInterface {
    spi: Spi,
    dc: OutputPin,
    reset: Option<OutputPin>,
    backlight: Option<OutputPin>,
}

impl RpiInterface {
    /// Open the bus and claim the lines described by `config`, for a display with controller
    /// `variant`.
    pub fn new(config: &TransportConfig, variant: Variant) -> Result<Self, Error> {
        let info = variant.info();
        let bus = bus(config.bus)?;
        let ss = slave_select(config.chip_select)?;
        let mode = mode(config.clock_mode.unwrap_or(info.default_clock_mode))?;
        let speed = config.clock_speed_hz.unwrap_or(info.default_clock_hz);

        let gpio = shared_gpio()?;
        let dc = output(&gpio, config.dc_pin)?;
        let reset = config.reset_pin.map(|p| output(&gpio, p)).transpose()?;
        let backlight = config
            .backlight_pin
            .map(|p| output(&gpio, p))
            .transpose()?;

        let spi = Spi::new(bus, ss, speed, mode).map_err(|_| IoError::Spi)?;
        debug!(
            "SPI{}.{} at {} Hz, {:?}, D/C on GPIO {}",
            config.bus, config.chip_select, speed, mode, config.dc_pin
        );

        Ok(RpiInterface {
            spi,
            dc,
            reset,
            backlight,
        })
    }
}

impl DisplayInterface for RpiInterface {
    fn send_command(&mut self, cmd: u8) -> Result<(), IoError> {
        self.dc.set_low();
        self.spi.write(&[cmd]).map_err(|_| IoError::Spi)?;
        self.dc.set_high();
        Ok(())
    }

    fn send_data(&mut self, buf: &[u8]) -> Result<(), IoError> {
        self.dc.set_high();
        self.spi.write(buf).map_err(|_| IoError::Spi)?;
        Ok(())
    }

    fn has_line(&self, line: Line) -> bool {
        match line {
            Line::Reset => self.reset.is_some(),
            Line::Backlight => self.backlight.is_some(),
        }
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), IoError> {
        let pin = match line {
            Line::Reset => self.reset.as_mut(),
            Line::Backlight => self.backlight.as_mut(),
        };
        if let Some(pin) = pin {
            if high {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_and_select_ranges() {
        assert_eq!(bus(0), Ok(Bus::Spi0));
        assert_eq!(bus(6), Ok(Bus::Spi6));
        assert_eq!(bus(7), Err(ConfigError::InvalidBus(7)));
        assert_eq!(slave_select(15), Ok(SlaveSelect::Ss15));
        assert_eq!(slave_select(16), Err(ConfigError::InvalidChipSelect(16)));
        assert_eq!(mode(3), Ok(Mode::Mode3));
        assert_eq!(mode(4), Err(ConfigError::InvalidClockMode(4)));
    }

    #[test]
    fn invalid_ids_rejected_before_opening_devices() {
        let cfg = TransportConfig::new(9, 0, 25);
        assert_eq!(
            RpiInterface::new(&cfg, Variant::St7789).err(),
            Some(Error::Configuration(ConfigError::InvalidBus(9)))
        );
        let cfg = TransportConfig::new(0, 0, 25).clock_mode(5);
        assert_eq!(
            RpiInterface::new(&cfg, Variant::Ili9341).err(),
            Some(Error::Configuration(ConfigError::InvalidClockMode(5)))
        );
    }

    #[test]
    #[ignore = "needs Raspberry Pi GPIO"]
    fn lines_outlive_interface() {
        let gpio = shared_gpio().unwrap();
        let pin = output(&gpio, 25).unwrap();
        assert!(!pin.reset_on_drop());
    }

    #[test]
    fn builder() {
        let cfg = TransportConfig::new(0, 1, 25)
            .reset_pin(5)
            .backlight_pin(12)
            .clock_speed_hz(50_000_000)
            .clock_mode(3);
        assert_eq!(cfg.reset_pin, Some(5));
        assert_eq!(cfg.backlight_pin, Some(12));
        assert_eq!(cfg.clock_speed_hz, Some(50_000_000));
        assert_eq!(cfg.clock_mode, Some(3));
    }
}
