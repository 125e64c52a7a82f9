//! The transport adapter: a byte-oriented SPI bus plus the D/C select line, and optionally the
//! reset and backlight lines and a blocking delay source.

use crate::error::IoError;

/// Optional digital output lines a display module may have wired up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// Active-low hardware reset.
    Reset,
    /// Backlight enable.
    Backlight,
}

pub trait DisplayInterface {
    /// Send a command opcode, with the D/C line low.
    fn send_command(&mut self, cmd: u8) -> Result<(), IoError>;
    /// Send parameter or pixel bytes, with the D/C line high.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), IoError>;
    /// Whether `line` is connected.
    fn has_line(&self, line: Line) -> bool;
    /// Drive `line` high or low. Unconnected lines are ignored.
    fn set_line(&mut self, line: Line, high: bool) -> Result<(), IoError>;
    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<DI: DisplayInterface + ?Sized> DisplayInterface for &mut DI {
    fn send_command(&mut self, cmd: u8) -> Result<(), IoError> {
        DI::send_command(self, cmd)
    }
    fn send_data(&mut self, buf: &[u8]) -> Result<(), IoError> {
        DI::send_data(self, buf)
    }
    fn has_line(&self, line: Line) -> bool {
        DI::has_line(self, line)
    }
    fn set_line(&mut self, line: Line, high: bool) -> Result<(), IoError> {
        DI::set_line(self, line, high)
    }
    fn delay_ms(&mut self, ms: u32) {
        DI::delay_ms(self, ms)
    }
}

pub mod spi {
    //! The SPI interface supports the "4-wire" serial interface of the controllers, such that each
    //! word on the SPI bus is 8 bits and a separate GPIO selects between command and data.

    use core::convert::Infallible;

    use embedded_hal as hal;

    use super::{DisplayInterface, Line};
    use crate::error::IoError;

    /// Placeholder for a line that is not connected.
    pub struct NoPin;

    impl hal::digital::v2::OutputPin for NoPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    pub struct SpiInterface<SPI, DC, DELAY, RST = NoPin, BL = NoPin> {
        /// The SPI master device connected to the controller.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the controller (the
        /// fourth "wire" of "4-wire" mode).
        dc: DC,
        delay: DELAY,
        reset: Option<RST>,
        backlight: Option<BL>,
    }

    impl<SPI, DC, DELAY> SpiInterface<SPI, DC, DELAY> {
        /// Create a new SPI interface to communicate with the display controller. `spi` is the
        /// SPI master device, already configured for the controller's clock mode and speed, `dc`
        /// is the GPIO output pin connected to the D/C pin, and `delay` provides the blocking
        /// waits required during initialization.
        pub fn new(spi: SPI, dc: DC, delay: DELAY) -> Self {
            Self {
                spi,
                dc,
                delay,
                reset: None,
                backlight: None,
            }
        }
    }

    impl<SPI, DC, DELAY, RST, BL> SpiInterface<SPI, DC, DELAY, RST, BL> {
        /// Attach the GPIO output pin connected to the controller's reset pin.
        pub fn with_reset<R>(self, reset: R) -> SpiInterface<SPI, DC, DELAY, R, BL> {
            SpiInterface {
                spi: self.spi,
                dc: self.dc,
                delay: self.delay,
                reset: Some(reset),
                backlight: self.backlight,
            }
        }

        /// Attach the GPIO output pin that switches the backlight.
        pub fn with_backlight<B>(self, backlight: B) -> SpiInterface<SPI, DC, DELAY, RST, B> {
            SpiInterface {
                spi: self.spi,
                dc: self.dc,
                delay: self.delay,
                reset: self.reset,
                backlight: Some(backlight),
            }
        }

        /// Give back the owned peripherals.
        pub fn release(self) -> (SPI, DC, DELAY, Option<RST>, Option<BL>) {
            (self.spi, self.dc, self.delay, self.reset, self.backlight)
        }
    }

    impl<SPI, DC, DELAY, RST, BL> DisplayInterface for SpiInterface<SPI, DC, DELAY, RST, BL>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
        DELAY: hal::blocking::delay::DelayMs<u32>,
        RST: hal::digital::v2::OutputPin,
        BL: hal::digital::v2::OutputPin,
    {
        fn send_command(&mut self, cmd: u8) -> Result<(), IoError> {
            self.dc.set_low().map_err(|_| IoError::DataCommand)?;
            self.spi.write(&[cmd]).map_err(|_| IoError::Spi)?;
            self.dc.set_high().map_err(|_| IoError::DataCommand)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), IoError> {
            self.dc.set_high().map_err(|_| IoError::DataCommand)?;
            self.spi.write(buf).map_err(|_| IoError::Spi)
        }

        fn has_line(&self, line: Line) -> bool {
            match line {
                Line::Reset => self.reset.is_some(),
                Line::Backlight => self.backlight.is_some(),
            }
        }

        fn set_line(&mut self, line: Line, high: bool) -> Result<(), IoError> {
            match line {
                Line::Reset => match self.reset.as_mut() {
                    Some(pin) => drive(pin, high).map_err(|_| IoError::Reset),
                    None => Ok(()),
                },
                Line::Backlight => match self.backlight.as_mut() {
                    Some(pin) => drive(pin, high).map_err(|_| IoError::Backlight),
                    None => Ok(()),
                },
            }
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay.delay_ms(ms)
        }
    }

    fn drive<P: hal::digital::v2::OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
        if high {
            pin.set_high()
        } else {
            pin.set_low()
        }
    }

}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    use super::{DisplayInterface, Line};
    use crate::error::IoError;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Cmd(u8),
        Data(Vec<u8>),
        Line(Line, bool),
        Delay(u32),
    }

    /// Records every interaction in order. `split` hands out a second handle onto the same
    /// record so a test can keep inspecting after the display takes ownership of the interface.
    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
        reset: bool,
        backlight: bool,
        /// Number of further data writes to accept before failing.
        fail_data_after: Rc<Cell<Option<usize>>>,
        fail_lines: Rc<Cell<bool>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
                reset: false,
                backlight: false,
                fail_data_after: Rc::new(Cell::new(None)),
                fail_lines: Rc::new(Cell::new(false)),
            }
        }
        pub fn with_reset(self) -> Self {
            Self {
                reset: true,
                ..self
            }
        }
        pub fn with_backlight(self) -> Self {
            Self {
                backlight: true,
                ..self
            }
        }
        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: self.sent.clone(),
                reset: self.reset,
                backlight: self.backlight,
                fail_data_after: self.fail_data_after.clone(),
                fail_lines: self.fail_lines.clone(),
            }
        }
        /// Accept `ok_writes` more data writes, then fail every one after.
        pub fn fail_data_after(&self, ok_writes: usize) {
            self.fail_data_after.set(Some(ok_writes));
        }
        /// Make every change of a wired line fail.
        pub fn fail_lines(&self) {
            self.fail_lines.set(true);
        }
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }
        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(&self.sent.borrow()[..], expect);
        }
        pub fn clear(&mut self) {
            self.sent.borrow_mut().clear()
        }
    }

    impl DisplayInterface for TestSpyInterface {
        fn send_command(&mut self, cmd: u8) -> Result<(), IoError> {
            self.sent.borrow_mut().push(Sent::Cmd(cmd));
            Ok(())
        }
        fn send_data(&mut self, data: &[u8]) -> Result<(), IoError> {
            match self.fail_data_after.get() {
                Some(0) => return Err(IoError::Spi),
                Some(n) => self.fail_data_after.set(Some(n - 1)),
                None => {}
            }
            self.sent.borrow_mut().push(Sent::Data(data.to_vec()));
            Ok(())
        }
        fn has_line(&self, line: Line) -> bool {
            match line {
                Line::Reset => self.reset,
                Line::Backlight => self.backlight,
            }
        }
        fn set_line(&mut self, line: Line, high: bool) -> Result<(), IoError> {
            if !self.has_line(line) {
                return Ok(());
            }
            if self.fail_lines.get() {
                return Err(match line {
                    Line::Reset => IoError::Reset,
                    Line::Backlight => IoError::Backlight,
                });
            }
            self.sent.borrow_mut().push(Sent::Line(line, high));
            Ok(())
        }
        fn delay_ms(&mut self, ms: u32) {
            self.sent.borrow_mut().push(Sent::Delay(ms));
        }
    }
}
