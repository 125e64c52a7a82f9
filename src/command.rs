//! The command sets of the ST7789 and ILI9341.
//!
//! Both controllers follow the MIPI DCS numbering for their common commands, so addressing,
//! memory write, sleep and display on/off share opcodes. Each also has a block of
//! manufacturer-specific registers used only during initialization, listed in `st7789` and
//! `ili9341` respectively.

use crate::error::IoError;
use crate::interface::DisplayInterface;

/// ST7789 opcodes.
pub mod st7789 {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const RDDID: u8 = 0x04;
    pub const RDDST: u8 = 0x09;

    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const PTLON: u8 = 0x12;
    pub const NORON: u8 = 0x13;

    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;

    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const RAMRD: u8 = 0x2E;

    pub const PTLAR: u8 = 0x30;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;

    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const DISSET5: u8 = 0xB6;

    pub const GCTRL: u8 = 0xB7;
    pub const GTADJ: u8 = 0xB8;
    pub const VCOMS: u8 = 0xBB;

    pub const LCMCTRL: u8 = 0xC0;
    pub const IDSET: u8 = 0xC1;
    pub const VDVVRHEN: u8 = 0xC2;
    pub const VRHS: u8 = 0xC3;
    pub const VDVS: u8 = 0xC4;
    pub const VMCTR1: u8 = 0xC5;
    pub const FRCTRL2: u8 = 0xC6;
    pub const CABCCTRL: u8 = 0xC7;

    /// Power control 1.
    pub const PWCTRL1: u8 = 0xD0;

    pub const RDID1: u8 = 0xDA;
    pub const RDID2: u8 = 0xDB;
    pub const RDID3: u8 = 0xDC;
    pub const RDID4: u8 = 0xDD;

    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;

    pub const PWCTR6: u8 = 0xFC;
}

/// ILI9341 opcodes.
pub mod ili9341 {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const GAMMASET: u8 = 0x26;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;

    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const DFUNCTR: u8 = 0xB6;

    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const PWCTR3: u8 = 0xC2;
    pub const PWCTR4: u8 = 0xC3;
    pub const VMCTR1: u8 = 0xC5;
    pub const VMCTR2: u8 = 0xC7;

    /// Power control A.
    pub const PWCTRA: u8 = 0xCB;
    /// Power control B.
    pub const PWCTRB: u8 = 0xCF;
    /// Driver timing control A.
    pub const DTCTRA: u8 = 0xE8;
    /// Driver timing control B.
    pub const DTCTRB: u8 = 0xEA;
    /// Power on sequence control.
    pub const PONSEQ: u8 = 0xED;
    /// Enable 3 gamma control.
    pub const GAMMA3EN: u8 = 0xF2;
    /// Pump ratio control.
    pub const PUMPRC: u8 = 0xF7;

    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// Commands shared by both controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reset all registers to their power-on defaults. The controller needs 120-150ms before it
    /// accepts further commands.
    SoftwareReset,
    /// Enter (`true`) or leave (`false`) sleep mode.
    SetSleepMode(bool),
    /// Return to normal display mode from partial mode.
    NormalDisplayMode,
    /// Enable or disable display inversion.
    SetInversion(bool),
    /// Turn the panel output on or off. Display RAM is retained either way.
    SetDisplayOn(bool),
    /// Set the inclusive start and end column of the address window. Sent as two big-endian
    /// 16-bit values.
    ColumnAddressSet(u16, u16),
    /// Set the inclusive start and end row of the address window. Sent as two big-endian 16-bit
    /// values.
    RowAddressSet(u16, u16),
}

/// Commands whose parameter bytes are borrowed from the caller.
pub enum BufCommand<'buf> {
    /// Any opcode with an arbitrary parameter list, as used by the initialization tables.
    Raw(u8, &'buf [u8]),
    /// Start writing pixel data into the address window. Further data may follow with plain
    /// data writes until the next command is sent.
    WriteMemory(&'buf [u8]),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        ($cmd, &$buf[..0])
    };
    ($buf:ident, $cmd:expr,[$($arg:expr),+]) => {{
        let args = [$($arg),+];
        $buf[..args.len()].copy_from_slice(&args);
        ($cmd, &$buf[..args.len()])
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), IoError>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 4];
        let (cmd, data) = match self {
            Command::SoftwareReset => ok_command!(arg_buf, st7789::SWRESET, []),
            Command::SetSleepMode(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => st7789::SLPIN,
                    false => st7789::SLPOUT,
                },
                []
            ),
            Command::NormalDisplayMode => ok_command!(arg_buf, st7789::NORON, []),
            Command::SetInversion(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => st7789::INVON,
                    false => st7789::INVOFF,
                },
                []
            ),
            Command::SetDisplayOn(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => st7789::DISPON,
                    false => st7789::DISPOFF,
                },
                []
            ),
            Command::ColumnAddressSet(start, end) => {
                let (s, e) = (start.to_be_bytes(), end.to_be_bytes());
                ok_command!(arg_buf, st7789::CASET, [s[0], s[1], e[0], e[1]])
            }
            Command::RowAddressSet(start, end) => {
                let (s, e) = (start.to_be_bytes(), end.to_be_bytes());
                ok_command!(arg_buf, st7789::RASET, [s[0], s[1], e[0], e[1]])
            }
        };
        iface.send_command(cmd)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data)
        }
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), IoError>
    where
        DI: DisplayInterface,
    {
        let (cmd, data) = match self {
            BufCommand::Raw(cmd, args) => (cmd, args),
            BufCommand::WriteMemory(buf) => (st7789::RAMWR, buf),
        };
        iface.send_command(cmd)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data)
        }
    }
}
