//! The supported controllers. Both share addressing and pixel transfer, so a variant only
//! contributes its power-on register sequence and its defaults.

use crate::command::{ili9341, st7789};

/// One step of a controller initialization sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Send a command with its parameter bytes.
    Cmd(u8, &'static [u8]),
    /// Wait for the controller to settle.
    DelayMs(u32),
    /// Display inversion on or off, taken from the configured invert flag.
    Inversion,
}

/// The display controller a `Display` drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Sitronix ST7789, as fitted to 240x240 and 320x240 IPS panels.
    St7789,
    /// Ilitek ILI9341, as fitted to 320x240 TN panels.
    Ili9341,
}

/// Static description of a controller.
#[derive(Debug)]
pub struct VariantInfo {
    pub name: &'static str,
    pub default_width: u16,
    pub default_height: u16,
    /// SPI clock the controller is known to work at.
    pub default_clock_hz: u32,
    pub default_clock_mode: u8,
    /// `None` if the controller has no invert option.
    pub default_invert: Option<bool>,
    pub init: &'static [InitStep],
}

impl Variant {
    pub fn info(self) -> &'static VariantInfo {
        match self {
            Variant::St7789 => &ST7789,
            Variant::Ili9341 => &ILI9341,
        }
    }
}

pub static ST7789: VariantInfo = VariantInfo {
    name: "ST7789",
    default_width: 240,
    default_height: 240,
    default_clock_hz: 4_000_000,
    default_clock_mode: 0,
    default_invert: Some(true),
    init: ST7789_INIT,
};

pub static ILI9341: VariantInfo = VariantInfo {
    name: "ILI9341",
    default_width: 320,
    default_height: 240,
    default_clock_hz: 40_000_000,
    default_clock_mode: 0,
    default_invert: None,
    init: ILI9341_INIT,
};

#[cfg_attr(rustfmt, rustfmt_skip)]
pub const ST7789_INIT: &[InitStep] = &[
    InitStep::Cmd(st7789::SWRESET, &[]),
    InitStep::DelayMs(150),
    InitStep::Cmd(st7789::MADCTL, &[0x70]),
    // Frame rate control, idle mode
    InitStep::Cmd(st7789::FRMCTR2, &[0x0C, 0x0C, 0x00, 0x33, 0x33]),
    // 16 bit/pixel
    InitStep::Cmd(st7789::COLMOD, &[0x05]),
    InitStep::Cmd(st7789::GCTRL, &[0x14]),
    InitStep::Cmd(st7789::VCOMS, &[0x37]),
    // Power control
    InitStep::Cmd(st7789::LCMCTRL, &[0x2C]),
    InitStep::Cmd(st7789::VDVVRHEN, &[0x01]),
    InitStep::Cmd(st7789::VRHS, &[0x12]),
    InitStep::Cmd(st7789::VDVS, &[0x20]),
    InitStep::Cmd(st7789::PWCTRL1, &[0xA4, 0xA1]),
    InitStep::Cmd(st7789::FRCTRL2, &[0x0F]),
    // Gamma
    InitStep::Cmd(st7789::GMCTRP1, &[
        0xD0, 0x04, 0x0D, 0x11, 0x13, 0x2B, 0x3F, 0x54, 0x4C, 0x18, 0x0D, 0x0B, 0x1F, 0x23,
    ]),
    InitStep::Cmd(st7789::GMCTRN1, &[
        0xD0, 0x04, 0x0C, 0x11, 0x13, 0x2C, 0x3F, 0x44, 0x51, 0x2F, 0x1F, 0x1F, 0x20, 0x23,
    ]),
    InitStep::Inversion,
    InitStep::Cmd(st7789::SLPOUT, &[]),
    InitStep::Cmd(st7789::DISPON, &[]),
    InitStep::DelayMs(100),
];

#[cfg_attr(rustfmt, rustfmt_skip)]
pub const ILI9341_INIT: &[InitStep] = &[
    InitStep::Cmd(ili9341::SWRESET, &[]),
    InitStep::DelayMs(120),
    // Frame rate control, normal mode full colours
    InitStep::Cmd(ili9341::FRMCTR1, &[0x00, 0x1B]),
    InitStep::Cmd(ili9341::FRMCTR2, &[0x00, 0x1B]),
    InitStep::Cmd(ili9341::FRMCTR3, &[0x00, 0x1B]),
    // No line inversion
    InitStep::Cmd(ili9341::INVCTR, &[0x00]),
    // -4.6V, auto mode
    InitStep::Cmd(ili9341::PWCTR1, &[0x21]),
    // VGH25 2.4C, VGSEL -10, VGH = 3 * AVDD
    InitStep::Cmd(ili9341::PWCTR2, &[0x11]),
    // Opamp current small, boost frequency
    InitStep::Cmd(ili9341::PWCTR3, &[0x0A, 0x00]),
    // BLK/2, opamp current small and medium low
    InitStep::Cmd(ili9341::PWCTR4, &[0x8A, 0x2A]),
    InitStep::Cmd(ili9341::INVOFF, &[]),
    InitStep::Cmd(ili9341::MADCTL, &[0x28]),
    InitStep::Cmd(ili9341::COLMOD, &[0x55]),
    InitStep::Cmd(ili9341::PWCTRB, &[0x00, 0x81, 0x30]),
    InitStep::Cmd(ili9341::PONSEQ, &[0x64, 0x03, 0x12, 0x81]),
    InitStep::Cmd(ili9341::DTCTRA, &[0x85, 0x10, 0x7A]),
    InitStep::Cmd(ili9341::PUMPRC, &[0x20]),
    InitStep::Cmd(ili9341::DTCTRB, &[0x00, 0x00]),
    InitStep::Cmd(ili9341::VMCTR1, &[0x3F, 0x3C]),
    InitStep::Cmd(ili9341::VMCTR2, &[0xA7]),
    InitStep::Cmd(ili9341::GAMMA3EN, &[0x00]),
    InitStep::Cmd(ili9341::GAMMASET, &[0x01]),
    InitStep::Cmd(ili9341::GMCTRP1, &[
        0x0F, 0x23, 0x1F, 0x0B, 0x0E, 0x08, 0x4B, 0xA8, 0x3B, 0x0A, 0x14, 0x06, 0x10, 0x09, 0x00,
    ]),
    InitStep::Cmd(ili9341::GMCTRN1, &[
        0x00, 0x1C, 0x20, 0x04, 0x10, 0x08, 0x34, 0x47, 0x44, 0x05, 0x0B, 0x09, 0x2F, 0x36, 0x0F,
    ]),
    InitStep::Cmd(ili9341::SLPOUT, &[]),
    InitStep::DelayMs(120),
    InitStep::Cmd(ili9341::DISPON, &[]),
    InitStep::DelayMs(120),
    InitStep::Cmd(ili9341::NORON, &[]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn gamma(init: &[InitStep], opcode: u8) -> &'static [u8] {
        init.iter()
            .filter_map(|s| match *s {
                InitStep::Cmd(c, d) if c == opcode => Some(d),
                _ => None,
            })
            .next()
            .unwrap()
    }

    #[test]
    fn gamma_table_lengths() {
        assert_eq!(gamma(ST7789_INIT, st7789::GMCTRP1).len(), 14);
        assert_eq!(gamma(ST7789_INIT, st7789::GMCTRN1).len(), 14);
        assert_eq!(gamma(ILI9341_INIT, ili9341::GMCTRP1).len(), 15);
        assert_eq!(gamma(ILI9341_INIT, ili9341::GMCTRN1).len(), 15);
    }

    #[test]
    fn only_st7789_has_invert_option() {
        assert!(ST7789_INIT.contains(&InitStep::Inversion));
        assert!(!ILI9341_INIT.contains(&InitStep::Inversion));
        assert_eq!(Variant::St7789.info().default_invert, Some(true));
        assert_eq!(Variant::Ili9341.info().default_invert, None);
    }

    #[test]
    fn sequences_start_with_software_reset() {
        for v in &[Variant::St7789, Variant::Ili9341] {
            assert_eq!(v.info().init[0], InitStep::Cmd(0x01, &[]));
        }
        assert_eq!(ST7789_INIT[1], InitStep::DelayMs(150));
        assert_eq!(ILI9341_INIT[1], InitStep::DelayMs(120));
    }

    #[test]
    fn sequences_end_with_display_on() {
        assert_eq!(
            &ST7789_INIT[ST7789_INIT.len() - 3..],
            &[
                InitStep::Cmd(0x11, &[]),
                InitStep::Cmd(0x29, &[]),
                InitStep::DelayMs(100)
            ]
        );
        assert_eq!(
            &ILI9341_INIT[ILI9341_INIT.len() - 5..],
            &[
                InitStep::Cmd(0x11, &[]),
                InitStep::DelayMs(120),
                InitStep::Cmd(0x29, &[]),
                InitStep::DelayMs(120),
                InitStep::Cmd(0x13, &[])
            ]
        );
    }
}
