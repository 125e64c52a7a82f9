//! Show an image file on a display attached to a Raspberry Pi.
//!
//! ```text
//! cargo run --example image --features rpi -- photo.png dacmax
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use st7789::rpi::{RpiInterface, TransportConfig};
use st7789::{Config, Display, PixelBuffer, Rotation, Variant};

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
enum DisplayType {
    /// 240x240 1.3" ST7789 display for the NosPi DAC Zero
    Daczero,
    /// 320x240 2.8" ILI9341 display for the NosPi DAC MAX
    Dacmax,
    /// 320x240 2.8" ST7789 IPS display for the NosPi DAC MAX
    DacmaxIps,
}

impl DisplayType {
    fn setup(self) -> (Config, TransportConfig) {
        match self {
            DisplayType::Daczero => (
                Config::new(Variant::St7789)
                    .size(240, 240)
                    .rotation(Rotation::Deg0),
                TransportConfig::new(0, 0, 25)
                    .reset_pin(5)
                    .backlight_pin(12)
                    .clock_speed_hz(50_000_000)
                    .clock_mode(3),
            ),
            DisplayType::DacmaxIps => (
                Config::new(Variant::St7789).size(320, 240),
                TransportConfig::new(0, 0, 25)
                    .reset_pin(14)
                    .backlight_pin(16)
                    .clock_speed_hz(33_000_000),
            ),
            DisplayType::Dacmax => (
                Config::new(Variant::Ili9341),
                TransportConfig::new(0, 0, 25).reset_pin(14).backlight_pin(16),
            ),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Display an image on the LCD")]
struct Args {
    /// Image to show, resized to fit the display
    image_file: std::path::PathBuf,

    #[arg(value_enum, default_value = "daczero")]
    display_type: DisplayType,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (config, transport) = args.display_type.setup();
    let iface = RpiInterface::new(&transport, config.variant())
        .context("failed to open display transport")?;
    let mut disp = Display::new(iface, config).context("invalid display configuration")?;
    disp.init().context("failed to initialize display")?;

    let (width, height) = (disp.effective_width(), disp.effective_height());
    info!("loading image {}", args.image_file.display());
    let img = image::open(&args.image_file)
        .with_context(|| format!("failed to load {}", args.image_file.display()))?
        .resize_exact(
            u32::from(width),
            u32::from(height),
            image::imageops::FilterType::Triangle,
        )
        .to_rgb8();

    info!("drawing image");
    let pixels = PixelBuffer::new(width, height, img.as_raw())?;
    disp.display(&pixels)?;
    Ok(())
}
