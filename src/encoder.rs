//! Conversion of RGB888 images into the controllers' 16 bit 5-6-5 wire format.

use alloc::vec::Vec;

use itertools::iproduct;

use crate::config::Rotation;
use crate::error::Error;

/// Pixel data ready to be streamed into display RAM, two bytes per pixel, row-major.
pub type EncodedFrame = Vec<u8>;

/// A borrowed RGB888 image, one byte per channel, stored row-major from the top left.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` x `height` image. `data` must hold exactly `width * height * 3`
    /// bytes.
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, Error> {
        if data.len() != width as usize * height as usize * 3 {
            // Report how many whole rows the data would fill at this width.
            let rows = match width {
                0 => 0,
                w => data.len() / (w as usize * 3),
            };
            return Err(Error::InvalidDimensions {
                expected: (width, height),
                actual: (width, rows.min(u16::MAX as usize) as u16),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The (r, g, b) triple at column `x`, row `y`, or `None` outside the image.
    pub fn get(&self, x: u16, y: u16) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Callers keep `x < width` and `y < height`.
    fn pixel(&self, x: u16, y: u16) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Pack one pixel into its two wire bytes. Channels are truncated to 5, 6 and 5 bits.
pub fn rgb565(r: u8, g: u8, b: u8) -> [u8; 2] {
    [(r & 0xF8) | (g >> 5), ((g << 3) & 0xE0) | (b >> 3)]
}

/// The size of a `width` x `height` image after rotating it by `rotation`.
pub fn rotated_size(width: u16, height: u16, rotation: Rotation) -> (u16, u16) {
    if rotation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Map column `x`, row `y` of the rotated image back onto the source image. Rotation turns the
/// image counter-clockwise.
fn source_coord(src: &PixelBuffer, rotation: Rotation, x: u16, y: u16) -> (u16, u16) {
    let (w, h) = (src.width, src.height);
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (w - 1 - y, x),
        Rotation::Deg180 => (w - 1 - x, h - 1 - y),
        Rotation::Deg270 => (y, h - 1 - x),
    }
}

/// Rotate `pixels` by `rotation`, returning the RGB888 bytes of the result. Its size is given by
/// `rotated_size`.
pub fn rotate(pixels: &PixelBuffer, rotation: Rotation) -> Vec<u8> {
    let (w, h) = rotated_size(pixels.width, pixels.height, rotation);
    let mut out = Vec::with_capacity(pixels.data.len());
    for (y, x) in iproduct!(0..h, 0..w) {
        let (sx, sy) = source_coord(pixels, rotation, x, y);
        out.extend_from_slice(&pixels.pixel(sx, sy));
    }
    out
}

/// Rotate `pixels` by `rotation` and pack the result into 5-6-5 wire bytes. The rotated image
/// must be exactly `width` x `height`.
pub fn encode(
    pixels: &PixelBuffer,
    rotation: Rotation,
    width: u16,
    height: u16,
) -> Result<EncodedFrame, Error> {
    let (w, h) = rotated_size(pixels.width, pixels.height, rotation);
    if (w, h) != (width, height) {
        return Err(Error::InvalidDimensions {
            expected: rotated_size(width, height, rotation),
            actual: (pixels.width, pixels.height),
        });
    }

    let mut frame = Vec::with_capacity(w as usize * h as usize * 2);
    for (y, x) in iproduct!(0..h, 0..w) {
        let (sx, sy) = source_coord(pixels, rotation, x, y);
        let [r, g, b] = pixels.pixel(sx, sy);
        frame.extend_from_slice(&rgb565(r, g, b));
    }
    Ok(frame)
}
