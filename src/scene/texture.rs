//! A small RGB pixel raster addressed the way texture lookups are: pixel (0, 0) is the bottom
//! left corner and coordinates outside the raster repeat.

use crate::{Point2, Result, Rgb, ScanError};

#[derive(Debug, Clone)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Texture {
    /// Create a texture from row-major pixels, starting with the bottom row.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ScanError::Mesh("texture must have a non-zero size".into()));
        }
        if pixels.len() != width * height {
            return Err(ScanError::Mesh(format!(
                "texture of {width}x{height} needs {} pixels, got {}",
                width * height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a texture from packed 8-bit RGB triplets.
    pub fn from_rgb8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() % 3 != 0 {
            return Err(ScanError::Mesh("RGB data length must be a multiple of 3".into()));
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| Rgb::from_u8([c[0], c[1], c[2]]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A 1x1 texture of a single color
    pub fn solid(color: Rgb) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at integer coordinates, wrapping coordinates outside the raster.
    pub fn pixel(&self, x: i64, y: i64) -> Rgb {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.pixels[y * self.width + x]
    }

    /// Returns the pixel under a texture coordinate. The coordinate is scaled by the texture size
    /// and truncated towards zero to select a pixel.
    pub fn sample(&self, uv: &Point2) -> Rgb {
        let x = (uv.x * self.width as f64) as i64;
        let y = (uv.y * self.height as f64) as i64;
        self.pixel(x, y)
    }
}
