//! Source rasters for the encoder.
//!
//! Pixels are exchanged as packed RGBA8888 values: red in the high byte,
//! alpha in the low byte. The low byte is what ends up as the palette index.

/// Packed RGBA8888 for opaque white, the marker sentinel.
pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

/// A readable, stampable RGBA raster.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Packed RGBA8888 value at `(x, y)`. Callers stay inside the bounds.
    fn pixel(&self, x: u32, y: u32) -> u32;

    /// Overwrite the pixel at `(x, y)`.
    fn set_pixel(&mut self, x: u32, y: u32, rgba: u32);

    /// Name used in diagnostics, usually the file the raster came from.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Pack four channels into RGBA8888.
#[inline]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

/// Split RGBA8888 into its four channels.
#[inline]
pub fn unpack_rgba(rgba: u32) -> [u8; 4] {
    rgba.to_be_bytes()
}

/// Number of pixels in a `width` x `height` raster, or `None` if it does not
/// fit in `usize`.
#[inline]
pub fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

/// An owned raster of packed pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRaster {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    name: Option<String>,
}

impl PackedRaster {
    /// Create a raster where every pixel is `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn filled(width: u32, height: u32, fill: u32) -> Self {
        let Some(len) = pixel_count(width, height) else {
            panic!("raster of {width}x{height} pixels does not fit in memory");
        };
        Self {
            width,
            height,
            pixels: vec![fill; len],
            name: None,
        }
    }

    /// Wrap existing packed pixels. Returns `None` if the length does not
    /// match `width * height`, or if that product overflows.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        if pixels.len() != pixel_count(width, height)? {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            name: None,
        })
    }

    /// Build from interleaved RGBA bytes (4 per pixel). Returns `None` on a
    /// length mismatch or when the expected length overflows.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != pixel_count(width, height)?.checked_mul(4)? {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| pack_rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
            name: None,
        })
    }

    /// Attach a diagnostic name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Packed pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Interleaved RGBA bytes, the inverse of [`from_rgba_bytes`](Self::from_rgba_bytes).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&px| unpack_rgba(px)).collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl Raster for PackedRaster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.offset(x, y)]
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgba: u32) {
        let offset = self.offset(x, y);
        self.pixels[offset] = rgba;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Raster for image::RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        pack_rgba(r, g, b, a)
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgba: u32) {
        self.put_pixel(x, y, image::Rgba(unpack_rgba(rgba)));
    }
}

/// A borrowed raster with a diagnostic name attached.
pub struct Named<'a, R: ?Sized> {
    name: &'a str,
    inner: &'a mut R,
}

impl<'a, R: Raster + ?Sized> Named<'a, R> {
    pub fn new(name: &'a str, inner: &'a mut R) -> Self {
        Self { name, inner }
    }
}

impl<R: Raster + ?Sized> Raster for Named<'_, R> {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.inner.pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgba: u32) {
        self.inner.set_pixel(x, y, rgba)
    }

    fn name(&self) -> Option<&str> {
        Some(self.name)
    }
}
