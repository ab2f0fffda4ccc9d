//! Resampling decoded images to the target glyph grid.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use super::color::Color;
use super::reducer::Resolution;

/// Resampling filter used to scale the source image to the grid.
///
/// Every variant is deterministic for identical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest neighbor
    Nearest,
    /// Bilinear interpolation
    #[default]
    Triangle,
    /// Cubic (Catmull-Rom)
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
    /// Box average of every source pixel covered by a cell
    Area,
}

impl ResampleFilter {
    /// Get a human-readable name for the filter.
    pub fn name(&self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
            ResampleFilter::Area => "area",
        }
    }

    /// Parse a filter name as used in config files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nearest" => Some(ResampleFilter::Nearest),
            "triangle" | "bilinear" => Some(ResampleFilter::Triangle),
            "catmull-rom" | "catmullrom" | "cubic" => Some(ResampleFilter::CatmullRom),
            "gaussian" => Some(ResampleFilter::Gaussian),
            "lanczos3" | "lanczos" => Some(ResampleFilter::Lanczos3),
            "area" | "box" => Some(ResampleFilter::Area),
            _ => None,
        }
    }

    fn image_filter(&self) -> Option<FilterType> {
        match self {
            ResampleFilter::Nearest => Some(FilterType::Nearest),
            ResampleFilter::Triangle => Some(FilterType::Triangle),
            ResampleFilter::CatmullRom => Some(FilterType::CatmullRom),
            ResampleFilter::Gaussian => Some(FilterType::Gaussian),
            ResampleFilter::Lanczos3 => Some(FilterType::Lanczos3),
            ResampleFilter::Area => None,
        }
    }
}

/// The resampled image: exactly `width * height` colors in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Wrap row-major pixels. Returns `None` for a zero dimension or if the
    /// length does not match.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Color at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Color> {
        self.pixels.chunks(self.width as usize)
    }
}

/// Scale `image` to exactly `resolution`, dropping any alpha channel.
pub fn resample(image: &DynamicImage, resolution: Resolution, filter: ResampleFilter) -> PixelGrid {
    let rgb = image.to_rgb8();
    let (width, height) = (resolution.width(), resolution.height());

    log::debug!(
        "Resampling {}x{} image to {}x{} ({})",
        rgb.width(),
        rgb.height(),
        width,
        height,
        filter.name()
    );

    let pixels = match filter.image_filter() {
        Some(filter_type) => {
            let scaled = if rgb.dimensions() == (width, height) {
                rgb
            } else {
                imageops::resize(&rgb, width, height, filter_type)
            };
            scaled.pixels().map(Color::from).collect()
        }
        None => area_average(&rgb, width, height),
    };

    PixelGrid {
        width,
        height,
        pixels,
    }
}

/// Average every source pixel covered by each target cell.
///
/// When upscaling a cell can cover less than one source pixel; it then takes
/// the single pixel it falls on.
fn area_average(rgb: &RgbImage, char_width: u32, char_height: u32) -> Vec<Color> {
    let (img_width, img_height) = rgb.dimensions();
    let mut result = Vec::with_capacity(char_width as usize * char_height as usize);

    if img_width == 0 || img_height == 0 {
        result.resize(char_width as usize * char_height as usize, Color::default());
        return result;
    }

    let cell_w = img_width as f64 / char_width as f64;
    let cell_h = img_height as f64 / char_height as f64;

    for cy in 0..char_height {
        let start_y = ((cy as f64 * cell_h) as u32).min(img_height - 1);
        let end_y = (((cy + 1) as f64 * cell_h) as u32).clamp(start_y + 1, img_height);

        for cx in 0..char_width {
            let start_x = ((cx as f64 * cell_w) as u32).min(img_width - 1);
            let end_x = (((cx + 1) as f64 * cell_w) as u32).clamp(start_x + 1, img_width);

            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;
            let mut count = 0u64;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let [r, g, b] = rgb.get_pixel(px, py).0;
                    sum_r += r as u64;
                    sum_g += g as u64;
                    sum_b += b as u64;
                    count += 1;
                }
            }

            result.push(Color::new(
                (sum_r / count) as u8,
                (sum_g / count) as u8,
                (sum_b / count) as u8,
            ));
        }
    }

    result
}
