//! Reduction of an image to a grid of palette glyphs.
//!
//! Validates the target resolution, decodes and resamples the image, then
//! walks the resampled grid row by row, replacing every pixel with the
//! palette glyph of nearest color.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use rayon::prelude::*;

use super::color::Color;
use super::error::{EmptyPaletteError, ImageDecodeError, InvalidResolutionError, ReduceError};
use super::palette::Palette;
use super::resample::{resample, PixelGrid, ResampleFilter};

/// Largest accepted grid, in cells. Resampling allocates one pixel per cell,
/// so anything bigger is refused up front instead of exhausting memory.
pub const MAX_GRID_CELLS: u64 = 4096 * 4096;

/// Validated target grid size: both sides are at least 1 and the cell count
/// is at most [`MAX_GRID_CELLS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// Validate a requested width and height.
    pub fn new(width: i64, height: i64) -> Result<Self, InvalidResolutionError> {
        let err = InvalidResolutionError { width, height };
        if width <= 0 || height <= 0 {
            return Err(err);
        }
        let width = u32::try_from(width).map_err(|_| err)?;
        let height = u32::try_from(height).map_err(|_| err)?;
        match u64::from(width).checked_mul(u64::from(height)) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(Self { width, height }),
            _ => Err(err),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Something that can produce a decoded image.
pub trait ImageSource {
    fn decode(&self) -> Result<Cow<'_, DynamicImage>, ImageDecodeError>;
}

/// Encoded image bytes (PNG, JPEG, ...), format guessed from content.
#[derive(Debug, Clone, Copy)]
pub struct EncodedImage<'a>(pub &'a [u8]);

impl ImageSource for EncodedImage<'_> {
    fn decode(&self) -> Result<Cow<'_, DynamicImage>, ImageDecodeError> {
        let img = image::load_from_memory(self.0)?;
        log::debug!("Decoded {}x{} image from memory", img.width(), img.height());
        Ok(Cow::Owned(img))
    }
}

/// Image file on disk.
#[derive(Debug, Clone)]
pub struct ImageFile(pub PathBuf);

impl ImageFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_path_buf())
    }
}

impl ImageSource for ImageFile {
    fn decode(&self) -> Result<Cow<'_, DynamicImage>, ImageDecodeError> {
        let img = image::ImageReader::open(&self.0)
            .map_err(image::ImageError::IoError)?
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .decode()?;
        log::debug!(
            "Decoded {}x{} image from {}",
            img.width(),
            img.height(),
            self.0.display()
        );
        Ok(Cow::Owned(img))
    }
}

impl ImageSource for DynamicImage {
    fn decode(&self) -> Result<Cow<'_, DynamicImage>, ImageDecodeError> {
        Ok(Cow::Borrowed(self))
    }
}

/// Rows of glyphs, each borrowed from the palette that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid<'p> {
    width: u32,
    height: u32,
    cells: Vec<&'p str>,
}

impl<'p> OutputGrid<'p> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows top to bottom, each exactly `width` glyphs.
    pub fn rows(&self) -> std::slice::Chunks<'_, &'p str> {
        self.cells.chunks(self.width as usize)
    }

    pub fn row(&self, y: u32) -> Option<&[&'p str]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.cells.get(start..start + self.width as usize)
    }

    pub fn glyph(&self, x: u32, y: u32) -> Option<&'p str> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x as usize])
    }

    /// Newline-delimited text; every row, the last included, ends in `\n`.
    pub fn to_text(&self) -> String {
        let glyph_bytes: usize = self.cells.iter().map(|g| g.len()).sum();
        let mut out = String::with_capacity(glyph_bytes + self.height as usize);
        for row in self.rows() {
            for glyph in row {
                out.push_str(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for OutputGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for glyph in row {
                f.write_str(glyph)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Reduction settings. Holds no per-call state, so one value can serve
/// any number of concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    pub filter: ResampleFilter,
    /// Match rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Reducer {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            parallel: true,
        }
    }
}

impl Reducer {
    pub fn new(filter: ResampleFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Reduce `image` to a `width` x `height` grid of glyphs from `palette`.
    ///
    /// The resolution is validated before the image is decoded.
    pub fn reduce<'p, S>(
        &self,
        image: &S,
        width: i64,
        height: i64,
        palette: &'p Palette,
    ) -> Result<OutputGrid<'p>, ReduceError>
    where
        S: ImageSource + ?Sized,
    {
        let resolution = Resolution::new(width, height)?;
        let decoded = image.decode()?;
        let grid = resample(&decoded, resolution, self.filter);
        Ok(self.match_grid(&grid, palette)?)
    }

    /// Replace every pixel of `grid` with its nearest palette glyph.
    ///
    /// Rows keep their order whether or not they are matched in parallel.
    pub fn match_grid<'p>(
        &self,
        grid: &PixelGrid,
        palette: &'p Palette,
    ) -> Result<OutputGrid<'p>, EmptyPaletteError> {
        let width = grid.width() as usize;
        let match_row = |row: &[Color]| -> Result<Vec<&'p str>, EmptyPaletteError> {
            row.iter().map(|&c| palette.nearest_glyph(c)).collect()
        };

        let rows: Vec<Vec<&'p str>> = if self.parallel {
            grid.pixels().par_chunks(width).map(match_row).collect::<Result<_, _>>()?
        } else {
            grid.pixels().chunks(width).map(match_row).collect::<Result<_, _>>()?
        };

        Ok(OutputGrid {
            width: grid.width(),
            height: grid.height(),
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

/// Reduce with default settings. See [`Reducer::reduce`].
pub fn reduce<'p, S>(
    image: &S,
    width: i64,
    height: i64,
    palette: &'p Palette,
) -> Result<OutputGrid<'p>, ReduceError>
where
    S: ImageSource + ?Sized,
{
    Reducer::default().reduce(image, width, height, palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::PaletteEntry;
    use image::{Rgb, RgbImage};

    fn black_white_palette() -> Palette {
        Palette::from_json_str(r#"{"⬛": [0, 0, 0], "⬜": [255, 255, 255]}"#).unwrap()
    }

    #[test]
    fn test_resolution_rejects_non_positive() {
        assert!(Resolution::new(0, 1).is_err());
        assert!(Resolution::new(1, 0).is_err());
        assert!(Resolution::new(-3, 4).is_err());
        assert!(Resolution::new(4, -3).is_err());
        assert!(Resolution::new(i64::from(u32::MAX) + 1, 1).is_err());
        assert_eq!(Resolution::new(3, 4).unwrap().width(), 3);
    }

    #[test]
    fn test_resolution_cell_cap() {
        assert!(Resolution::new(4096, 4096).is_ok());
        assert!(Resolution::new(MAX_GRID_CELLS as i64, 1).is_ok());
        assert!(Resolution::new(4097, 4096).is_err());
        assert!(Resolution::new(MAX_GRID_CELLS as i64 + 1, 1).is_err());
        assert_eq!(
            Resolution::new(100_000, 100_000),
            Err(InvalidResolutionError { width: 100_000, height: 100_000 })
        );
        assert!(Resolution::new(i64::from(u32::MAX), i64::from(u32::MAX)).is_err());
    }

    #[test]
    fn test_black_then_white() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let img = DynamicImage::ImageRgb8(img);

        let palette = black_white_palette();
        let grid = reduce(&img, 2, 1, &palette).unwrap();
        assert_eq!(grid.to_text(), "⬛⬜\n");
        assert_eq!(grid.to_string(), "⬛⬜\n");
    }

    #[test]
    fn test_match_grid_parallel_matches_sequential() {
        let pixels: Vec<Color> = (0..12 * 9)
            .map(|i| Color::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect();
        let grid = PixelGrid::new(12, 9, pixels).unwrap();
        let palette = Palette::builtin().unwrap();

        let par = Reducer::default().match_grid(&grid, &palette).unwrap();
        let seq = Reducer::default().sequential().match_grid(&grid, &palette).unwrap();
        assert_eq!(par, seq);
        assert_eq!(par.rows().count(), 9);
        assert!(par.rows().all(|r| r.len() == 12));
    }

    #[test]
    fn test_grid_accessors() {
        let palette = Palette::from_entries(vec![
            PaletteEntry::new("a", Color::new(0, 0, 0)),
            PaletteEntry::new("b", Color::new(255, 0, 0)),
        ])
        .unwrap();
        let grid = PixelGrid::new(
            2,
            2,
            vec![
                Color::new(0, 0, 0),
                Color::new(250, 0, 0),
                Color::new(250, 0, 0),
                Color::new(3, 0, 0),
            ],
        )
        .unwrap();

        let out = Reducer::default().match_grid(&grid, &palette).unwrap();
        assert_eq!(out.row(0), Some(&["a", "b"][..]));
        assert_eq!(out.glyph(0, 1), Some("b"));
        assert_eq!(out.glyph(2, 0), None);
        assert_eq!(out.row(2), None);
        assert_eq!(out.to_text(), "ab\nba\n");
    }
}
