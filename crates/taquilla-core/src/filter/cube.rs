//! Adobe `.cube` 3D lookup tables.
//!
//! ```text
//! # comment
//! TITLE "Gritty"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0 0 0
//! DOMAIN_MAX 1 1 1
//! 0.0000 0.0000 0.0000
//! ...
//! ```
//!
//! Rows list output colors with red varying fastest, then green, then blue.

use super::{FilterApplier, FilterError};
use image::RgbaImage;
use thiserror::Error;

/// Smallest usable table edge.
const MIN_SIZE: usize = 2;

/// Largest table edge accepted (256^3 entries).
const MAX_SIZE: usize = 256;

/// Errors that can occur while parsing a `.cube` document.
#[derive(Debug, Error, PartialEq)]
pub enum LutError {
    /// No `LUT_3D_SIZE` line
    #[error("Missing LUT_3D_SIZE")]
    MissingSize,

    /// Table edge outside the supported range
    #[error("Unsupported LUT size: {0}")]
    UnsupportedSize(usize),

    /// A line could not be parsed
    #[error("Invalid LUT data on line {line}")]
    BadRow { line: usize },

    /// Entry count does not match `size^3`
    #[error("LUT has {found} entries, expected {expected}")]
    CountMismatch { expected: usize, found: usize },
}

/// Parsed 3D LUT, applied with trilinear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    size: usize,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
    table: Vec<[f32; 3]>,
}

impl CubeLut {
    /// Parse a `.cube` document.
    pub fn parse(text: &str) -> Result<Self, LutError> {
        let mut size: Option<usize> = None;
        let mut domain_min = [0.0; 3];
        let mut domain_max = [1.0; 3];
        let mut table = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(first) = parts.next() else {
                continue;
            };

            match first {
                "LUT_3D_SIZE" => {
                    let n = parts
                        .next()
                        .and_then(|v| v.parse::<usize>().ok())
                        .ok_or(LutError::BadRow { line: line_no })?;
                    if !(MIN_SIZE..=MAX_SIZE).contains(&n) {
                        return Err(LutError::UnsupportedSize(n));
                    }
                    size = Some(n);
                }
                "DOMAIN_MIN" => domain_min = parse_triplet(parts, line_no)?,
                "DOMAIN_MAX" => domain_max = parse_triplet(parts, line_no)?,
                keyword if keyword.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                    // TITLE, LUT_1D_INPUT_RANGE and other metadata
                }
                _ => table.push(parse_triplet(line.split_whitespace(), line_no)?),
            }
        }

        let size = size.ok_or(LutError::MissingSize)?;
        let expected = size * size * size;
        if table.len() != expected {
            return Err(LutError::CountMismatch {
                expected,
                found: table.len(),
            });
        }

        Ok(Self {
            size,
            domain_min,
            domain_max,
            table,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn entry(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.table[r + g * self.size + b * self.size * self.size]
    }

    /// Look up a color with trilinear interpolation.
    pub fn lookup(&self, rgb: [f32; 3]) -> [f32; 3] {
        let max_index = (self.size - 1) as f32;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut frac = [0.0f32; 3];

        for c in 0..3 {
            let span = self.domain_max[c] - self.domain_min[c];
            let normalized = if span > 0.0 {
                ((rgb[c] - self.domain_min[c]) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let pos = normalized * max_index;
            let base = pos.floor();
            lo[c] = base as usize;
            hi[c] = (lo[c] + 1).min(self.size - 1);
            frac[c] = pos - base;
        }

        let lerp = |a: [f32; 3], b: [f32; 3], t: f32| -> [f32; 3] {
            [
                a[0] + (b[0] - a[0]) * t,
                a[1] + (b[1] - a[1]) * t,
                a[2] + (b[2] - a[2]) * t,
            ]
        };

        let c00 = lerp(self.entry(lo[0], lo[1], lo[2]), self.entry(hi[0], lo[1], lo[2]), frac[0]);
        let c10 = lerp(self.entry(lo[0], hi[1], lo[2]), self.entry(hi[0], hi[1], lo[2]), frac[0]);
        let c01 = lerp(self.entry(lo[0], lo[1], hi[2]), self.entry(hi[0], lo[1], hi[2]), frac[0]);
        let c11 = lerp(self.entry(lo[0], hi[1], hi[2]), self.entry(hi[0], hi[1], hi[2]), frac[0]);

        let c0 = lerp(c00, c10, frac[1]);
        let c1 = lerp(c01, c11, frac[1]);
        lerp(c0, c1, frac[2])
    }
}

fn parse_triplet<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<[f32; 3], LutError> {
    let mut out = [0.0f32; 3];
    for value in &mut out {
        *value = parts
            .next()
            .and_then(|v| v.parse::<f32>().ok())
            .ok_or(LutError::BadRow { line })?;
    }
    Ok(out)
}

impl FilterApplier for CubeLut {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let mut output = image.clone();
        for pixel in output.pixels_mut() {
            let [r, g, b, _] = pixel.0;
            let mapped = self.lookup([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]);
            for (channel, value) in pixel.0.iter_mut().zip(mapped) {
                *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }
        Ok(output)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
