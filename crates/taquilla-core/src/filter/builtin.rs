//! Built-in per-pixel filters.
//!
//! Pixels are converted to `0.0..=1.0` floats, transformed, clamped and
//! written back. Alpha is never modified.

use super::{FilterApplier, FilterError};
use image::{imageops, RgbaImage};

/// Apply `f` to the RGB channels of every pixel.
fn map_rgb(image: &RgbaImage, f: impl Fn(f32, f32, f32) -> (f32, f32, f32)) -> RgbaImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        let [r, g, b, _] = &mut pixel.0;
        let (nr, ng, nb) = f(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
        *r = to_u8(nr);
        *g = to_u8(ng);
        *b = to_u8(nb);
    }
    output
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Rec. 709 luminance.
#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Returns an unchanged copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FilterApplier for Identity {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        Ok(image.clone())
    }
}

/// Warm brown tone blended over the original by `intensity` (0 to 1).
#[derive(Debug, Clone, Copy)]
pub struct SepiaTone {
    pub intensity: f32,
}

impl SepiaTone {
    pub fn new(intensity: f32) -> Self {
        Self {
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}

impl FilterApplier for SepiaTone {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let k = self.intensity;
        Ok(map_rgb(image, |r, g, b| {
            let sr = 0.393 * r + 0.769 * g + 0.189 * b;
            let sg = 0.349 * r + 0.686 * g + 0.168 * b;
            let sb = 0.272 * r + 0.534 * g + 0.131 * b;
            (r + (sr - r) * k, g + (sg - g) * k, b + (sb - b) * k)
        }))
    }
}

/// Saturation and contrast multipliers (1.0 leaves the channel as is).
#[derive(Debug, Clone, Copy)]
pub struct ColorControls {
    pub saturation: f32,
    pub contrast: f32,
}

impl ColorControls {
    pub fn new(saturation: f32, contrast: f32) -> Self {
        Self {
            saturation,
            contrast,
        }
    }
}

impl FilterApplier for ColorControls {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let (saturation, contrast) = (self.saturation, self.contrast);
        Ok(map_rgb(image, |r, g, b| {
            let gray = luminance(r, g, b);
            let (r, g, b) = (
                gray + (r - gray) * saturation,
                gray + (g - gray) * saturation,
                gray + (b - gray) * saturation,
            );
            (
                (r - 0.5) * contrast + 0.5,
                (g - 0.5) * contrast + 0.5,
                (b - 0.5) * contrast + 0.5,
            )
        }))
    }
}

/// Rotate hues by `angle` radians around the gray axis.
#[derive(Debug, Clone, Copy)]
pub struct HueAdjust {
    pub angle: f32,
}

impl HueAdjust {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    /// 3x3 rotation about the (1, 1, 1) axis, row-major.
    fn matrix(&self) -> [[f32; 3]; 3] {
        let (sin, cos) = self.angle.sin_cos();
        let third: f32 = 1.0 / 3.0;
        let sqrt_third = third.sqrt();
        let a = cos + (1.0 - cos) * third;
        let b = third * (1.0 - cos) - sqrt_third * sin;
        let c = third * (1.0 - cos) + sqrt_third * sin;
        [[a, b, c], [c, a, b], [b, c, a]]
    }
}

impl FilterApplier for HueAdjust {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let m = self.matrix();
        Ok(map_rgb(image, |r, g, b| {
            (
                m[0][0] * r + m[0][1] * g + m[0][2] * b,
                m[1][0] * r + m[1][1] * g + m[1][2] * b,
                m[2][0] * r + m[2][1] * g + m[2][2] * b,
            )
        }))
    }
}

/// Soft glow: a blurred copy screen-blended over the original.
#[derive(Debug, Clone, Copy)]
pub struct Bloom {
    pub radius: f32,
    pub intensity: f32,
}

impl Bloom {
    pub fn new(radius: f32, intensity: f32) -> Self {
        Self { radius, intensity }
    }
}

impl FilterApplier for Bloom {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        if self.radius <= 0.0 || self.intensity <= 0.0 {
            return Ok(image.clone());
        }

        let blurred = imageops::blur(image, self.radius / 2.0);
        let mut output = image.clone();
        for (pixel, glow) in output.pixels_mut().zip(blurred.pixels()) {
            for c in 0..3 {
                let base = pixel.0[c] as f32 / 255.0;
                let light = glow.0[c] as f32 / 255.0 * self.intensity;
                pixel.0[c] = to_u8(1.0 - (1.0 - base) * (1.0 - light));
            }
        }
        Ok(output)
    }
}

/// Several filters applied in sequence.
#[derive(Default)]
pub struct FilterChain {
    steps: Vec<Box<dyn FilterApplier>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, filter: impl FilterApplier + 'static) -> Self {
        self.steps.push(Box::new(filter));
        self
    }
}

impl FilterApplier for FilterChain {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let mut current = image.clone();
        for step in &self.steps {
            current = step.apply(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn pixel(r: u8, g: u8, b: u8) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, Rgba([r, g, b, 200]))
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let image = pixel(10, 200, 90);
        assert_eq!(SepiaTone::new(0.0).apply(&image).unwrap(), image);
    }

    #[test]
    fn test_sepia_warms_gray() {
        let out = SepiaTone::new(0.8).apply(&pixel(128, 128, 128)).unwrap();
        let [r, g, b, a] = out.get_pixel(0, 0).0;
        assert!(r > g && g > b, "expected warm tone, got {:?}", (r, g, b));
        assert_eq!(a, 200);
    }

    #[test]
    fn test_color_controls_neutral_is_identity() {
        let image = pixel(10, 200, 90);
        assert_eq!(ColorControls::new(1.0, 1.0).apply(&image).unwrap(), image);
    }

    #[test]
    fn test_saturation_spreads_channels() {
        let image = pixel(150, 100, 100);
        let out = ColorControls::new(1.5, 1.0).apply(&image).unwrap();
        let [r, g, _, _] = out.get_pixel(0, 0).0;
        assert!(r as i32 - g as i32 > 50);
    }

    #[test]
    fn test_contrast_keeps_midpoint() {
        let out = ColorControls::new(1.0, 1.3).apply(&pixel(128, 128, 128)).unwrap();
        let [r, _, _, _] = out.get_pixel(0, 0).0;
        assert!((r as i32 - 128).abs() <= 1);

        let out = ColorControls::new(1.0, 1.3).apply(&pixel(200, 200, 200)).unwrap();
        assert!(out.get_pixel(0, 0).0[0] > 200);
    }

    #[test]
    fn test_hue_adjust_preserves_gray() {
        let image = pixel(90, 90, 90);
        let out = HueAdjust::new(0.3).apply(&image).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_hue_adjust_third_turn_cycles_channels() {
        let out = HueAdjust::new(std::f32::consts::TAU / 3.0)
            .apply(&pixel(255, 0, 0))
            .unwrap();
        let [r, g, b, _] = out.get_pixel(0, 0).0;
        assert!(r <= 1 && g >= 254 && b <= 1, "red should turn green, got {:?}", (r, g, b));
    }

    #[test]
    fn test_hue_adjust_full_turn_is_identity() {
        let image = pixel(200, 40, 90);
        let out = HueAdjust::new(std::f32::consts::TAU).apply(&image).unwrap();
        let (a, b) = (out.get_pixel(0, 0).0, image.get_pixel(0, 0).0);
        for c in 0..3 {
            assert!((a[c] as i32 - b[c] as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_bloom_brightens() {
        let image = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([250, 250, 250, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        });
        let out = Bloom::new(5.0, 0.5).apply(&image).unwrap();
        assert!(out.get_pixel(5, 4).0[0] > 20);
        assert_eq!(out.get_pixel(5, 4).0[3], 255);
    }

    #[test]
    fn test_chain_runs_in_order() {
        let chain = FilterChain::new()
            .then(ColorControls::new(0.0, 1.0))
            .then(SepiaTone::new(1.0));
        let out = chain.apply(&pixel(200, 0, 0)).unwrap();
        let [r, g, b, _] = out.get_pixel(0, 0).0;
        // Desaturated first, so the sepia result is warm, not red-dominant
        assert!(r >= g && g >= b);
        assert!(r < 100);
    }
}
