//! Wavelength sampling for dispersion rendering.

use crate::coords::Rgb;

/// Wavelength used when dispersion is off.
pub const MONOCHROME_WAVELENGTH: f32 = 500.0;

/// First sampled wavelength in dispersive mode (nm).
pub const DISPERSION_START: f32 = 380.0;
/// Spacing between dispersive samples (nm).
pub const DISPERSION_STEP: f32 = 10.0;
/// 380..=780 in steps of 10.
pub const DISPERSION_SAMPLES: usize = 41;

const GAMMA: f32 = 0.8;

/// One wavelength the tracer may pick, with the colour its radiance is weighted by.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DispersionSample {
    pub wavelength: f32,
    pub color: Rgb,
}

/// Approximate visible-spectrum colour for a wavelength in nanometres.
///
/// Piecewise linear ramps with gamma 0.8; violet and deep red fade through an
/// attenuation factor. Returns black outside `[380, 750]`.
pub fn wavelength_to_color(nm: f32) -> Rgb {
    let ramp = |v: f32| v.powf(GAMMA);

    if (380.0..=440.0).contains(&nm) {
        let attenuation = 0.3 + 0.7 * (nm - 380.0) / (440.0 - 380.0);
        Rgb::new(ramp((440.0 - nm) / (440.0 - 380.0) * attenuation), 0.0, ramp(attenuation))
    } else if (440.0..=490.0).contains(&nm) {
        Rgb::new(0.0, ramp((nm - 440.0) / (490.0 - 440.0)), 1.0)
    } else if (490.0..=510.0).contains(&nm) {
        Rgb::new(0.0, 1.0, ramp((510.0 - nm) / (510.0 - 490.0)))
    } else if (510.0..=580.0).contains(&nm) {
        Rgb::new(ramp((nm - 510.0) / (580.0 - 510.0)), 1.0, 0.0)
    } else if (580.0..=645.0).contains(&nm) {
        Rgb::new(1.0, ramp((645.0 - nm) / (645.0 - 580.0)), 0.0)
    } else if (645.0..=750.0).contains(&nm) {
        let attenuation = 0.3 + 0.7 * (750.0 - nm) / (750.0 - 645.0);
        Rgb::new(ramp(attenuation), 0.0, 0.0)
    } else {
        Rgb::black()
    }
}

/// Builds the sample set uploaded to the renderer.
///
/// Off: a single white sample at [`MONOCHROME_WAVELENGTH`]. On: 41 samples spanning
/// 380..=780 nm, coloured by [`wavelength_to_color`].
pub fn dispersion_samples(enabled: bool) -> Vec<DispersionSample> {
    if !enabled {
        return vec![DispersionSample {
            wavelength: MONOCHROME_WAVELENGTH,
            color: Rgb::white(),
        }];
    }

    (0..DISPERSION_SAMPLES)
        .map(|i| {
            let wavelength = DISPERSION_START + DISPERSION_STEP * i as f32;
            DispersionSample { wavelength, color: wavelength_to_color(wavelength) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb(c: Rgb, r: f32, g: f32, b: f32) {
        assert_abs_diff_eq!(c.r, r, epsilon = 1e-5);
        assert_abs_diff_eq!(c.g, g, epsilon = 1e-5);
        assert_abs_diff_eq!(c.b, b, epsilon = 1e-5);
    }

    // ── wavelength_to_color ───────────────────────────────────────────────

    #[test]
    fn outside_visible_band_is_black() {
        for nm in [0.0, 379.9, 750.1, 780.0, 1000.0] {
            assert_eq!(wavelength_to_color(nm), Rgb::black(), "{nm} nm");
        }
    }

    #[test]
    fn violet_edge_is_attenuated() {
        let dim = 0.3_f32.powf(0.8);
        assert_rgb(wavelength_to_color(380.0), dim, 0.0, dim);
    }

    #[test]
    fn band_boundaries() {
        assert_rgb(wavelength_to_color(440.0), 0.0, 0.0, 1.0);
        assert_rgb(wavelength_to_color(490.0), 0.0, 1.0, 1.0);
        assert_rgb(wavelength_to_color(510.0), 0.0, 1.0, 0.0);
        assert_rgb(wavelength_to_color(580.0), 1.0, 1.0, 0.0);
        assert_rgb(wavelength_to_color(645.0), 1.0, 0.0, 0.0);
        assert_rgb(wavelength_to_color(750.0), 0.3_f32.powf(0.8), 0.0, 0.0);
    }

    #[test]
    fn mid_band_uses_gamma() {
        assert_rgb(wavelength_to_color(500.0), 0.0, 1.0, 0.5_f32.powf(0.8));
        assert_rgb(wavelength_to_color(465.0), 0.0, 0.5_f32.powf(0.8), 1.0);
    }

    #[test]
    fn channels_stay_in_unit_range() {
        let mut nm = 370.0;
        while nm <= 790.0 {
            let c = wavelength_to_color(nm);
            for v in c.to_array() {
                assert!((0.0..=1.0).contains(&v), "{nm} nm produced {c:?}");
            }
            nm += 0.5;
        }
    }

    // ── dispersion_samples ────────────────────────────────────────────────

    #[test]
    fn monochrome_set_is_single_white_sample() {
        let s = dispersion_samples(false);
        assert_eq!(s, vec![DispersionSample { wavelength: 500.0, color: Rgb::white() }]);
    }

    #[test]
    fn dispersive_set_spans_380_to_780() {
        let s = dispersion_samples(true);
        assert_eq!(s.len(), 41);
        for (i, sample) in s.iter().enumerate() {
            assert_eq!(sample.wavelength, 380.0 + 10.0 * i as f32);
            assert_eq!(sample.color, wavelength_to_color(sample.wavelength));
        }
        assert_eq!(s.first().map(|x| x.wavelength), Some(380.0));
        assert_eq!(s.last().map(|x| x.wavelength), Some(780.0));
    }
}
