use crate::coords::Rgb;

/// Stable handle into the scene's material arena.
///
/// Materials are never removed, so a handle stays valid for the lifetime of the scene.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shading parameters consumed by the light-transport pass.
///
/// `emissive`, `reflective`, `refractive` and `diffuse` are relative weights: on each
/// hit the tracer picks one event with probability proportional to its weight.
///
/// `eta` holds Cauchy coefficients, `n(λ) = eta[0] + eta[1] / λ² + eta[2] / λ⁴`
/// with λ in nanometres. `(1, 0, 0)` is a non-dispersive medium of index 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub emissive: f32,
    pub reflective: f32,
    pub refractive: f32,
    pub diffuse: f32,
    pub diffuse_color: Rgb,
    pub emission_color: Rgb,
    pub eta: [f32; 3],
}

impl Default for Material {
    /// The material assigned to freshly created primitives: plain red diffuse.
    fn default() -> Self {
        Self {
            emissive: 0.0,
            reflective: 0.0,
            refractive: 0.0,
            diffuse: 1.0,
            diffuse_color: Rgb::new(1.0, 0.0, 0.0),
            emission_color: Rgb::white(),
            eta: [1.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Pure white emitter.
    pub fn light() -> Self {
        Self {
            emissive: 1.0,
            diffuse: 0.0,
            ..Self::default()
        }
    }

    /// Refractive index at `wavelength_nm`.
    pub fn refractive_index(&self, wavelength_nm: f32) -> f32 {
        let l2 = wavelength_nm * wavelength_nm;
        self.eta[0] + self.eta[1] / l2 + self.eta[2] / (l2 * l2)
    }

    /// Sum of the event weights. Zero means the surface absorbs everything.
    pub fn total_weight(&self) -> f32 {
        self.emissive + self.reflective + self.refractive + self.diffuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_red_diffuse() {
        let m = Material::default();
        assert_eq!(m.diffuse, 1.0);
        assert_eq!(m.total_weight(), 1.0);
        assert_eq!(m.diffuse_color, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(m.eta, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn light_only_emits() {
        let m = Material::light();
        assert_eq!(m.emissive, 1.0);
        assert_eq!(m.total_weight(), 1.0);
        assert_eq!(m.emission_color, Rgb::white());
    }

    #[test]
    fn cauchy_index_falls_with_wavelength() {
        let m = Material { eta: [1.5, 8000.0, 0.0], ..Material::default() };
        let blue = m.refractive_index(400.0);
        let red = m.refractive_index(700.0);
        assert_abs_diff_eq!(blue, 1.55, epsilon = 1e-6);
        assert!(blue > red);
    }

    #[test]
    fn non_dispersive_index_is_constant() {
        let m = Material::default();
        assert_eq!(m.refractive_index(380.0), 1.0);
        assert_eq!(m.refractive_index(780.0), 1.0);
    }
}
