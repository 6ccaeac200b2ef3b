use lumen_engine::coords::Rgb;
use lumen_engine::scene::Material;

/// Index used for glass when the material has no useful refraction coefficients yet.
const GLASS_ETA: [f32; 3] = [1.5, 8000.0, 0.0];

/// Colours cycled by the diffuse and emission colour keys.
const PALETTE: [Rgb; 6] = [
    Rgb::new(1.0, 0.0, 0.0),
    Rgb::new(0.0, 1.0, 0.0),
    Rgb::new(0.0, 0.0, 1.0),
    Rgb::new(1.0, 1.0, 0.0),
    Rgb::new(0.0, 1.0, 1.0),
    Rgb::new(1.0, 1.0, 1.0),
];

/// Material presets bound to the number keys.
///
/// A preset only replaces the event weights; colours are kept.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Preset {
    Diffuse,
    Mirror,
    Glass,
    Light,
}

impl Preset {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Preset::Diffuse),
            '2' => Some(Preset::Mirror),
            '3' => Some(Preset::Glass),
            '4' => Some(Preset::Light),
            _ => None,
        }
    }

    pub fn apply(self, base: Material) -> Material {
        let [emissive, reflective, refractive, diffuse] = match self {
            Preset::Diffuse => [0.0, 0.0, 0.0, 1.0],
            Preset::Mirror => [0.0, 1.0, 0.0, 0.0],
            Preset::Glass => [0.0, 0.0, 1.0, 0.0],
            Preset::Light => [1.0, 0.0, 0.0, 0.0],
        };
        let eta = if self == Preset::Glass && base.eta[0] <= 1.0 { GLASS_ETA } else { base.eta };
        Material { emissive, reflective, refractive, diffuse, eta, ..base }
    }
}

/// The palette entry after `current`; colours outside the palette restart it.
pub fn next_palette_color(current: Rgb) -> Rgb {
    match PALETTE.iter().position(|c| *c == current) {
        Some(i) => PALETTE[(i + 1) % PALETTE.len()],
        None => PALETTE[0],
    }
}
