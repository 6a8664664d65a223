use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

/// Colour of the merged "Other" slice and of unknown brands.
pub const NEUTRAL_GRAY: &str = "#7f7f7f";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct CSS colours (`#rrggbb`) using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: brand → colour
// ---------------------------------------------------------------------------

/// Maps brand names to distinct colours so a brand looks the same in every chart.
#[derive(Debug, Clone)]
pub struct BrandColors {
    mapping: BTreeMap<String, String>,
}

impl BrandColors {
    /// Build a colour map from the brand names; order does not matter.
    pub fn new<'a, I>(brands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<&str> = brands.into_iter().collect();
        names.sort_unstable();
        names.dedup();

        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(name, color)| (name.to_string(), color))
            .collect();

        BrandColors { mapping }
    }

    /// Look up the colour for a brand; "Other" and unknown brands are gray.
    pub fn color_for(&self, brand: &str) -> &str {
        self.mapping
            .get(brand)
            .map(String::as_str)
            .unwrap_or(NEUTRAL_GRAY)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
