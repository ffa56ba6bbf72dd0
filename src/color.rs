use eframe::egui::Color32;
use palette::Srgb;
use palette::named;
use plotters::style::RGBColor;

use crate::data::model::Genotype;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// CSS named colour for a genotype series: WT green (#008000), G93A red.
pub fn genotype_color(genotype: Genotype) -> Srgb<u8> {
    match genotype {
        Genotype::WildType => named::GREEN,
        Genotype::G93A => named::RED,
    }
}

/// Archetype curves are drawn in black.
pub const ARCHETYPE_COLOR: Srgb<u8> = named::BLACK;

// -- Backend conversions --

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genotype_colors() {
        assert_eq!(to_color32(genotype_color(Genotype::WildType)), Color32::from_rgb(0, 128, 0));
        let RGBColor(r, g, b) = to_rgb(genotype_color(Genotype::G93A));
        assert_eq!((r, g, b), (255, 0, 0));
        assert_eq!(to_color32(ARCHETYPE_COLOR), Color32::BLACK);
    }
}
