//! # Coloring Activity
//!
//! Free painting of a template page. Every paint picks a palette color
//! uniformly at random; there is no win condition. The random source is
//! passed in so tests can seed it.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::model::{Rgb, TemplateId};
use crate::core::templates::{Template, template};

pub const PALETTE: [Rgb; 7] = [
    Rgb(0xFF, 0x6B, 0x6B),
    Rgb(0x4E, 0xCD, 0xC4),
    Rgb(0xFF, 0xE6, 0x6D),
    Rgb(0xFF, 0x9F, 0x43),
    Rgb(0x54, 0xA0, 0xFF),
    Rgb(0x5F, 0x27, 0xCD),
    Rgb(0xFD, 0x79, 0xA8),
];

pub const COLORING_PHRASE: &str = "Harika! Boyama zamanı.";

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}

#[derive(Debug, Clone)]
pub struct ColoringActivity {
    template: Template,
    fills: Vec<Option<Rgb>>,
}

impl ColoringActivity {
    pub fn new(id: TemplateId) -> Self {
        let template = template(id);
        Self {
            template,
            fills: vec![None; template.regions.len()],
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Current color of each region; `None` means still unpainted.
    pub fn fills(&self) -> &[Option<Rgb>] {
        &self.fills
    }

    /// Paints one region. Returns the new color, or `None` for an unknown region.
    pub fn paint<R: Rng + ?Sized>(&mut self, region: usize, rng: &mut R) -> Option<Rgb> {
        let slot = self.fills.get_mut(region)?;
        let color = random_color(rng);
        *slot = Some(color);
        Some(color)
    }
}
