//! Overview-chart colours.
//!
//! Groups take the fixed palette colour at their ordinal. Past the end of
//! the palette a [`ColorSource`] supplies the colour: [`RandomColors`] for
//! throwaway views, [`SeededColors`] when the same input must always render
//! the same way. Seeded colours are derived with BLAKE3 from `(seed,
//! ordinal)`, so they do not depend on how many colours were drawn before.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(r,g,b)` notation.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

/// The fixed group palette, indexed by group ordinal.
pub const DEFAULT_PALETTE: [Rgb; 47] = [
    rgb(246, 94, 11),
    rgb(12, 176, 90),
    rgb(78, 45, 200),
    rgb(150, 210, 17),
    rgb(33, 89, 255),
    rgb(205, 40, 90),
    rgb(140, 18, 250),
    rgb(20, 165, 133),
    rgb(255, 70, 30),
    rgb(80, 190, 55),
    rgb(77, 90, 210),
    rgb(221, 34, 143),
    rgb(10, 120, 245),
    rgb(190, 60, 22),
    rgb(38, 215, 140),
    rgb(160, 30, 255),
    rgb(50, 175, 75),
    rgb(101, 85, 210),
    rgb(235, 15, 60),
    rgb(70, 195, 32),
    rgb(255, 120, 10),
    rgb(120, 160, 245),
    rgb(195, 80, 180),
    rgb(17, 135, 225),
    rgb(212, 55, 105),
    rgb(60, 100, 235),
    rgb(173, 10, 100),
    rgb(25, 200, 50),
    rgb(255, 50, 80),
    rgb(90, 145, 255),
    rgb(140, 75, 220),
    rgb(47, 160, 15),
    rgb(255, 90, 40),
    rgb(110, 185, 75),
    rgb(180, 45, 220),
    rgb(10, 145, 120),
    rgb(240, 20, 185),
    rgb(64, 180, 22),
    rgb(130, 20, 255),
    rgb(60, 160, 90),
    rgb(200, 95, 180),
    rgb(20, 155, 225),
    rgb(250, 60, 55),
    rgb(100, 200, 30),
    rgb(255, 25, 120),
    rgb(150, 150, 255),
    rgb(220, 105, 70),
];

/// Supplies colours for ordinals beyond the fixed palette.
pub trait ColorSource {
    fn color_for(&mut self, ordinal: usize) -> Rgb;
}

/// Fresh random colour on every call; channels are drawn from `1..=255`.
#[derive(Debug)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSource for RandomColors {
    fn color_for(&mut self, _ordinal: usize) -> Rgb {
        random_rgb(&mut self.rng)
    }
}

/// Deterministic colour per `(seed, ordinal)`.
#[derive(Debug, Clone)]
pub struct SeededColors {
    seed: u64,
}

impl SeededColors {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn sub_seed(&self, ordinal: usize) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&(ordinal as u64).to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl ColorSource for SeededColors {
    fn color_for(&mut self, ordinal: usize) -> Rgb {
        let mut rng = StdRng::seed_from_u64(self.sub_seed(ordinal));
        random_rgb(&mut rng)
    }
}

fn random_rgb<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
    )
}

/// Fixed palette plus fallback.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette entry at `ordinal`, or the fallback's colour past the end.
    pub fn resolve(&self, ordinal: usize, fallback: &mut dyn ColorSource) -> Rgb {
        match self.colors.get(ordinal) {
            Some(color) => *color,
            None => fallback.color_for(ordinal),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}
