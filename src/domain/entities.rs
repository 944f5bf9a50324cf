//! Domain entities: species and trees

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const BASE_YEAR_PLANTED: i32 = 2000;
const YEAR_PLANTED_SPAN: i32 = 25;
const BASE_HEIGHT: f64 = 10.0;
const HEIGHT_SPAN: f64 = 20.0;
const BASE_GROWTH_RATE: f64 = 10.0;
const GROWTH_RATE_SPAN: f64 = 20.0;

/// Closed set of tree species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Birch,
    Maple,
    Fir,
}

impl Species {
    /// Every species, in declaration order.
    pub const ALL: [Species; 3] = [Species::Birch, Species::Maple, Species::Fir];

    /// Canonical name as written in delimited text and display output.
    pub fn name(self) -> &'static str {
        match self {
            Species::Birch => "Birch",
            Species::Maple => "Maple",
            Species::Fir => "Fir",
        }
    }

    /// Resolve a species token, ignoring ASCII case.
    ///
    /// Returns `None` for anything that is not exactly one of the known names.
    pub fn from_name(token: &str) -> Option<Species> {
        Self::ALL
            .into_iter()
            .find(|species| species.name().eq_ignore_ascii_case(token))
    }

    /// Pick a species uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Species {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single simulated tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    species: Species,
    year_planted: i32,
    /// Height in feet
    height: f64,
    /// Growth rate in percent per year
    growth_rate: f64,
}

impl Tree {
    /// Create a tree holding exactly the given values. Nothing is validated.
    pub fn new(species: Species, year_planted: i32, height: f64, growth_rate: f64) -> Self {
        Self {
            species,
            year_planted,
            height,
            growth_rate,
        }
    }

    /// Generate a random tree.
    ///
    /// - year planted: `2000 + [0, 25)`, so 2000..=2024
    /// - height: `10 + [0, 1) * 20`, so [10, 30) feet
    /// - growth rate: `10 + [0, 1) * 20`, so [10, 30) percent
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let species = Species::random(rng);
        let year_planted = BASE_YEAR_PLANTED + rng.gen_range(0..YEAR_PLANTED_SPAN);
        let height = BASE_HEIGHT + rng.gen::<f64>() * HEIGHT_SPAN;
        let growth_rate = BASE_GROWTH_RATE + rng.gen::<f64>() * GROWTH_RATE_SPAN;
        Self::new(species, year_planted, height, growth_rate)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn year_planted(&self) -> i32 {
        self.year_planted
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Grow by one year of compound growth: `height * (1 + rate / 100)`.
    ///
    /// Applied as an increment so whole-number inputs stay exact.
    pub fn simulate_year(&mut self) {
        self.height += self.height * self.growth_rate / 100.0;
    }

    /// Render as `species,year,height,growth_rate` at full precision.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// value; integral floats keep their `.0`.
    pub fn to_delimited_text(&self) -> String {
        format!(
            "{},{},{:?},{:?}",
            self.species, self.year_planted, self.height, self.growth_rate
        )
    }
}

/// Round half away from zero; `{:.N}` alone would round ties to even.
fn round_half_up(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2}' {:.1}%",
            self.species,
            self.year_planted,
            round_half_up(self.height, 100.0),
            round_half_up(self.growth_rate, 10.0)
        )
    }
}
