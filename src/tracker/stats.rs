//! Aggregate counts and percentages.

use crate::catalog::Species;
use crate::tracker::collection::Collection;
use crate::tracker::generation::{self, Generation};

/// Whole-number percentage, rounded half up. Zero when `total` is zero.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Unrounded progress-bar width in `[0, 100]`.
pub fn bar_width(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub caught: usize,
    pub shiny: usize,
}

impl Summary {
    pub fn completion(&self) -> u32 {
        percent(self.caught, self.total)
    }
}

/// Caught/shiny counts over the loaded catalog.
pub fn summarize(catalog: &[Species], collection: &Collection) -> Summary {
    Summary {
        total: catalog.len(),
        caught: catalog.iter().filter(|s| collection.is_caught(s.id)).count(),
        shiny: catalog.iter().filter(|s| collection.is_shiny(s.id)).count(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    pub generation: &'static Generation,
    pub caught: usize,
    pub total: usize,
}

impl GenerationProgress {
    pub fn percent(&self) -> u32 {
        percent(self.caught, self.total)
    }
}

/// Progress per release band, counted over the band's id range.
pub fn by_generation(collection: &Collection) -> Vec<GenerationProgress> {
    generation::bands()
        .map(|g| GenerationProgress {
            generation: g,
            caught: (g.start..=g.end).filter(|id| collection.is_caught(*id)).count(),
            total: g.span() as usize,
        })
        .collect()
}
