//! Fixed national dex bands.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub id: u8,
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
}

impl Generation {
    pub fn contains(&self, id: u32) -> bool {
        id >= self.start && id <= self.end
    }

    /// Number of dex ids in the band.
    pub fn span(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_all(&self) -> bool {
        self.id == 0
    }
}

/// `All` first, then Gen 1–9 in release order.
pub static GENERATIONS: [Generation; 10] = [
    Generation { id: 0, name: "All", start: 1, end: 1025 },
    Generation { id: 1, name: "Gen 1", start: 1, end: 151 },
    Generation { id: 2, name: "Gen 2", start: 152, end: 251 },
    Generation { id: 3, name: "Gen 3", start: 252, end: 386 },
    Generation { id: 4, name: "Gen 4", start: 387, end: 493 },
    Generation { id: 5, name: "Gen 5", start: 494, end: 649 },
    Generation { id: 6, name: "Gen 6", start: 650, end: 721 },
    Generation { id: 7, name: "Gen 7", start: 722, end: 809 },
    Generation { id: 8, name: "Gen 8", start: 810, end: 905 },
    Generation { id: 9, name: "Gen 9", start: 906, end: 1025 },
];

pub fn all() -> &'static Generation {
    &GENERATIONS[0]
}

/// Look up a band by id; unknown ids fall back to `All`.
pub fn by_id(id: u8) -> &'static Generation {
    GENERATIONS.iter().find(|g| g.id == id).unwrap_or(all())
}

/// The nine release bands, excluding `All`.
pub fn bands() -> impl Iterator<Item = &'static Generation> {
    GENERATIONS.iter().filter(|g| !g.is_all())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_contiguous_and_disjoint() {
        let bands: Vec<_> = bands().collect();
        assert_eq!(bands.len(), 9);
        assert_eq!(bands[0].start, 1);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
        assert_eq!(bands[8].end, all().end);
    }

    #[test]
    fn all_is_superset() {
        let total: u32 = bands().map(|g| g.span()).sum();
        assert_eq!(total, all().span());
        for id in [1, 151, 152, 1025] {
            assert!(all().contains(id));
        }
    }

    #[test]
    fn lookup_falls_back_to_all() {
        assert_eq!(by_id(4).name, "Gen 4");
        assert_eq!(by_id(42).name, "All");
    }

    #[test]
    fn contains_is_inclusive() {
        let gen1 = by_id(1);
        assert!(gen1.contains(1));
        assert!(gen1.contains(151));
        assert!(!gen1.contains(152));
    }
}
