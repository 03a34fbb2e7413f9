//! Color identifiers for cells and rules.

use std::fmt;

/// Identifies one of the sixteen representable cell colors.
///
/// The rule table's fixed universe is indexed by these ids: the background
/// color, up to fifteen active rules, and any remnants left behind by rule
/// renumbering all share the same `[0, 16)` space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u8);

impl ColorId {
    /// Number of representable colors.
    pub const COUNT: usize = 16;

    /// Create a color id, rejecting values outside `[0, 16)`.
    pub fn new(raw: u8) -> Option<Self> {
        (raw < Self::COUNT as u8).then_some(Self(raw))
    }

    /// The raw id value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The id as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all sixteen color ids in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_full_range() {
        for raw in 0..16u8 {
            assert_eq!(ColorId::new(raw).map(ColorId::get), Some(raw));
        }
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(ColorId::new(16), None);
        assert_eq!(ColorId::new(255), None);
    }

    #[test]
    fn all_yields_sixteen_ascending() {
        let ids: Vec<u8> = ColorId::all().map(ColorId::get).collect();
        assert_eq!(ids, (0..16).collect::<Vec<u8>>());
    }
}
