//! Reusable rule-table fixtures.
//!
//! Three standard tables for engine and storage testing:
//!
//! - [`classic_pair`] — the canonical two-color table (right, then left).
//! - [`multi_color`] — `n` rules alternating right/left.
//! - [`random_table`] — seed-deterministic rules over a random background.

use formica_core::{ColorId, RuleTable, Turn};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A color id asserted in range — fixture shorthand.
pub fn color(raw: u8) -> ColorId {
    ColorId::new(raw).expect("fixture color in range")
}

/// The canonical two-color table: background 0, rule 1 turns right,
/// rule 2 turns left. Produces the well-known highway after ~10k steps.
pub fn classic_pair() -> RuleTable {
    let mut table = RuleTable::new(color(0));
    table.push(color(1), Turn::Right);
    table.push(color(2), Turn::Left);
    table
}

/// A table with `n` rules (colors `1..=n`) alternating right/left over
/// background 0.
///
/// # Panics
///
/// Panics unless `2 <= n <= 15`.
pub fn multi_color(n: usize) -> RuleTable {
    assert!((2..=15).contains(&n), "rule count {n} outside [2, 15]");
    let mut table = RuleTable::new(color(0));
    for i in 0..n {
        let turn = if i % 2 == 0 { Turn::Right } else { Turn::Left };
        table.push(color(i as u8 + 1), turn);
    }
    table
}

/// A seed-deterministic table: random background color, `n` rules drawn
/// from the remaining ids in shuffled order, random turns.
///
/// # Panics
///
/// Panics unless `2 <= n <= 15`.
pub fn random_table(seed: u64, n: usize) -> RuleTable {
    assert!((2..=15).contains(&n), "rule count {n} outside [2, 15]");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let def = color(rng.random_range(0..16));
    let mut others: Vec<ColorId> = ColorId::all().filter(|&c| c != def).collect();
    others.shuffle(&mut rng);
    let mut table = RuleTable::new(def);
    for &c in others.iter().take(n) {
        let turn = if rng.random() { Turn::Right } else { Turn::Left };
        table.push(c, turn);
    }
    table
}
