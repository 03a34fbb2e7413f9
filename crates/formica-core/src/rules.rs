//! The circular color rule table.
//!
//! [`RuleTable`] encodes the automaton's transition function: an ordered
//! chain of up to fifteen `(color, turn)` rules plus one background color.
//! Visiting a cell of rule `i`'s color turns the ant by that rule's turn
//! and repaints the cell with rule `(i + 1) % n`'s color. The background
//! color behaves exactly like the first rule, which closes the chain into
//! a cycle that never-visited cells enter on first contact.
//!
//! Renumbering a rule in place ([`RuleTable::update`]) leaves the old id
//! behind as a *remnant*: an alias that repaints cells bearing the stale
//! id to the live replacement on their next visit, without deciding a
//! turn itself. Popping a rule likewise aliases the departed id to its
//! old successor, so cells painted with it keep flowing through the cycle.

use crate::color::ColorId;
use crate::direction::Turn;
use crate::error::RuleError;
use indexmap::IndexMap;

/// Maximum number of active rules; one color id is always reserved for
/// the background.
pub const MAX_RULES: usize = ColorId::COUNT - 1;

/// The transition for standing on a cell of a given color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisitOutcome {
    /// Color written back to the visited cell.
    pub write: ColorId,
    /// Turn applied to the ant's heading.
    pub turn: Turn,
}

/// Ordered, mutable table of color rules with remnant aliasing.
///
/// Rules live in an insertion-ordered map whose position *is* the chain
/// order; the successor of the last rule wraps to the first. Remnants are
/// tracked in a separate relabel table keyed by stale color id. Alias
/// chains are kept flat: retargeting on [`update`](Self::update) and
/// [`pop`](Self::pop) rewrites every alias that pointed at the departing
/// color, so a relabel is always a single hop to a live rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    default_color: ColorId,
    rules: IndexMap<ColorId, Turn>,
    aliases: [Option<ColorId>; ColorId::COUNT],
}

impl RuleTable {
    /// Create a table with only the background color and no rules.
    pub fn new(default_color: ColorId) -> Self {
        Self {
            default_color,
            rules: IndexMap::new(),
            aliases: [None; ColorId::COUNT],
        }
    }

    /// The background color every never-visited cell implicitly has.
    pub fn default_color(&self) -> ColorId {
        self.default_color
    }

    /// Number of active rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no active rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the automaton has the two distinguishable states it needs
    /// to run. Zero or one rule is a "not yet configured" state.
    pub fn has_enough_rules(&self) -> bool {
        self.rules.len() >= 2
    }

    /// Append a rule at the end of the chain.
    ///
    /// Returns `false` without touching the table when `color` is the
    /// background or already an active rule. A remnant id is revived: its
    /// alias is dropped and it re-enters the chain as a live rule.
    pub fn push(&mut self, color: ColorId, turn: Turn) -> bool {
        if color == self.default_color || self.rules.contains_key(&color) {
            return false;
        }
        self.aliases[color.index()] = None;
        self.rules.insert(color, turn);
        true
    }

    /// Remove a rule, splicing the chain around it.
    ///
    /// The popped id becomes a remnant aliased to its old successor, so
    /// cells still bearing it repaint on their next visit; aliases that
    /// pointed at the popped id follow to the same successor. Popping the
    /// final rule collapses the chain and clears every alias. Returns
    /// `false` for the background color or a color that is not an active
    /// rule.
    pub fn pop(&mut self, color: ColorId) -> bool {
        let Some(index) = self.rules.get_index_of(&color) else {
            return false;
        };
        if self.rules.len() == 1 {
            self.rules.clear();
            self.aliases = [None; ColorId::COUNT];
            return true;
        }
        let successor_index = (index + 1) % self.rules.len();
        let successor = *self
            .rules
            .get_index(successor_index)
            .expect("successor index wraps within the chain")
            .0;
        self.rules.shift_remove_index(index);
        self.retarget_aliases(color, successor);
        self.aliases[color.index()] = Some(successor);
        true
    }

    /// Replace the rule at ordinal `index` with `new_color`, preserving
    /// its chain position and successor.
    ///
    /// The displaced id becomes a remnant aliased to `new_color`, and
    /// existing aliases that pointed at the displaced id are repointed so
    /// relabels stay one hop deep. Updating a rule to its own color only
    /// rewrites the turn.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`, or if `new_color` is the background
    /// color or a different active rule — all caller bugs.
    pub fn update(&mut self, index: usize, new_color: ColorId, turn: Turn) {
        assert!(
            index < self.rules.len(),
            "rule index {index} out of range ({} rules)",
            self.rules.len()
        );
        let old = *self.rules.get_index(index).expect("index checked above").0;
        if new_color == old {
            self.set_turn(index, turn);
            return;
        }
        assert!(
            new_color != self.default_color,
            "cannot renumber a rule to the background color {new_color}"
        );
        assert!(
            !self.rules.contains_key(&new_color),
            "color {new_color} is already an active rule"
        );
        self.rules.shift_remove_index(index);
        self.rules.shift_insert(index, new_color, turn);
        self.aliases[new_color.index()] = None;
        self.retarget_aliases(old, new_color);
        self.aliases[old.index()] = Some(new_color);
    }

    /// Rewrite only the turn of the rule at ordinal `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_turn(&mut self, index: usize, turn: Turn) {
        assert!(
            index < self.rules.len(),
            "rule index {index} out of range ({} rules)",
            self.rules.len()
        );
        *self
            .rules
            .get_index_mut(index)
            .expect("index checked above")
            .1 = turn;
    }

    /// Color id of the rule at ordinal `index` (chain order).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> ColorId {
        assert!(
            index < self.rules.len(),
            "rule index {index} out of range ({} rules)",
            self.rules.len()
        );
        *self.rules.get_index(index).expect("index checked above").0
    }

    /// Drop every rule and alias, keeping only the background color.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.aliases = [None; ColorId::COUNT];
    }

    /// Whether `color` is an active rule.
    pub fn exists(&self, color: ColorId) -> bool {
        self.rules.contains_key(&color)
    }

    /// Whether `color` is a remnant: a stale id that repaints to its live
    /// replacement on visit instead of deciding a turn.
    pub fn is_remnant(&self, color: ColorId) -> bool {
        self.aliases[color.index()].is_some()
    }

    /// The live replacement for a remnant id, if `color` is one.
    pub fn remnant_target(&self, color: ColorId) -> Option<ColorId> {
        self.aliases[color.index()]
    }

    /// The transition for a cell of `color`.
    ///
    /// The background color behaves exactly like the first rule. Remnants
    /// are not resolved here — callers relabel the cell first (via
    /// [`remnant_target`](Self::remnant_target)) so the repaint lands on
    /// the grid. Returns `None` when `color` has no transition: with
    /// correct callers that state is unreachable.
    pub fn visit(&self, color: ColorId) -> Option<VisitOutcome> {
        if self.rules.is_empty() {
            return None;
        }
        let index = if color == self.default_color {
            0
        } else {
            self.rules.get_index_of(&color)?
        };
        let turn = *self.rules.get_index(index).expect("index within chain").1;
        let write = *self
            .rules
            .get_index((index + 1) % self.rules.len())
            .expect("successor index wraps within the chain")
            .0;
        Some(VisitOutcome { write, turn })
    }

    /// Iterate rules in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorId, Turn)> + '_ {
        self.rules.iter().map(|(&color, &turn)| (color, turn))
    }

    /// Iterate remnant aliases as `(stale, live)` pairs, ascending by
    /// stale id.
    pub fn remnants(&self) -> impl Iterator<Item = (ColorId, ColorId)> + '_ {
        ColorId::all().filter_map(|stale| self.aliases[stale.index()].map(|live| (stale, live)))
    }

    /// Reassemble a table from persisted raw fields, validating structure.
    ///
    /// Rejects chains longer than [`MAX_RULES`], the background color in
    /// the chain, duplicate rule ids, aliases keyed by the background or
    /// an active rule, duplicate aliases, and aliases whose target is not
    /// an active rule.
    pub fn from_parts(
        default_color: ColorId,
        rules: Vec<(ColorId, Turn)>,
        remnants: Vec<(ColorId, ColorId)>,
    ) -> Result<Self, RuleError> {
        if rules.len() > MAX_RULES {
            return Err(RuleError::TooManyRules { count: rules.len() });
        }
        let mut table = Self::new(default_color);
        for (color, turn) in rules {
            if color == default_color {
                return Err(RuleError::DefaultInChain);
            }
            if table.rules.insert(color, turn).is_some() {
                return Err(RuleError::DuplicateRule { color });
            }
        }
        for (stale, live) in remnants {
            if stale == default_color || table.rules.contains_key(&stale) {
                return Err(RuleError::AliasShadowsRule { color: stale });
            }
            if !table.rules.contains_key(&live) {
                return Err(RuleError::AliasTargetNotRule {
                    stale,
                    target: live,
                });
            }
            if table.aliases[stale.index()].is_some() {
                return Err(RuleError::DuplicateAlias { color: stale });
            }
            table.aliases[stale.index()] = Some(live);
        }
        Ok(table)
    }

    fn retarget_aliases(&mut self, from: ColorId, to: ColorId) {
        for slot in &mut self.aliases {
            if *slot == Some(from) {
                *slot = Some(to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(raw: u8) -> ColorId {
        ColorId::new(raw).expect("test color in range")
    }

    fn table_with(colors: &[u8]) -> RuleTable {
        let mut table = RuleTable::new(color(0));
        for (i, &c) in colors.iter().enumerate() {
            let turn = if i % 2 == 0 { Turn::Right } else { Turn::Left };
            assert!(table.push(color(c), turn));
        }
        table
    }

    #[test]
    fn push_appends_in_chain_order() {
        let table = table_with(&[1, 2, 3]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.at(0), color(1));
        assert_eq!(table.at(1), color(2));
        assert_eq!(table.at(2), color(3));
    }

    #[test]
    fn push_default_is_a_no_op() {
        let mut table = table_with(&[1]);
        assert!(!table.push(color(0), Turn::Left));
        assert_eq!(table.len(), 1);
        assert_eq!(table.at(0), color(1));
    }

    #[test]
    fn push_existing_rule_is_a_no_op() {
        let mut table = table_with(&[1, 2]);
        assert!(!table.push(color(1), Turn::Left));
        assert_eq!(table.len(), 2);
        assert_eq!(table.visit(color(1)).unwrap().turn, Turn::Right);
    }

    #[test]
    fn default_mirrors_first_rule() {
        let table = table_with(&[4, 7, 2]);
        assert_eq!(table.visit(color(0)), table.visit(color(4)));
    }

    #[test]
    fn visit_cycles_through_the_chain() {
        let table = table_with(&[1, 2, 3]);
        assert_eq!(table.visit(color(1)).unwrap().write, color(2));
        assert_eq!(table.visit(color(2)).unwrap().write, color(3));
        assert_eq!(table.visit(color(3)).unwrap().write, color(1));
    }

    #[test]
    fn visit_single_rule_writes_itself() {
        let table = table_with(&[5]);
        let outcome = table.visit(color(5)).unwrap();
        assert_eq!(outcome.write, color(5));
        // Background still delegates to the lone rule.
        assert_eq!(table.visit(color(0)), Some(outcome));
    }

    #[test]
    fn visit_unknown_color_is_none() {
        let table = table_with(&[1, 2]);
        assert_eq!(table.visit(color(9)), None);
    }

    #[test]
    fn visit_empty_table_is_none() {
        let table = RuleTable::new(color(0));
        assert_eq!(table.visit(color(0)), None);
    }

    #[test]
    fn pop_middle_relinks_and_leaves_remnant() {
        let mut table = table_with(&[1, 2, 3]);
        assert!(table.pop(color(2)));
        assert_eq!(table.len(), 2);
        // Chain is now 1 -> 3 -> 1.
        assert_eq!(table.visit(color(1)).unwrap().write, color(3));
        assert_eq!(table.visit(color(3)).unwrap().write, color(1));
        // The popped id relabels to its old successor.
        assert!(table.is_remnant(color(2)));
        assert_eq!(table.remnant_target(color(2)), Some(color(3)));
        assert!(!table.exists(color(2)));
    }

    #[test]
    fn pop_first_advances_the_default_delegate() {
        let mut table = table_with(&[1, 2, 3]);
        assert!(table.pop(color(1)));
        assert_eq!(table.at(0), color(2));
        assert_eq!(table.visit(color(0)), table.visit(color(2)));
        assert_eq!(table.remnant_target(color(1)), Some(color(2)));
    }

    #[test]
    fn pop_last_rule_wraps_remnant_to_first() {
        let mut table = table_with(&[1, 2, 3]);
        assert!(table.pop(color(3)));
        assert_eq!(table.remnant_target(color(3)), Some(color(1)));
        assert_eq!(table.visit(color(2)).unwrap().write, color(1));
    }

    #[test]
    fn pop_unknown_color_is_a_no_op() {
        let mut table = table_with(&[1, 2]);
        assert!(!table.pop(color(9)));
        assert!(!table.pop(color(0)));
        assert_eq!(table.len(), 2);
        assert_eq!(table.at(0), color(1));
        assert_eq!(table.at(1), color(2));
    }

    #[test]
    fn pop_final_rule_collapses_chain_and_aliases() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(4), Turn::Right); // 1 becomes a remnant
        assert!(table.pop(color(4)));
        assert!(table.pop(color(2)));
        assert!(table.is_empty());
        for c in ColorId::all() {
            assert!(!table.is_remnant(c), "alias for {c} survived the collapse");
        }
    }

    #[test]
    fn pop_repoints_aliases_of_the_popped_color() {
        let mut table = table_with(&[1, 2, 3]);
        table.update(1, color(5), Turn::Left); // 2 -> 5
        assert_eq!(table.remnant_target(color(2)), Some(color(5)));
        assert!(table.pop(color(5)));
        // Both the old remnant and the popped id land on 5's successor.
        assert_eq!(table.remnant_target(color(2)), Some(color(3)));
        assert_eq!(table.remnant_target(color(5)), Some(color(3)));
    }

    #[test]
    fn update_preserves_position_and_successor() {
        let mut table = table_with(&[1, 2, 3]);
        table.update(1, color(6), Turn::Left);
        assert_eq!(table.at(0), color(1));
        assert_eq!(table.at(1), color(6));
        assert_eq!(table.at(2), color(3));
        assert_eq!(table.visit(color(1)).unwrap().write, color(6));
        assert_eq!(table.visit(color(6)).unwrap().write, color(3));
        assert_eq!(table.visit(color(6)).unwrap().turn, Turn::Left);
        assert_eq!(table.remnant_target(color(2)), Some(color(6)));
    }

    #[test]
    fn update_first_moves_the_default_delegate() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(7), Turn::Left);
        assert_eq!(table.visit(color(0)), table.visit(color(7)));
    }

    #[test]
    fn update_flattens_alias_chains() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(3), Turn::Right); // 1 -> 3
        table.update(0, color(4), Turn::Right); // 3 -> 4, and 1 must follow
        assert_eq!(table.remnant_target(color(1)), Some(color(4)));
        assert_eq!(table.remnant_target(color(3)), Some(color(4)));
    }

    #[test]
    fn update_same_color_rewrites_turn_only() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(1), Turn::Left);
        assert_eq!(table.visit(color(1)).unwrap().turn, Turn::Left);
        assert!(!table.is_remnant(color(1)));
    }

    #[test]
    fn repushing_a_remnant_revives_it() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(3), Turn::Right); // 1 becomes a remnant
        assert!(table.push(color(1), Turn::Left));
        assert!(!table.is_remnant(color(1)));
        assert_eq!(table.visit(color(1)).unwrap().turn, Turn::Left);
    }

    #[test]
    fn set_turn_touches_only_the_turn() {
        let mut table = table_with(&[1, 2]);
        table.set_turn(1, Turn::Right);
        assert_eq!(table.visit(color(2)).unwrap().turn, Turn::Right);
        assert_eq!(table.visit(color(2)).unwrap().write, color(1));
    }

    #[test]
    fn clear_resets_everything_but_the_background() {
        let mut table = table_with(&[1, 2, 3]);
        table.update(0, color(4), Turn::Left);
        table.clear();
        assert!(table.is_empty());
        assert!(!table.has_enough_rules());
        assert_eq!(table.default_color(), color(0));
        assert_eq!(table.remnants().count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn at_past_the_end_panics() {
        let table = table_with(&[1]);
        let _ = table.at(1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_turn_past_the_end_panics() {
        let mut table = table_with(&[1]);
        table.set_turn(1, Turn::Left);
    }

    #[test]
    #[should_panic(expected = "already an active rule")]
    fn update_to_another_live_rule_panics() {
        let mut table = table_with(&[1, 2]);
        table.update(0, color(2), Turn::Left);
    }

    #[test]
    fn from_parts_round_trips_a_mutated_table() {
        let mut table = table_with(&[1, 2, 3]);
        table.update(1, color(6), Turn::Left);
        table.pop(color(3));
        let rebuilt = RuleTable::from_parts(
            table.default_color(),
            table.iter().collect(),
            table.remnants().collect(),
        )
        .unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn from_parts_rejects_structural_damage() {
        let def = color(0);
        let rules = vec![(color(1), Turn::Right), (color(2), Turn::Left)];
        assert_eq!(
            RuleTable::from_parts(def, vec![(def, Turn::Left)], vec![]),
            Err(RuleError::DefaultInChain)
        );
        assert_eq!(
            RuleTable::from_parts(
                def,
                vec![(color(1), Turn::Right), (color(1), Turn::Left)],
                vec![]
            ),
            Err(RuleError::DuplicateRule { color: color(1) })
        );
        assert_eq!(
            RuleTable::from_parts(def, rules.clone(), vec![(color(1), color(2))]),
            Err(RuleError::AliasShadowsRule { color: color(1) })
        );
        assert_eq!(
            RuleTable::from_parts(def, rules.clone(), vec![(color(5), color(9))]),
            Err(RuleError::AliasTargetNotRule {
                stale: color(5),
                target: color(9),
            })
        );
        assert_eq!(
            RuleTable::from_parts(
                def,
                rules,
                vec![(color(5), color(1)), (color(5), color(2))]
            ),
            Err(RuleError::DuplicateAlias { color: color(5) })
        );
        let too_many: Vec<(ColorId, Turn)> = (0..16)
            .map(|i| (color(i), Turn::Right))
            .collect();
        assert_eq!(
            RuleTable::from_parts(def, too_many, vec![]),
            Err(RuleError::TooManyRules { count: 16 })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// A random mutation against the table.
        #[derive(Clone, Debug)]
        enum Op {
            Push(u8, bool),
            Pop(u8),
            Update(usize, u8, bool),
            SetTurn(usize, bool),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..16, any::<bool>()).prop_map(|(c, r)| Op::Push(c, r)),
                (0u8..16).prop_map(Op::Pop),
                (0usize..15, 0u8..16, any::<bool>()).prop_map(|(i, c, r)| Op::Update(i, c, r)),
                (0usize..15, any::<bool>()).prop_map(|(i, r)| Op::SetTurn(i, r)),
            ]
        }

        fn turn(right: bool) -> Turn {
            if right {
                Turn::Right
            } else {
                Turn::Left
            }
        }

        fn apply(table: &mut RuleTable, op: &Op) {
            match *op {
                Op::Push(c, r) => {
                    table.push(color(c), turn(r));
                }
                Op::Pop(c) => {
                    table.pop(color(c));
                }
                Op::Update(i, c, r) => {
                    let c = color(c);
                    // Skip mutations the API defines as caller bugs.
                    if i < table.len()
                        && c != table.default_color()
                        && (!table.exists(c) || table.at(i) == c)
                    {
                        table.update(i, c, turn(r));
                    }
                }
                Op::SetTurn(i, r) => {
                    if i < table.len() {
                        table.set_turn(i, turn(r));
                    }
                }
            }
        }

        proptest! {
            #[test]
            fn chain_stays_circular(ops in proptest::collection::vec(arb_op(), 0..60)) {
                let mut table = RuleTable::new(color(0));
                for op in &ops {
                    apply(&mut table, op);
                }
                let n = table.len();
                if n == 0 {
                    prop_assert_eq!(table.visit(color(0)), None);
                    return Ok(());
                }
                // Following successors from the first rule walks every rule
                // once and returns to the first.
                let mut current = table.at(0);
                for i in 0..n {
                    prop_assert_eq!(current, table.at(i));
                    current = table.visit(current).unwrap().write;
                }
                prop_assert_eq!(current, table.at(0));
                // The background always delegates to the first rule.
                prop_assert_eq!(table.visit(color(0)), table.visit(table.at(0)));
            }

            #[test]
            fn remnants_always_resolve_to_live_rules(
                ops in proptest::collection::vec(arb_op(), 0..60),
            ) {
                let mut table = RuleTable::new(color(0));
                for op in &ops {
                    apply(&mut table, op);
                }
                for (stale, live) in table.remnants() {
                    prop_assert!(!table.exists(stale));
                    prop_assert!(table.exists(live), "alias {} -> {} is dangling", stale, live);
                }
            }

            #[test]
            fn rule_and_remnant_sets_stay_disjoint(
                ops in proptest::collection::vec(arb_op(), 0..60),
            ) {
                let mut table = RuleTable::new(color(0));
                for op in &ops {
                    apply(&mut table, op);
                }
                for c in ColorId::all() {
                    let states = [
                        table.exists(c),
                        table.is_remnant(c),
                        c == table.default_color(),
                    ];
                    prop_assert!(states.iter().filter(|&&s| s).count() <= 1);
                }
            }
        }
    }
}
