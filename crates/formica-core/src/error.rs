//! Error types for rule-table reconstruction.

use crate::color::ColorId;
use std::error::Error;
use std::fmt;

/// Errors from [`RuleTable::from_parts`](crate::RuleTable::from_parts).
///
/// These are structural rejections of persisted raw fields; the in-memory
/// mutation API never produces them (invalid mutations are either silent
/// no-ops or programmer errors, depending on the operation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// More rules than the fifteen the chain can hold.
    TooManyRules {
        /// Number of rules supplied.
        count: usize,
    },
    /// The background color appears in the rule chain.
    DefaultInChain,
    /// A color id appears twice in the rule chain.
    DuplicateRule {
        /// The repeated color.
        color: ColorId,
    },
    /// A remnant alias is keyed by the background color or an active rule.
    AliasShadowsRule {
        /// The offending stale id.
        color: ColorId,
    },
    /// Two aliases share the same stale id.
    DuplicateAlias {
        /// The repeated stale id.
        color: ColorId,
    },
    /// A remnant alias points at a color that is not an active rule.
    AliasTargetNotRule {
        /// The stale id being relabeled.
        stale: ColorId,
        /// The invalid relabel target.
        target: ColorId,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyRules { count } => {
                write!(f, "{count} rules exceed the chain capacity of 15")
            }
            Self::DefaultInChain => write!(f, "background color listed as a rule"),
            Self::DuplicateRule { color } => write!(f, "color {color} appears twice in the chain"),
            Self::AliasShadowsRule { color } => {
                write!(f, "alias for {color} shadows the background or an active rule")
            }
            Self::DuplicateAlias { color } => write!(f, "duplicate alias for color {color}"),
            Self::AliasTargetNotRule { stale, target } => {
                write!(f, "alias {stale} -> {target} targets a color with no active rule")
            }
        }
    }
}

impl Error for RuleError {}
