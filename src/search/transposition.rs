// Transposition table with value bounds.
//
// Entries are keyed by the encoded position plus remaining depth, side to
// move and node role, so a cached result is never reused in a context it was
// not computed for. Each entry carries a value and the window bounds it was
// proven against: an entry with equal bounds is exact, anything else is a
// one-sided bound good for cutoffs and window narrowing but not for direct
// reuse.
//
// Because remaining depth is part of the key, a shallow re-search can never
// evict deeper work. For a same-key re-store, an exact entry is kept over a
// one-sided bound.

use crate::board::Side;
use std::collections::HashMap;

/// Whether the node maximizes or minimizes the root player's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Maximizing,
    Minimizing,
}

/// Cache key for one search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchKey {
    /// Encoded hole layout, side-to-move relative.
    pub state: u64,
    /// Plies left to search below this node.
    pub remaining_depth: u8,
    pub side_to_move: Side,
    pub role: NodeRole,
}

/// Cached search result. Invariant: `lower <= value <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundEntry {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl BoundEntry {
    /// Exact entries were searched with the value inside the window; bounds
    /// come from fail-low/fail-high nodes.
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }
}

/// Search result cache. An optimization only: replacing the table with an
/// empty one must never change a returned score.
#[derive(Debug)]
pub struct TranspositionTable {
    table: HashMap<SearchKey, BoundEntry>,
    max_entries: usize,
    /// Successful probes.
    pub hits: u64,
    /// Failed probes.
    pub misses: u64,
}

const DEFAULT_MAX_ENTRIES: usize = 1_000_000;

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            table: HashMap::with_capacity(max_entries.min(100_000)),
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached entry, counting hit/miss statistics.
    pub fn probe(&mut self, key: &SearchKey) -> Option<BoundEntry> {
        match self.table.get(key) {
            Some(entry) => {
                self.hits += 1;
                Some(*entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a search result, classifying it against the window it was
    /// computed in: a value at or below `alpha` is only an upper bound, a
    /// value at or above `beta` only a lower bound, anything inside the
    /// window is exact.
    pub fn store(&mut self, key: SearchKey, value: f64, alpha: f64, beta: f64) {
        let entry = if value <= alpha {
            BoundEntry {
                value,
                lower: f64::NEG_INFINITY,
                upper: value,
            }
        } else if value >= beta {
            BoundEntry {
                value,
                lower: value,
                upper: f64::INFINITY,
            }
        } else {
            BoundEntry {
                value,
                lower: value,
                upper: value,
            }
        };

        if let Some(existing) = self.table.get(&key) {
            // Same key means same depth; only an exact result may displace
            // an exact result.
            if existing.is_exact() && !entry.is_exact() {
                return;
            }
        } else if self.table.len() >= self.max_entries {
            // Full and the key is new: skip the insert rather than evict.
            return;
        }
        self.table.insert(key, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fraction of probes answered from the table.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
