//! A bounded game-tree search engine for Awele.
//!
//! The crate is built from three layers:
//!
//! - [`board`]: the rules. Sowing, capture chains, the feed rule and the
//!   starvation endgame, behind a validated [`board::Board`] type.
//! - [`search`]: the brain. A knowledge base fitted offline to historical
//!   games, a transposition table, heuristic move ordering and an
//!   iterative-deepening alpha-beta driver that scores every root move.
//! - [`bot`]: the facade. [`bot::AweleBot`] wires the layers into a
//!   train / new-game / decide lifecycle.
//!
//! ```
//! use awele_engine::board::Board;
//! use awele_engine::bot::AweleBot;
//!
//! let mut bot = AweleBot::new();
//! let scores = bot.decide(&Board::new());
//! assert!(scores.iter().any(|s| s.is_finite()));
//! ```

pub mod board;
pub mod bot;
pub mod data;
pub mod search;

pub use board::{Board, Side};
pub use bot::AweleBot;
pub use data::{Dataset, Observation};
pub use search::{DecisionScores, KnowledgeBase, SearchConfig, SearchEngine, TrainingParams};
