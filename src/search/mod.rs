pub mod encoding;
pub mod engine;
pub mod evaluation;
pub mod knowledge;
pub mod ordering;
pub mod transposition;

pub use engine::{DecisionScores, SearchConfig, SearchEngine};
pub use knowledge::{KnowledgeBase, TrainingParams};
