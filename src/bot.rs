//! The playing facade: a trained knowledge base plus a search engine,
//! driven through the train / new-game / decide lifecycle.

use crate::board::Board;
use crate::data::Dataset;
use crate::search::{DecisionScores, KnowledgeBase, SearchConfig, SearchEngine, TrainingParams};

/// A complete player. Train it once on historical games, then reuse it
/// across any number of games; `new_game` drops per-game search state while
/// keeping everything learned.
#[derive(Debug)]
pub struct AweleBot {
    knowledge: KnowledgeBase,
    engine: SearchEngine,
    training: TrainingParams,
}

impl AweleBot {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default(), TrainingParams::default())
    }

    pub fn with_config(config: SearchConfig, training: TrainingParams) -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            engine: SearchEngine::with_config(config),
            training,
        }
    }

    /// Fit the knowledge base to a batch of historical observations.
    /// Cumulative: repeated calls keep refining the same value table.
    pub fn train(&mut self, dataset: &Dataset) {
        self.knowledge.train(dataset.observations(), &self.training);
        log::info!(
            "trained on {} observations, {} states known",
            dataset.len(),
            self.knowledge.len()
        );
    }

    /// Reset per-game search state. Learned values survive.
    pub fn new_game(&mut self) {
        self.engine.new_game();
    }

    /// Score every hole for the side to move. Higher is better; negative
    /// infinity marks an illegal hole.
    pub fn decide(&mut self, board: &Board) -> DecisionScores {
        self.engine.decide(board, &self.knowledge)
    }

    /// The best legal hole for the side to move, if any move is legal.
    pub fn choose_move(&mut self, board: &Board) -> Option<usize> {
        let scores = self.decide(board);
        scores
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_finite())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(hole, _)| hole)
    }

    /// Game-over hook: releases per-game search state and reports table
    /// statistics for the finished game.
    pub fn finish(&mut self) {
        log::info!(
            "game finished: {} cached positions, hit rate {:.2}",
            self.engine.table().len(),
            self.engine.table().hit_rate()
        );
        self.engine.new_game();
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl Default for AweleBot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn untrained_bot_still_finds_a_move() {
        let mut bot = AweleBot::new();
        assert!(bot.choose_move(&Board::new()).is_some());
    }

    #[test]
    fn choose_move_skips_illegal_holes() {
        let board =
            Board::from_holes([0, 0, 4, 0, 0, 0], [4, 4, 4, 4, 4, 4], Side::First).unwrap();
        let mut bot = AweleBot::new();
        assert_eq!(bot.choose_move(&board), Some(2));
    }

    #[test]
    fn training_populates_the_knowledge_base() {
        let dataset: Dataset = "4 4 4 4 4 4 4 4 4 4 4 4 1 W\n4 4 4 4 4 4 4 4 4 4 4 4 3 L\n"
            .parse()
            .unwrap();
        let mut bot = AweleBot::new();
        bot.train(&dataset);
        assert!(!bot.knowledge().is_empty());
    }

    #[test]
    fn finish_releases_search_state() {
        let mut bot = AweleBot::new();
        bot.decide(&Board::new());
        assert!(bot.engine().table().len() > 0);
        bot.finish();
        assert_eq!(bot.engine().table().len(), 0);
    }

    #[test]
    fn new_game_keeps_learned_values() {
        let dataset: Dataset = "4 4 4 4 4 4 4 4 4 4 4 4 1 W\n".parse().unwrap();
        let mut bot = AweleBot::new();
        bot.train(&dataset);
        let known = bot.knowledge().len();
        bot.decide(&Board::new());
        bot.new_game();
        assert_eq!(bot.knowledge().len(), known);
        assert_eq!(bot.engine().table().len(), 0);
    }
}
