use log::debug;

use super::{standard_config, standard_professions};
use crate::core::{PlayerSetup, Result, RulesConfig};
use crate::rules::GameState;

/// Builder for a started standard game.
///
/// Seats come from `player` calls; without any, `player_count` anonymous
/// players are seated with professions taken in preset order.
#[derive(Clone, Debug)]
pub struct StandardGameBuilder {
    player_count: usize,
    players: Vec<PlayerSetup>,
    rules: RulesConfig,
}

impl Default for StandardGameBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            players: Vec::new(),
            rules: RulesConfig::default(),
        }
    }
}

impl StandardGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of anonymous seats. Ignored once `player` has been called.
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn player(mut self, name: impl Into<String>, profession: impl Into<String>) -> Self {
        self.players.push(PlayerSetup::new(name, profession));
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Seating list the game will be built with.
    #[must_use]
    pub fn seats(&self) -> Vec<PlayerSetup> {
        if !self.players.is_empty() {
            return self.players.clone();
        }
        let professions = standard_professions();
        (0..self.player_count)
            .map(|i| {
                let profession = &professions[i % professions.len()];
                PlayerSetup::new(format!("Player {}", i + 1), profession.name.clone())
            })
            .collect()
    }

    /// Create the game and start it.
    ///
    /// Fails with `GameError::Configuration` for bad rules, an unknown
    /// profession or a player count the rules do not allow.
    pub fn build(self, seed: u64) -> Result<GameState> {
        let seats = self.seats();
        let mut config = standard_config();
        config.rules = self.rules;

        debug!("building standard game: {} seats, seed {seed}", seats.len());
        let mut state = GameState::new(&config, &seats, seed)?;
        state.start()?;
        Ok(state)
    }
}
