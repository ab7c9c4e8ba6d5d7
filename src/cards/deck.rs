//! Per-type draw piles that never run out.
//!
//! Each card type has its own shuffled draw pile. A drawn card goes straight
//! to that type's discard pile; when the draw pile is empty the discard pile
//! is shuffled back in. Shuffling uses a dedicated `"deck"` RNG stream.

use std::sync::Arc;

use im::Vector;
use log::trace;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardType};
use super::registry::CardRegistry;
use crate::core::{GameError, GameRng, PlayerId, Result};

/// One entry of the draw history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub card_type: CardType,
    pub card_id: CardId,
    pub player: PlayerId,
    pub turn: u32,
}

#[derive(Clone, Debug, Default)]
struct Pile {
    templates: Vec<Card>,
    draw: Vec<usize>,
    discard: Vec<usize>,
}

/// Owns every deck and the record of every draw.
#[derive(Clone, Debug)]
pub struct DeckManager {
    registry: Arc<CardRegistry>,
    piles: [Pile; 4],
    rng: GameRng,
    history: Vector<DrawRecord>,
    reshuffles: u32,
}

impl DeckManager {
    /// Build one shuffled deck per card type.
    ///
    /// Every type needs at least one template.
    pub fn new(registry: Arc<CardRegistry>, rng: &GameRng) -> Result<Self> {
        let missing = registry.missing_types();
        if !missing.is_empty() {
            return Err(GameError::config(format!("no cards of type {missing:?}")));
        }

        let mut rng = rng.for_context("deck");
        let mut piles: [Pile; 4] = Default::default();
        for card_type in CardType::ALL {
            let pile = &mut piles[card_type.index()];
            pile.templates = registry.find_by_type(card_type).cloned().collect();
            pile.draw = (0..pile.templates.len()).collect();
            rng.shuffle(&mut pile.draw);
        }

        Ok(Self {
            registry,
            piles,
            rng,
            history: Vector::new(),
            reshuffles: 0,
        })
    }

    /// Draw the next card of `card_type` for `player` on `turn`.
    ///
    /// Never fails: an empty draw pile is refilled from the discards.
    pub fn draw(&mut self, card_type: CardType, player: PlayerId, turn: u32) -> Card {
        let pile = &mut self.piles[card_type.index()];
        if pile.draw.is_empty() {
            pile.draw.append(&mut pile.discard);
            self.rng.shuffle(&mut pile.draw);
            self.reshuffles += 1;
            trace!("reshuffled {} {} cards", pile.draw.len(), card_type);
        }

        // Non-empty: every pile holds at least one template.
        let slot = pile.draw.pop().unwrap_or(0);
        pile.discard.push(slot);
        let card = pile.templates[slot].clone();

        self.history.push_back(DrawRecord {
            card_type,
            card_id: card.id,
            player,
            turn,
        });
        card
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Every draw so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<DrawRecord> {
        &self.history
    }

    /// Cards left before the next reshuffle of `card_type`.
    #[must_use]
    pub fn remaining(&self, card_type: CardType) -> usize {
        self.piles[card_type.index()].draw.len()
    }

    #[must_use]
    pub fn discarded(&self, card_type: CardType) -> usize {
        self.piles[card_type.index()].discard.len()
    }

    /// Number of templates of `card_type`.
    #[must_use]
    pub fn deck_size(&self, card_type: CardType) -> usize {
        self.piles[card_type.index()].templates.len()
    }

    #[must_use]
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    fn registry() -> Arc<CardRegistry> {
        let cards = [
            Card::new(
                CardId::new(1),
                "Restaurant",
                CardKind::Enterprise {
                    cost: 50_000,
                    down_payment: 10_000,
                    cash_flow: 1_200,
                    employee_count: 3,
                    management_required: true,
                },
            ),
            Card::new(
                CardId::new(2),
                "Duplex",
                CardKind::Opportunity {
                    cost: 20_000,
                    down_payment: 2_000,
                    cash_flow: 300,
                },
            ),
            Card::new(
                CardId::new(3),
                "Shop",
                CardKind::Opportunity {
                    cost: 120_000,
                    down_payment: 24_000,
                    cash_flow: 1_500,
                },
            ),
            Card::new(
                CardId::new(4),
                "Blue Chip",
                CardKind::Financial {
                    price_per_share: 50,
                    dividend_per_share: 1,
                    min_shares: 20,
                    max_shares: 2_000,
                },
            ),
            Card::new(
                CardId::new(5),
                "Media",
                CardKind::SideBusiness {
                    cost: 1_000,
                    cash_flow: 300,
                    time_cost: 15,
                },
            ),
        ];
        Arc::new(CardRegistry::from_cards(cards).unwrap())
    }

    #[test]
    fn test_draw_cycles_forever() {
        let mut deck = DeckManager::new(registry(), &GameRng::new(1)).unwrap();

        for turn in 0..25 {
            let card = deck.draw(CardType::Opportunity, PlayerId::new(0), turn);
            assert_eq!(card.card_type(), CardType::Opportunity);
        }
        assert_eq!(deck.history().len(), 25);
        assert!(deck.reshuffle_count() >= 12);
        assert_eq!(deck.remaining(CardType::Opportunity) + deck.discarded(CardType::Opportunity), 2);
    }

    #[test]
    fn test_each_card_once_per_cycle() {
        let mut deck = DeckManager::new(registry(), &GameRng::new(9)).unwrap();

        let mut first: Vec<_> = (0..2)
            .map(|t| deck.draw(CardType::Opportunity, PlayerId::new(0), t).id)
            .collect();
        first.sort();
        assert_eq!(first, vec![CardId::new(2), CardId::new(3)]);
    }

    #[test]
    fn test_history_records_draws() {
        let mut deck = DeckManager::new(registry(), &GameRng::new(1)).unwrap();
        let card = deck.draw(CardType::Financial, PlayerId::new(1), 7);

        let record = deck.history().back().unwrap();
        assert_eq!(record.card_type, CardType::Financial);
        assert_eq!(record.card_id, card.id);
        assert_eq!(record.player, PlayerId::new(1));
        assert_eq!(record.turn, 7);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = DeckManager::new(registry(), &GameRng::new(5)).unwrap();
        let mut b = DeckManager::new(registry(), &GameRng::new(5)).unwrap();

        for t in 0..10 {
            assert_eq!(
                a.draw(CardType::Opportunity, PlayerId::new(0), t).id,
                b.draw(CardType::Opportunity, PlayerId::new(0), t).id
            );
        }
    }

    #[test]
    fn test_missing_type_is_config_error() {
        let only_side = CardRegistry::from_cards([Card::new(
            CardId::new(1),
            "Media",
            CardKind::SideBusiness {
                cost: 1_000,
                cash_flow: 300,
                time_cost: 15,
            },
        )])
        .unwrap();

        let err = DeckManager::new(Arc::new(only_side), &GameRng::new(1)).unwrap_err();
        assert!(err.is_fatal());
    }
}
