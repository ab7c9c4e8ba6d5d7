//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every card template of a game. It provides
//! fast lookup by `CardId` and a per-type index the deck manager builds its
//! draw piles from.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardType};
use crate::core::{GameError, Result};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use cashflow_engine::cards::{Card, CardId, CardKind, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(Card::new(
///         CardId::new(1),
///         "Duplex",
///         CardKind::Opportunity { cost: 20_000, down_payment: 2_000, cash_flow: 300 },
///     ))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Duplex");
/// assert_eq!(registry.ids_of(CardType::Opportunity), &[CardId::new(1)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    by_type: [Vec<CardId>; 4],
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of templates, validating each one.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card template.
    ///
    /// A duplicate ID or an invalid template is a configuration error.
    pub fn register(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(GameError::config(format!("duplicate card id {}", card.id)));
        }
        card.validate()?;
        self.by_type[card.card_type().index()].push(card.id);
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// IDs of one type, in registration order.
    #[must_use]
    pub fn ids_of(&self, card_type: CardType) -> &[CardId] {
        &self.by_type[card_type.index()]
    }

    /// Iterate over all templates of one type, in registration order.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.ids_of(card_type).iter().filter_map(|id| self.cards.get(id))
    }

    /// Iterate over all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Card types with no templates.
    #[must_use]
    pub fn missing_types(&self) -> Vec<CardType> {
        CardType::ALL
            .into_iter()
            .filter(|t| self.by_type[t.index()].is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    fn side(id: u32) -> Card {
        Card::new(
            CardId::new(id),
            format!("Gig {id}"),
            CardKind::SideBusiness {
                cost: 500,
                cash_flow: 50,
                time_cost: 5,
            },
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = CardRegistry::from_cards([side(1), side(2)]).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(CardId::new(2)));
        assert_eq!(registry.ids_of(CardType::SideBusiness), &[CardId::new(1), CardId::new(2)]);
        assert!(registry.ids_of(CardType::Financial).is_empty());
        assert_eq!(registry.find_by_type(CardType::SideBusiness).count(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = CardRegistry::from_cards([side(1), side(1)]).unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
    }

    #[test]
    fn test_missing_types() {
        let registry = CardRegistry::from_cards([side(1)]).unwrap();
        assert_eq!(
            registry.missing_types(),
            vec![CardType::Enterprise, CardType::Opportunity, CardType::Financial]
        );
        assert!(CardRegistry::new().is_empty());
    }
}
