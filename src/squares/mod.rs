//! Square behaviors: one landing handler per square type.
//!
//! Handlers are plain functions looked up by `SquareType`. Each one sees a
//! `LandingContext` and mutates only the landing player's account, except
//! charity, which pays the other players. Anything that needs the engine
//! (drawing a card, opening the market, offering the branch) is returned as
//! a `SquareOutcome` request instead of being done here.

mod handlers;

pub use handlers::pay_paycheck;

use serde::{Deserialize, Serialize};

use crate::account::{charge, Account, Charge, IdAllocator, LiabilityId};
use crate::board::{BoardPosition, Square, SquareType};
use crate::cards::CardType;
use crate::core::{GameRng, PlayerId, PlayerMap, Result, RulesConfig};

/// Everything a handler may touch.
pub struct LandingContext<'a> {
    pub player: PlayerId,
    pub position: BoardPosition,
    pub square: &'a Square,
    pub accounts: &'a mut PlayerMap<Account>,
    pub ids: &'a mut IdAllocator,
    pub rng: &'a mut GameRng,
    pub rules: &'a RulesConfig,
    /// Global turn number, used for paycheck idempotency.
    pub turn: u32,
}

impl LandingContext<'_> {
    /// The landing player's account.
    pub fn account(&mut self) -> &mut Account {
        &mut self.accounts[self.player]
    }

    /// Charge an involuntary expense to the landing player.
    pub fn charge(&mut self, amount: i64, memo: &str) -> Result<Charge> {
        let policy = self.rules.shortfall_policy();
        charge(&mut self.accounts[self.player], self.ids, policy, amount, memo)
    }
}

/// Change to a player's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileChange {
    DependentAdded { dependents: u32 },
    /// At the configured cap; nothing changed.
    DependentCapped { dependents: u32 },
    Downsized { turns_left: u32 },
}

/// What landing on a square did or asks the engine to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareOutcome {
    NoOp,
    Income {
        amount: i64,
    },
    Expense {
        label: String,
        amount: i64,
        forced_loan: Option<(LiabilityId, i64)>,
    },
    /// The engine should draw a card of this type and ask for a decision.
    CardDraw {
        card_type: CardType,
    },
    MarketOpened,
    /// The engine should ask whether to leave the inner layer.
    BranchOffered,
    LayerTransition {
        target: BoardPosition,
    },
    ProfileChanged(ProfileChange),
    CharityDonated {
        share: i64,
        recipients: Vec<PlayerId>,
    },
}

/// Signature shared by every landing handler.
pub type LandingHandler = fn(&mut LandingContext<'_>) -> Result<SquareOutcome>;

/// Look up the handler for a square type.
#[must_use]
pub fn handler_for(square_type: SquareType) -> LandingHandler {
    match square_type {
        SquareType::Start => handlers::on_start,
        SquareType::Paycheck => handlers::on_paycheck,
        SquareType::Opportunity => handlers::on_opportunity,
        SquareType::Doodad => handlers::on_doodad,
        SquareType::Market => handlers::on_market,
        SquareType::Charity => handlers::on_charity,
        SquareType::Downsized => handlers::on_downsized,
        SquareType::Baby => handlers::on_baby,
        SquareType::LayerTransition => handlers::on_transition,
        SquareType::Branch => handlers::on_branch,
    }
}

/// Run the handler for the square in `ctx`.
pub fn resolve_landing(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    handler_for(ctx.square.square_type())(ctx)
}
