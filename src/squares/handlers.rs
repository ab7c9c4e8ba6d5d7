use log::debug;

use super::{LandingContext, ProfileChange, SquareOutcome};
use crate::account::{charge, donate, money, Account, EntryKind, IdAllocator};
use crate::board::SquareKind;
use crate::cards::CardType;
use crate::core::{Result, RulesConfig};

/// Pay one paycheck for `turn`, settling monthly expenses if configured.
///
/// Returns `None` if this turn's paycheck was already paid.
pub fn pay_paycheck(
    account: &mut Account,
    ids: &mut IdAllocator,
    rules: &RulesConfig,
    turn: u32,
) -> Result<Option<i64>> {
    let Some(amount) = account.receive_paycheck(turn)? else {
        return Ok(None);
    };
    if rules.settle_expenses_on_paycheck {
        let expenses = account.total_expense();
        charge(account, ids, rules.shortfall_policy(), expenses, "monthly expenses")?;
    }
    Ok(Some(amount))
}

pub(super) fn on_start(_ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    Ok(SquareOutcome::NoOp)
}

pub(super) fn on_paycheck(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let bonus = match ctx.square.kind {
        SquareKind::Paycheck { bonus } => bonus,
        _ => 0,
    };

    let paid = pay_paycheck(&mut ctx.accounts[ctx.player], ctx.ids, ctx.rules, ctx.turn)?;
    if bonus > 0 {
        ctx.account().receive(bonus, EntryKind::Bonus, "paycheck bonus")?;
    }

    match paid {
        None if bonus == 0 => Ok(SquareOutcome::NoOp),
        paid => Ok(SquareOutcome::Income {
            amount: paid.unwrap_or(0).saturating_add(bonus),
        }),
    }
}

pub(super) fn on_opportunity(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let pinned = match ctx.square.kind {
        SquareKind::Opportunity { card_type } => card_type,
        _ => None,
    };
    let card_type = match pinned {
        Some(t) => t,
        None => {
            let weights = ctx.rules.card_type_weights.as_array();
            ctx.rng
                .choose_weighted(&weights)
                .map_or(CardType::Opportunity, |i| CardType::ALL[i])
        }
    };
    Ok(SquareOutcome::CardDraw { card_type })
}

pub(super) fn on_doodad(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let (label, min, max) = match &ctx.square.kind {
        SquareKind::Doodad { label, min, max } => (label.clone(), *min, *max),
        _ => return Ok(SquareOutcome::NoOp),
    };

    let amount = ctx.rng.gen_amount(min, max);
    let charge = ctx.charge(amount, &label)?;
    debug!("{} paid {amount} for {label}", ctx.player);
    Ok(SquareOutcome::Expense {
        label,
        amount,
        forced_loan: charge.forced_loan,
    })
}

pub(super) fn on_market(_ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    Ok(SquareOutcome::MarketOpened)
}

pub(super) fn on_charity(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let base = match ctx.square.kind {
        SquareKind::Charity {
            base_amount: Some(base),
        } => base,
        _ => ctx.rules.charity_base_amount,
    };
    let dependents = ctx.accounts[ctx.player].dependents();
    if dependents == 0 {
        return Ok(SquareOutcome::NoOp);
    }

    let amount = money::mul(base, i64::from(dependents))?;
    let donation = donate(ctx.accounts, ctx.player, amount)?;
    if donation.is_empty() {
        return Ok(SquareOutcome::NoOp);
    }
    Ok(SquareOutcome::CharityDonated {
        share: donation.share,
        recipients: donation.recipients,
    })
}

pub(super) fn on_downsized(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let turns = ctx.rules.downsize_turns;
    let account = ctx.account();
    account.downsize(turns);
    Ok(SquareOutcome::ProfileChanged(ProfileChange::Downsized {
        turns_left: account.downsized_turns(),
    }))
}

pub(super) fn on_baby(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    let max = ctx.rules.max_dependents;
    let account = ctx.account();
    let change = if account.add_dependent(max) {
        ProfileChange::DependentAdded {
            dependents: account.dependents(),
        }
    } else {
        ProfileChange::DependentCapped {
            dependents: account.dependents(),
        }
    };
    Ok(SquareOutcome::ProfileChanged(change))
}

pub(super) fn on_transition(ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    Ok(match ctx.square.transition_target() {
        Some(target) => SquareOutcome::LayerTransition { target },
        None => SquareOutcome::NoOp,
    })
}

pub(super) fn on_branch(_ctx: &mut LandingContext<'_>) -> Result<SquareOutcome> {
    Ok(SquareOutcome::BranchOffered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardPosition, Layer, Square};
    use crate::core::{GameRng, PlayerId, PlayerMap};
    use crate::squares::resolve_landing;

    struct Table {
        accounts: PlayerMap<Account>,
        ids: IdAllocator,
        rng: GameRng,
        rules: RulesConfig,
    }

    impl Table {
        fn new(players: usize) -> Self {
            let rules = RulesConfig::default();
            let accounts = PlayerMap::new(players, |p| {
                Account::new(p, 3_000, 1_000, 2_000).with_per_dependent_expense(rules.per_child_expense)
            });
            Self {
                accounts,
                ids: IdAllocator::new(),
                rng: GameRng::new(11),
                rules,
            }
        }

        fn land(&mut self, square: &Square, turn: u32) -> SquareOutcome {
            let mut ctx = LandingContext {
                player: PlayerId::new(0),
                position: BoardPosition::new(Layer::Middle, 1),
                square,
                accounts: &mut self.accounts,
                ids: &mut self.ids,
                rng: &mut self.rng,
                rules: &self.rules,
                turn,
            };
            resolve_landing(&mut ctx).unwrap()
        }

        fn cash(&self, p: u8) -> i64 {
            self.accounts[PlayerId::new(p)].cash()
        }
    }

    #[test]
    fn test_paycheck_pays_salary_once_per_turn() {
        let mut table = Table::new(2);

        assert_eq!(table.land(&Square::paycheck(), 1), SquareOutcome::Income { amount: 3_000 });
        assert_eq!(table.cash(0), 4_000);

        assert_eq!(table.land(&Square::paycheck(), 1), SquareOutcome::NoOp);
        assert_eq!(table.cash(0), 4_000);
        assert!(!table.accounts[PlayerId::new(0)].is_financially_free());
    }

    #[test]
    fn test_paycheck_bonus() {
        let mut table = Table::new(2);
        let square = Square::new("Payday", SquareKind::Paycheck { bonus: 250 });

        assert_eq!(table.land(&square, 1), SquareOutcome::Income { amount: 3_250 });
        assert_eq!(table.land(&square, 1), SquareOutcome::Income { amount: 250 });
    }

    #[test]
    fn test_settle_expenses_on_paycheck() {
        let mut table = Table::new(2);
        table.rules.settle_expenses_on_paycheck = true;

        table.land(&Square::paycheck(), 1);
        assert_eq!(table.cash(0), 1_000 + 3_000 - 2_000);
    }

    #[test]
    fn test_pinned_opportunity() {
        let mut table = Table::new(2);
        let square = Square::new(
            "Stocks",
            SquareKind::Opportunity {
                card_type: Some(CardType::Financial),
            },
        );
        assert_eq!(table.land(&square, 1), SquareOutcome::CardDraw { card_type: CardType::Financial });
    }

    #[test]
    fn test_weighted_opportunity() {
        let mut table = Table::new(2);
        table.rules.card_type_weights = crate::core::CardTypeWeights::only(CardType::SideBusiness);
        assert_eq!(
            table.land(&Square::opportunity(), 1),
            SquareOutcome::CardDraw { card_type: CardType::SideBusiness }
        );
    }

    #[test]
    fn test_doodad_within_range() {
        let mut table = Table::new(2);
        match table.land(&Square::doodad("Fine", 200, 600), 1) {
            SquareOutcome::Expense { amount, forced_loan, .. } => {
                assert!((200..=600).contains(&amount));
                assert_eq!(forced_loan, None);
                assert_eq!(table.cash(0), 1_000 - amount);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_doodad_shortfall_takes_forced_loan() {
        let mut table = Table::new(2);
        match table.land(&Square::doodad("House repair", 1_500, 1_500), 1) {
            SquareOutcome::Expense { forced_loan, .. } => {
                assert_eq!(forced_loan.map(|(_, amount)| amount), Some(1_000));
                assert_eq!(table.cash(0), 500);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_charity_without_dependents_is_noop() {
        let mut table = Table::new(3);
        let before = table.accounts.clone();

        assert_eq!(table.land(&Square::charity(), 1), SquareOutcome::NoOp);
        assert_eq!(table.accounts, before);
    }

    #[test]
    fn test_charity_pays_other_players() {
        let mut table = Table::new(3);
        table.accounts[PlayerId::new(0)].add_dependent(None);
        table.accounts[PlayerId::new(0)].add_dependent(None);

        let outcome = table.land(&Square::charity(), 1);
        assert_eq!(
            outcome,
            SquareOutcome::CharityDonated {
                share: 100,
                recipients: vec![PlayerId::new(1), PlayerId::new(2)],
            }
        );
        assert_eq!(table.cash(0), 800);
        assert_eq!(table.cash(1), 1_100);
        assert_eq!(table.cash(2), 1_100);
    }

    #[test]
    fn test_downsized_and_baby() {
        let mut table = Table::new(2);

        assert_eq!(
            table.land(&Square::downsized(), 1),
            SquareOutcome::ProfileChanged(ProfileChange::Downsized { turns_left: 2 })
        );
        assert_eq!(table.accounts[PlayerId::new(0)].effective_salary(), 0);

        assert_eq!(
            table.land(&Square::baby(), 1),
            SquareOutcome::ProfileChanged(ProfileChange::DependentAdded { dependents: 1 })
        );
        assert_eq!(table.accounts[PlayerId::new(0)].total_expense(), 2_300);

        table.rules.max_dependents = Some(1);
        assert_eq!(
            table.land(&Square::baby(), 1),
            SquareOutcome::ProfileChanged(ProfileChange::DependentCapped { dependents: 1 })
        );
    }

    #[test]
    fn test_request_outcomes() {
        let mut table = Table::new(2);
        let target = BoardPosition::new(Layer::Inner, 9);

        assert_eq!(table.land(&Square::market(), 1), SquareOutcome::MarketOpened);
        assert_eq!(table.land(&Square::branch(), 1), SquareOutcome::BranchOffered);
        assert_eq!(table.land(&Square::start(), 1), SquareOutcome::NoOp);
        assert_eq!(
            table.land(&Square::transition(target), 1),
            SquareOutcome::LayerTransition { target }
        );
    }
}
