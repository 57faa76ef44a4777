use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::types::{DataKey, PairKey, Round, RoundKey, RoundStatus, SlotPlan};

/// Round ledger: the per-`(plan, asset)` sequence of rounds and its
/// lifecycle (open, implicitly sealed, resolved).
///
/// Rounds are created lazily by `resolve_active_round`; there is no
/// background scheduler. The counter starts at 1 on the first prediction,
/// increments by exactly one when a prediction arrives after the active
/// round's end time, and never decreases or skips.
pub struct RoundLedger;

/// Result of bucketing a prediction into a round.
pub struct ActiveRound {
    pub round: u32,
    pub state: Round,
    /// Whether this call opened the round
    pub opened: bool,
}

impl RoundLedger {
    /// Highest round index issued for `(plan_id, asset)`, 0 before the
    /// first prediction.
    pub fn counter(env: &Env, plan_id: u32, asset: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Counter(PairKey {
                plan_id,
                asset: asset.clone(),
            }))
            .unwrap_or(0)
    }

    /// The round a prediction at `now` belongs to.
    ///
    /// Creates round 1 if none exists, advances to `r + 1` when round `r`
    /// has ended (sealing `r` for further predictions), and otherwise
    /// returns the still-open round unchanged. Idempotent within one
    /// instant and monotone in `now`.
    pub fn resolve_active_round(
        env: &Env,
        plan: &SlotPlan,
        asset: &Address,
        now: u64,
    ) -> Result<ActiveRound, Error> {
        let current = Self::counter(env, plan.plan_id, asset);
        if current > 0 {
            let state = Self::get(env, plan.plan_id, asset, current)?;
            if state.is_open(now) {
                return Ok(ActiveRound {
                    round: current,
                    state,
                    opened: false,
                });
            }
        }

        let next = current
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        let state = Round::new(now, plan.duration);
        let storage = env.storage().persistent();
        storage.set(
            &DataKey::Counter(PairKey {
                plan_id: plan.plan_id,
                asset: asset.clone(),
            }),
            &next,
        );
        storage.set(
            &DataKey::Round(RoundKey {
                plan_id: plan.plan_id,
                asset: asset.clone(),
                round: next,
            }),
            &state,
        );
        Ok(ActiveRound {
            round: next,
            state,
            opened: true,
        })
    }

    pub fn get(env: &Env, plan_id: u32, asset: &Address, round: u32) -> Result<Round, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Round(RoundKey {
                plan_id,
                asset: asset.clone(),
                round,
            }))
            .ok_or(Error::NotFound)
    }

    /// Add a net stake to the round's pooled total.
    pub fn add_stake(
        env: &Env,
        plan_id: u32,
        asset: &Address,
        round: u32,
        net: i128,
    ) -> Result<Round, Error> {
        let key = DataKey::Round(RoundKey {
            plan_id,
            asset: asset.clone(),
            round,
        });
        let mut state: Round = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NotFound)?;
        state.total_amount = state
            .total_amount
            .checked_add(net)
            .ok_or(Error::ArithmeticOverflow)?;
        env.storage().persistent().set(&key, &state);
        Ok(state)
    }

    /// Check the round may be resolved at `now`.
    pub fn ensure_resolvable(round: &Round, now: u64) -> Result<(), Error> {
        if round.status == RoundStatus::Resolved {
            return Err(Error::AlreadyResolved);
        }
        if !round.is_mature(now) {
            return Err(Error::RoundNotMatured);
        }
        Ok(())
    }

    pub fn mark_resolved(env: &Env, plan_id: u32, asset: &Address, round: u32) -> Result<(), Error> {
        let key = DataKey::Round(RoundKey {
            plan_id,
            asset: asset.clone(),
            round,
        });
        let mut state: Round = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NotFound)?;
        if state.status == RoundStatus::Resolved {
            return Err(Error::AlreadyResolved);
        }
        state.status = RoundStatus::Resolved;
        env.storage().persistent().set(&key, &state);
        Ok(())
    }
}
