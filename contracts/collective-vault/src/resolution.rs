use soroban_sdk::{token, Address, Env, Vec};

use crate::config::ConfigManager;
use crate::errors::Error;
use crate::predictions::PredictionStore;
use crate::types::{ParticipantOutcome, ParticipationStatus, ResolutionSummary, Round};

/// Resolution engine: ranks a matured round's participations against the
/// reference price and redistributes the pooled stake.
///
/// Ranking order is a deterministic total order: proximity of the forecast
/// to the reference price, then earliest submission time, then insertion
/// order. The pool is split evenly among all participations at the minimum
/// distance; the integer-division remainder goes to the first-ranked winner,
/// so payouts always sum to exactly `round.total_amount`. A round with a
/// single participation has no counterparty and is refunded instead.

struct WinnerSelection {
    /// Indices into the entry list, insertion order preserved
    winners: Vec<u32>,
    /// Index of the first-ranked winner (earliest submission among ties)
    leader: u32,
}

fn distance(forecast: i128, reference: i128) -> Result<i128, Error> {
    forecast
        .checked_sub(reference)
        .and_then(|d| d.checked_abs())
        .ok_or(Error::ArithmeticOverflow)
}

fn select_winners(
    env: &Env,
    reference: i128,
    entries: &Vec<(i128, u64)>,
) -> Result<WinnerSelection, Error> {
    let mut min_distance: Option<i128> = None;
    for (forecast, _) in entries.iter() {
        let d = distance(forecast, reference)?;
        if min_distance.map_or(true, |m| d < m) {
            min_distance = Some(d);
        }
    }
    let min_distance = min_distance.ok_or(Error::NotFound)?;

    let mut winners: Vec<u32> = Vec::new(env);
    let mut leader: u32 = 0;
    let mut leader_time: Option<u64> = None;
    for (idx, (forecast, predicted_at)) in entries.iter().enumerate() {
        if distance(forecast, reference)? == min_distance {
            let idx = idx as u32;
            winners.push_back(idx);
            // strict comparison keeps insertion order on equal times
            if leader_time.map_or(true, |t| predicted_at < t) {
                leader = idx;
                leader_time = Some(predicted_at);
            }
        }
    }
    Ok(WinnerSelection { winners, leader })
}

pub struct ResolutionEngine;

impl ResolutionEngine {
    /// Settle a matured round at `reference_price`: compute every
    /// participant's outcome, pay winners from the pool, and persist the
    /// per-participation statuses.
    pub fn settle(
        env: &Env,
        plan_id: u32,
        asset: &Address,
        round: u32,
        state: &Round,
        reference_price: i128,
    ) -> Result<ResolutionSummary, Error> {
        let participants = PredictionStore::participants(env, plan_id, asset, round);
        let mut outcomes: Vec<ParticipantOutcome> = Vec::new(env);

        if participants.len() == 1 {
            // no counterparty: return the net stake
            let participant = participants.get_unchecked(0);
            Self::apply_outcome(
                env,
                plan_id,
                asset,
                round,
                &mut outcomes,
                &participant,
                ParticipationStatus::Refunded,
                state.total_amount,
            )?;
        } else if participants.len() > 1 {
            let mut entries: Vec<(i128, u64)> = Vec::new(env);
            for participant in participants.iter() {
                let record = PredictionStore::get(env, plan_id, asset, round, &participant)?;
                entries.push_back((record.price, record.predicted_at));
            }
            let selection = select_winners(env, reference_price, &entries)?;

            let share = state.total_amount / selection.winners.len() as i128;
            let remainder = state.total_amount - share * selection.winners.len() as i128;

            for (idx, participant) in participants.iter().enumerate() {
                let idx = idx as u32;
                let (status, payout) = if selection.winners.contains(&idx) {
                    let payout = if idx == selection.leader {
                        share.checked_add(remainder).ok_or(Error::ArithmeticOverflow)?
                    } else {
                        share
                    };
                    (ParticipationStatus::Won, payout)
                } else {
                    (ParticipationStatus::Lost, 0)
                };
                Self::apply_outcome(
                    env,
                    plan_id,
                    asset,
                    round,
                    &mut outcomes,
                    &participant,
                    status,
                    payout,
                )?;
            }
        }

        Ok(ResolutionSummary {
            plan_id,
            asset: asset.clone(),
            round,
            reference_price,
            total_amount: state.total_amount,
            outcomes,
        })
    }

    fn apply_outcome(
        env: &Env,
        plan_id: u32,
        asset: &Address,
        round: u32,
        outcomes: &mut Vec<ParticipantOutcome>,
        participant: &Address,
        status: ParticipationStatus,
        payout: i128,
    ) -> Result<(), Error> {
        PredictionStore::set_status(env, plan_id, asset, round, participant, status)?;
        if payout > 0 {
            let token_id = ConfigManager::token(env)?;
            token::Client::new(env, &token_id).transfer(
                &env.current_contract_address(),
                participant,
                &payout,
            );
        }
        outcomes.push_back(ParticipantOutcome {
            participant: participant.clone(),
            status,
            payout,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(env: &Env, raw: &[(i128, u64)]) -> Vec<(i128, u64)> {
        let mut out = Vec::new(env);
        for e in raw {
            out.push_back(*e);
        }
        out
    }

    #[test]
    fn closest_forecast_wins() {
        let env = Env::default();
        let e = entries(&env, &[(100, 1), (180, 2), (250, 3)]);
        let selection = select_winners(&env, 200, &e).unwrap();
        assert_eq!(selection.winners.len(), 1);
        assert_eq!(selection.winners.get_unchecked(0), 1);
        assert_eq!(selection.leader, 1);
    }

    #[test]
    fn equidistant_forecasts_all_win_with_earliest_leader() {
        let env = Env::default();
        // 150 and 250 are both 50 away from 200; the later-submitted 250
        // entry arrived first in time
        let e = entries(&env, &[(150, 9), (250, 4), (500, 1)]);
        let selection = select_winners(&env, 200, &e).unwrap();
        assert_eq!(selection.winners.len(), 2);
        assert_eq!(selection.winners.get_unchecked(0), 0);
        assert_eq!(selection.winners.get_unchecked(1), 1);
        assert_eq!(selection.leader, 1);
    }

    #[test]
    fn equal_times_fall_back_to_insertion_order() {
        let env = Env::default();
        let e = entries(&env, &[(150, 5), (250, 5)]);
        let selection = select_winners(&env, 200, &e).unwrap();
        assert_eq!(selection.winners.len(), 2);
        assert_eq!(selection.leader, 0);
    }

    #[test]
    fn extreme_forecast_distance_reports_overflow() {
        let env = Env::default();
        let e = entries(&env, &[(i128::MIN, 1)]);
        assert_eq!(
            select_winners(&env, i128::MAX, &e).err(),
            Some(Error::ArithmeticOverflow)
        );
    }
}
