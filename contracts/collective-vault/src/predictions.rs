use soroban_sdk::{Address, Env, Vec};

use crate::errors::Error;
use crate::types::{
    DataKey, Participation, ParticipationKey, ParticipationStatus, RoundKey, SlotPlan,
};

/// Prediction store: the insertion-ordered participant list of each round
/// and the per-participant stake/forecast records.
///
/// The participant list's length is the authoritative "how many have
/// entered this round" count. A participant may enter a given round at most
/// once; a second attempt is rejected rather than overwritten, since the
/// fee of the first entry has already been forwarded.
pub struct PredictionStore;

impl PredictionStore {
    /// Record a participation, enforcing the plan's participant cap, the
    /// pre-fee minimum, and the one-entry-per-round rule.
    pub fn add(
        env: &Env,
        plan: &SlotPlan,
        asset: &Address,
        round: u32,
        participant: &Address,
        gross: i128,
        net: i128,
        price: i128,
        now: u64,
    ) -> Result<(), Error> {
        if gross < plan.minimum_amount {
            return Err(Error::BelowMinimum);
        }

        let list_key = DataKey::Participants(RoundKey {
            plan_id: plan.plan_id,
            asset: asset.clone(),
            round,
        });
        let mut list: Vec<Address> = env
            .storage()
            .persistent()
            .get(&list_key)
            .unwrap_or_else(|| Vec::new(env));
        if list.len() >= plan.user_limit {
            return Err(Error::RoundFull);
        }

        let record_key = DataKey::Participation(ParticipationKey {
            plan_id: plan.plan_id,
            asset: asset.clone(),
            round,
            participant: participant.clone(),
        });
        if env.storage().persistent().has(&record_key) {
            return Err(Error::AlreadyPredicted);
        }

        list.push_back(participant.clone());
        env.storage().persistent().set(&list_key, &list);
        env.storage().persistent().set(
            &record_key,
            &Participation {
                amount: net,
                price,
                predicted_at: now,
                status: ParticipationStatus::Pending,
            },
        );
        Ok(())
    }

    pub fn get(
        env: &Env,
        plan_id: u32,
        asset: &Address,
        round: u32,
        participant: &Address,
    ) -> Result<Participation, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Participation(ParticipationKey {
                plan_id,
                asset: asset.clone(),
                round,
                participant: participant.clone(),
            }))
            .ok_or(Error::NotFound)
    }

    /// Participants of a round in insertion order. Empty when the round
    /// does not exist.
    pub fn participants(env: &Env, plan_id: u32, asset: &Address, round: u32) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Participants(RoundKey {
                plan_id,
                asset: asset.clone(),
                round,
            }))
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn set_status(
        env: &Env,
        plan_id: u32,
        asset: &Address,
        round: u32,
        participant: &Address,
        status: ParticipationStatus,
    ) -> Result<(), Error> {
        let key = DataKey::Participation(ParticipationKey {
            plan_id,
            asset: asset.clone(),
            round,
            participant: participant.clone(),
        });
        let mut record: Participation = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NotFound)?;
        record.status = status;
        env.storage().persistent().set(&key, &record);
        Ok(())
    }
}
