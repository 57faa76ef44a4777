#![no_std]

//! Collective Vault: a custodial prediction-settlement engine.
//!
//! Participants lock a staking token against a price forecast for a chosen
//! asset and time window. Predictions are bucketed into rounds per
//! `(plan, asset)` pair; a protocol fee is forwarded to the operator at
//! acceptance; once a round's window elapses, anyone may trigger resolution,
//! which reads the asset's price feed, ranks forecasts by proximity, and
//! redistributes the pooled net stakes to the winners.

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub mod assets;
pub mod config;
pub mod errors;
pub mod events;
pub mod fees;
pub mod oracles;
pub mod plans;
pub mod predictions;
pub mod resolution;
pub mod rounds;
pub mod types;


use crate::assets::AssetRegistry;
use crate::config::ConfigManager;
use crate::errors::Error;
use crate::events::{
    ContractInitializedEvent, EventEmitter, PredictionPlacedEvent, RoundOpenedEvent,
};
use crate::fees::FeeManager;
use crate::oracles::PriceReader;
use crate::plans::SlotPlanTable;
use crate::predictions::PredictionStore;
use crate::resolution::ResolutionEngine;
use crate::rounds::RoundLedger;
use crate::types::{FeeConfig, Participation, ResolutionSummary, Round, SlotPlan};

#[contract]
pub struct CollectiveVault;

#[contractimpl]
impl CollectiveVault {
    /// Bind the staking token, admin, and operator, install the default fee
    /// configuration and slot plans. Callable once.
    pub fn initialize(
        env: Env,
        token: Address,
        admin: Address,
        operator: Address,
    ) -> Result<(), Error> {
        ConfigManager::initialize(&env, &token, &admin, &operator)?;
        for plan in ConfigManager::default_plans() {
            SlotPlanTable::define(&env, &plan)?;
        }
        EventEmitter::emit_contract_initialized(
            &env,
            &ContractInitializedEvent {
                token,
                admin,
                operator,
                fee_bps: config::DEFAULT_FEE_BPS,
            },
        );
        Ok(())
    }

    // ===== ADMINISTRATION =====

    /// Add an asset to the accepted set. Idempotent.
    pub fn add_asset(env: Env, admin: Address, asset: Address) -> Result<(), Error> {
        ConfigManager::require_admin(&env, &admin)?;
        AssetRegistry::register(&env, &asset);
        EventEmitter::emit_asset_added(&env, &asset);
        Ok(())
    }

    /// Bind or replace the price feed backing an asset.
    pub fn set_price_feed(
        env: Env,
        admin: Address,
        asset: Address,
        feed: Address,
    ) -> Result<(), Error> {
        ConfigManager::require_admin(&env, &admin)?;
        AssetRegistry::set_feed(&env, &asset, &feed)?;
        EventEmitter::emit_feed_set(&env, &asset, &feed);
        Ok(())
    }

    /// Define or redefine a slot plan. Open rounds are unaffected; they
    /// keep the end time snapshotted when they opened.
    pub fn define_plan(env: Env, admin: Address, plan: SlotPlan) -> Result<(), Error> {
        ConfigManager::require_admin(&env, &admin)?;
        SlotPlanTable::define(&env, &plan)?;
        EventEmitter::emit_plan_defined(&env, &plan);
        Ok(())
    }

    /// Change the protocol fee. The divisor is fixed; `fee_bps` must be
    /// below it.
    pub fn set_fee(env: Env, admin: Address, fee_bps: i128) -> Result<(), Error> {
        ConfigManager::require_admin(&env, &admin)?;
        let config = FeeConfig {
            fee_bps,
            fee_divisor: config::FEE_DIVISOR,
        };
        ConfigManager::set_fee_config(&env, &config)?;
        EventEmitter::emit_fee_updated(&env, config.fee_bps, config.fee_divisor);
        Ok(())
    }

    /// Rotate the operator (fee recipient). Fees already forwarded stay
    /// with the previous operator.
    pub fn set_operator(env: Env, admin: Address, operator: Address) -> Result<(), Error> {
        ConfigManager::require_admin(&env, &admin)?;
        ConfigManager::set_operator(&env, &operator);
        EventEmitter::emit_operator_rotated(&env, &operator);
        Ok(())
    }

    // ===== SETTLEMENT =====

    /// Place a prediction: lock `amount` of the staking token against
    /// `price` for `(plan_id, asset)`. The protocol fee is forwarded to the
    /// operator immediately; the net stake joins the active round's pool.
    /// Returns the round index the participation landed in.
    pub fn predict(
        env: Env,
        user: Address,
        amount: i128,
        price: i128,
        plan_id: u32,
        asset: Address,
    ) -> Result<u32, Error> {
        user.require_auth();

        AssetRegistry::ensure_registered(&env, &asset)?;
        let plan = SlotPlanTable::get(&env, plan_id)?;
        if amount < plan.minimum_amount {
            return Err(Error::BelowMinimum);
        }
        let fee_config = ConfigManager::fee_config(&env)?;
        let (fee, net) = fees::calculate(amount, &fee_config)?;

        let token_id = ConfigManager::token(&env)?;
        let operator = ConfigManager::operator(&env)?;
        token::Client::new(&env, &token_id).transfer(
            &user,
            &env.current_contract_address(),
            &amount,
        );
        FeeManager::accrue(&env, &token_id, &operator, fee)?;

        let now = env.ledger().timestamp();
        let active = RoundLedger::resolve_active_round(&env, &plan, &asset, now)?;
        if active.opened {
            EventEmitter::emit_round_opened(
                &env,
                &RoundOpenedEvent {
                    plan_id,
                    asset: asset.clone(),
                    round: active.round,
                    opened_at: active.state.opened_at,
                    end_time: active.state.end_time,
                },
            );
        }
        PredictionStore::add(&env, &plan, &asset, active.round, &user, amount, net, price, now)?;
        RoundLedger::add_stake(&env, plan_id, &asset, active.round, net)?;

        EventEmitter::emit_prediction_placed(
            &env,
            &PredictionPlacedEvent {
                plan_id,
                asset,
                round: active.round,
                participant: user,
                gross: amount,
                fee,
                net,
                forecast_price: price,
            },
        );
        Ok(active.round)
    }

    /// Resolve a matured round: read the asset's reference price, rank
    /// forecasts, pay winners, and seal the round. Retryable while the feed
    /// is unavailable.
    pub fn resolve(
        env: Env,
        plan_id: u32,
        asset: Address,
        round: u32,
    ) -> Result<ResolutionSummary, Error> {
        AssetRegistry::ensure_registered(&env, &asset)?;
        SlotPlanTable::get(&env, plan_id)?;
        let state = RoundLedger::get(&env, plan_id, &asset, round)?;
        RoundLedger::ensure_resolvable(&state, env.ledger().timestamp())?;

        let reference_price = PriceReader::current_price(&env, &asset)?;
        let summary =
            ResolutionEngine::settle(&env, plan_id, &asset, round, &state, reference_price)?;
        RoundLedger::mark_resolved(&env, plan_id, &asset, round)?;
        EventEmitter::emit_round_resolved(&env, &summary);
        Ok(summary)
    }

    // ===== QUERIES =====

    pub fn get_plan(env: Env, plan_id: u32) -> Result<SlotPlan, Error> {
        SlotPlanTable::get(&env, plan_id)
    }

    pub fn get_round(env: Env, plan_id: u32, asset: Address, round: u32) -> Result<Round, Error> {
        RoundLedger::get(&env, plan_id, &asset, round)
    }

    pub fn get_participation(
        env: Env,
        plan_id: u32,
        asset: Address,
        round: u32,
        participant: Address,
    ) -> Result<Participation, Error> {
        PredictionStore::get(&env, plan_id, &asset, round, &participant)
    }

    /// Participants of a round in insertion order.
    pub fn get_participants(env: Env, plan_id: u32, asset: Address, round: u32) -> Vec<Address> {
        PredictionStore::participants(&env, plan_id, &asset, round)
    }

    /// Highest round index issued for `(plan_id, asset)`; 0 before the
    /// first prediction.
    pub fn round_counter(env: Env, plan_id: u32, asset: Address) -> u32 {
        RoundLedger::counter(&env, plan_id, &asset)
    }

    pub fn fee_config(env: Env) -> Result<FeeConfig, Error> {
        ConfigManager::fee_config(&env)
    }

    /// Lifetime total of fees forwarded to the operator.
    pub fn fees_accrued(env: Env) -> i128 {
        FeeManager::total_accrued(&env)
    }

    pub fn is_asset_registered(env: Env, asset: Address) -> bool {
        AssetRegistry::is_registered(&env, &asset)
    }

    pub fn price_feed_of(env: Env, asset: Address) -> Result<Address, Error> {
        AssetRegistry::feed_of(&env, &asset)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        ConfigManager::admin(&env)
    }

    pub fn operator(env: Env) -> Result<Address, Error> {
        ConfigManager::operator(&env)
    }

    pub fn staking_token(env: Env) -> Result<Address, Error> {
        ConfigManager::token(&env)
    }
}
