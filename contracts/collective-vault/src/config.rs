use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::types::{DataKey, FeeConfig, SlotPlan};

/// Configuration management for the Collective Vault contract.
///
/// This module provides:
/// - Centralized constants (fee defaults, freshness window, default plans)
/// - Initialization and admin-guard helpers
/// - Stored fee configuration access

// ===== FEE CONSTANTS =====

/// Default protocol fee in basis points of `FEE_DIVISOR` (25%)
pub const DEFAULT_FEE_BPS: i128 = 2_500;

/// Fee divisor (basis-point denominator)
pub const FEE_DIVISOR: i128 = 10_000;

// ===== ORACLE CONSTANTS =====

/// Maximum age of a feed reading before it is treated as unavailable
pub const MAX_PRICE_AGE: u64 = 3_600;

// ===== CONFIG MANAGER =====

pub struct ConfigManager;

impl ConfigManager {
    /// Store the initial bindings. Fails if the contract was already
    /// initialized.
    pub fn initialize(
        env: &Env,
        token: &Address,
        admin: &Address,
        operator: &Address,
    ) -> Result<(), Error> {
        let storage = env.storage().persistent();
        if storage.has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        storage.set(&DataKey::Token, token);
        storage.set(&DataKey::Admin, admin);
        storage.set(&DataKey::Operator, operator);
        storage.set(
            &DataKey::FeeConfig,
            &FeeConfig {
                fee_bps: DEFAULT_FEE_BPS,
                fee_divisor: FEE_DIVISOR,
            },
        );
        storage.set(&DataKey::FeesAccrued, &0i128);
        Ok(())
    }

    pub fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn operator(env: &Env) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)
    }

    pub fn token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    /// Authenticate `caller` and check it against the stored admin.
    pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != Self::admin(env)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub fn set_operator(env: &Env, operator: &Address) {
        env.storage().persistent().set(&DataKey::Operator, operator);
    }

    pub fn fee_config(env: &Env) -> Result<FeeConfig, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::FeeConfig)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_fee_config(env: &Env, config: &FeeConfig) -> Result<(), Error> {
        config.validate()?;
        env.storage().persistent().set(&DataKey::FeeConfig, config);
        Ok(())
    }

    /// Slot plans installed at initialization.
    pub fn default_plans() -> [SlotPlan; 3] {
        [
            SlotPlan {
                plan_id: 1,
                user_limit: 10,
                minimum_amount: 1_000,
                duration: 10_800,
            },
            SlotPlan {
                plan_id: 2,
                user_limit: 5,
                minimum_amount: 2_000,
                duration: 3_600,
            },
            SlotPlan {
                plan_id: 3,
                user_limit: 2,
                minimum_amount: 3_000,
                duration: 1_800,
            },
        ]
    }
}
