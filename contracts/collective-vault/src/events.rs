use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::types::{ResolutionSummary, SlotPlan};

/// Typed contract events.
///
/// Every state transition publishes one structured record for off-chain
/// indexers: initialization, registry and configuration changes, prediction
/// acceptance, round opening, and resolution. The resolution record carries
/// the full per-participant outcome list.

// ===== EVENT RECORDS =====

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractInitializedEvent {
    pub token: Address,
    pub admin: Address,
    pub operator: Address,
    pub fee_bps: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetAddedEvent {
    pub asset: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedSetEvent {
    pub asset: Address,
    pub feed: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanDefinedEvent {
    pub plan: SlotPlan,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdatedEvent {
    pub fee_bps: i128,
    pub fee_divisor: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorRotatedEvent {
    pub operator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredictionPlacedEvent {
    pub plan_id: u32,
    pub asset: Address,
    pub round: u32,
    pub participant: Address,
    pub gross: i128,
    pub fee: i128,
    pub net: i128,
    pub forecast_price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundOpenedEvent {
    pub plan_id: u32,
    pub asset: Address,
    pub round: u32,
    pub opened_at: u64,
    pub end_time: u64,
}

// ===== EMITTER =====

pub struct EventEmitter;

impl EventEmitter {
    pub fn emit_contract_initialized(env: &Env, event: &ContractInitializedEvent) {
        env.events()
            .publish((Symbol::new(env, "contract_initialized"),), event.clone());
    }

    pub fn emit_asset_added(env: &Env, asset: &Address) {
        env.events().publish(
            (Symbol::new(env, "asset_added"),),
            AssetAddedEvent {
                asset: asset.clone(),
            },
        );
    }

    pub fn emit_feed_set(env: &Env, asset: &Address, feed: &Address) {
        env.events().publish(
            (Symbol::new(env, "feed_set"),),
            FeedSetEvent {
                asset: asset.clone(),
                feed: feed.clone(),
            },
        );
    }

    pub fn emit_plan_defined(env: &Env, plan: &SlotPlan) {
        env.events().publish(
            (Symbol::new(env, "plan_defined"),),
            PlanDefinedEvent { plan: plan.clone() },
        );
    }

    pub fn emit_fee_updated(env: &Env, fee_bps: i128, fee_divisor: i128) {
        env.events().publish(
            (Symbol::new(env, "fee_updated"),),
            FeeUpdatedEvent {
                fee_bps,
                fee_divisor,
            },
        );
    }

    pub fn emit_operator_rotated(env: &Env, operator: &Address) {
        env.events().publish(
            (Symbol::new(env, "operator_rotated"),),
            OperatorRotatedEvent {
                operator: operator.clone(),
            },
        );
    }

    pub fn emit_prediction_placed(env: &Env, event: &PredictionPlacedEvent) {
        env.events()
            .publish((Symbol::new(env, "prediction_placed"),), event.clone());
    }

    pub fn emit_round_opened(env: &Env, event: &RoundOpenedEvent) {
        env.events()
            .publish((Symbol::new(env, "round_opened"),), event.clone());
    }

    pub fn emit_round_resolved(env: &Env, summary: &ResolutionSummary) {
        env.events()
            .publish((Symbol::new(env, "round_resolved"),), summary.clone());
    }
}
