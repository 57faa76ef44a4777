use soroban_sdk::{contracttype, Address, Vec};

use crate::errors::Error;

/// Core data model for the Collective Vault settlement contract.
///
/// This module defines:
/// - Slot plan configuration (`SlotPlan`)
/// - Round lifecycle state (`Round`, `RoundStatus`)
/// - Per-participant records (`Participation`, `ParticipationStatus`)
/// - Resolution outcome records (`ParticipantOutcome`, `ResolutionSummary`)
/// - Composite storage keys (`PairKey`, `RoundKey`, `ParticipationKey`, `DataKey`)

// ===== CONFIGURATION TYPES =====

/// A slot plan: the configuration template a round is opened under.
///
/// Plans are looked up by id on every prediction and resolution call. A
/// redefinition affects only rounds opened afterwards; open rounds keep the
/// `end_time` snapshotted at open.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotPlan {
    /// Plan identifier
    pub plan_id: u32,
    /// Maximum participations per round
    pub user_limit: u32,
    /// Minimum deposit, checked pre-fee
    pub minimum_amount: i128,
    /// Round duration in seconds
    pub duration: u64,
}

impl SlotPlan {
    pub fn validate(&self) -> Result<(), Error> {
        if self.user_limit == 0 || self.minimum_amount <= 0 || self.duration == 0 {
            return Err(Error::InvalidPlanConfig);
        }
        Ok(())
    }
}

/// Protocol fee configuration: `fee = floor(amount * fee_bps / fee_divisor)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub fee_bps: i128,
    pub fee_divisor: i128,
}

impl FeeConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.fee_divisor <= 0 || self.fee_bps < 0 || self.fee_bps >= self.fee_divisor {
            return Err(Error::InvalidFeeConfig);
        }
        Ok(())
    }
}

// ===== ROUND TYPES =====

/// Stored round status. Writability of an open round is not stored; it is
/// the derived predicate `Round::is_open(now)`, so a round seals implicitly
/// the moment its end time passes.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundStatus {
    Open,
    Resolved,
}

/// One time-boxed batch of predictions for a `(plan, asset)` pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    /// Timestamp the first prediction opened this round
    pub opened_at: u64,
    /// `opened_at + plan.duration`, snapshotted at open
    pub end_time: u64,
    /// Sum of net (post-fee) stakes
    pub total_amount: i128,
    pub status: RoundStatus,
}

impl Round {
    pub fn new(opened_at: u64, duration: u64) -> Self {
        Self {
            opened_at,
            end_time: opened_at + duration,
            total_amount: 0,
            status: RoundStatus::Open,
        }
    }

    /// Whether the round still accepts predictions at `now`.
    pub fn is_open(&self, now: u64) -> bool {
        self.status == RoundStatus::Open && now < self.end_time
    }

    /// Whether the round's window has elapsed at `now`.
    pub fn is_mature(&self, now: u64) -> bool {
        now >= self.end_time
    }
}

// ===== PARTICIPATION TYPES =====

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParticipationStatus {
    /// Awaiting resolution
    Pending,
    Won,
    Lost,
    /// Returned without settlement (single-entrant round)
    Refunded,
}

/// One participant's record inside a round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participation {
    /// Net-of-fee stake actually pooled
    pub amount: i128,
    /// Forecast price
    pub price: i128,
    /// Submission timestamp, used as the resolution tie-break
    pub predicted_at: u64,
    pub status: ParticipationStatus,
}

// ===== RESOLUTION TYPES =====

/// Per-participant outcome of a resolved round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantOutcome {
    pub participant: Address,
    pub status: ParticipationStatus,
    pub payout: i128,
}

/// The full, strongly-typed result of resolving a round. Returned by
/// `resolve` and emitted as an event for off-chain indexers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolutionSummary {
    pub plan_id: u32,
    pub asset: Address,
    pub round: u32,
    /// Reference price read from the asset's feed at resolution time
    pub reference_price: i128,
    pub total_amount: i128,
    pub outcomes: Vec<ParticipantOutcome>,
}

// ===== STORAGE KEYS =====

/// Key for per-`(plan, asset)` state (the round counter).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairKey {
    pub plan_id: u32,
    pub asset: Address,
}

/// Key addressing one round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundKey {
    pub plan_id: u32,
    pub asset: Address,
    pub round: u32,
}

/// Key addressing one participant's record inside a round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipationKey {
    pub plan_id: u32,
    pub asset: Address,
    pub round: u32,
    pub participant: Address,
}

/// Persistent storage schema.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Operator,
    Token,
    FeeConfig,
    /// Lifetime total of fees forwarded to the operator
    FeesAccrued,
    Plan(u32),
    Asset(Address),
    Feed(Address),
    Counter(PairKey),
    Round(RoundKey),
    /// Insertion-ordered participant list of a round
    Participants(RoundKey),
    Participation(ParticipationKey),
}
