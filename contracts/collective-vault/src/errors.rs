use soroban_sdk::contracterror;

/// Error codes for the Collective Vault settlement contract.
///
/// Every public contract function returns `Result<T, Error>`. Errors are
/// terminal for the triggering call: the host reverts all storage writes and
/// token movements, so no error leaves the ledger partially mutated. Codes
/// are grouped by category:
///
/// - **100–199**: lifecycle and authorization
/// - **200–299**: prediction-side failures
/// - **300–399**: resolution-side failures
/// - **400–499**: configuration failures
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ===== LIFECYCLE / AUTH =====
    /// Contract has already been initialized
    AlreadyInitialized = 100,
    /// Contract has not been initialized yet
    NotInitialized = 101,
    /// Caller is not the admin
    Unauthorized = 102,

    // ===== PREDICTION =====
    /// Asset has not been registered
    UnknownAsset = 200,
    /// Slot plan id has no definition
    UnknownPlan = 201,
    /// Deposit is below the plan minimum
    BelowMinimum = 202,
    /// Round already holds the plan's participant limit
    RoundFull = 203,
    /// Participant already entered this round
    AlreadyPredicted = 204,

    // ===== RESOLUTION =====
    /// Round end time has not passed yet
    RoundNotMatured = 300,
    /// Round has already been resolved
    AlreadyResolved = 301,
    /// Price feed is unset, erroring, or stale
    FeedUnavailable = 302,
    /// Payout or stake arithmetic overflowed
    ArithmeticOverflow = 303,
    /// Requested round or participation does not exist
    NotFound = 304,

    // ===== CONFIGURATION =====
    /// Feed binding is malformed
    InvalidFeed = 400,
    /// Fee basis points do not fit the divisor
    InvalidFeeConfig = 401,
    /// Slot plan parameters are out of range
    InvalidPlanConfig = 402,
}

impl Error {
    /// Human-readable description, suitable for client display.
    pub fn description(&self) -> &'static str {
        match self {
            Error::AlreadyInitialized => "Contract has already been initialized",
            Error::NotInitialized => "Contract has not been initialized yet",
            Error::Unauthorized => "Caller is not the admin",
            Error::UnknownAsset => "Asset has not been registered",
            Error::UnknownPlan => "Slot plan id has no definition",
            Error::BelowMinimum => "Deposit is below the plan minimum",
            Error::RoundFull => "Round already holds the participant limit",
            Error::AlreadyPredicted => "Participant already entered this round",
            Error::RoundNotMatured => "Round end time has not passed yet",
            Error::AlreadyResolved => "Round has already been resolved",
            Error::FeedUnavailable => "Price feed is unset, erroring, or stale",
            Error::ArithmeticOverflow => "Payout or stake arithmetic overflowed",
            Error::NotFound => "Requested round or participation does not exist",
            Error::InvalidFeed => "Feed binding is malformed",
            Error::InvalidFeeConfig => "Fee basis points do not fit the divisor",
            Error::InvalidPlanConfig => "Slot plan parameters are out of range",
        }
    }

    /// Stable string identifier for logs and off-chain indexers.
    pub fn code(&self) -> &'static str {
        match self {
            Error::AlreadyInitialized => "ALREADY_INITIALIZED",
            Error::NotInitialized => "NOT_INITIALIZED",
            Error::Unauthorized => "UNAUTHORIZED",
            Error::UnknownAsset => "UNKNOWN_ASSET",
            Error::UnknownPlan => "UNKNOWN_PLAN",
            Error::BelowMinimum => "BELOW_MINIMUM",
            Error::RoundFull => "ROUND_FULL",
            Error::AlreadyPredicted => "ALREADY_PREDICTED",
            Error::RoundNotMatured => "ROUND_NOT_MATURED",
            Error::AlreadyResolved => "ALREADY_RESOLVED",
            Error::FeedUnavailable => "FEED_UNAVAILABLE",
            Error::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Error::NotFound => "NOT_FOUND",
            Error::InvalidFeed => "INVALID_FEED",
            Error::InvalidFeeConfig => "INVALID_FEE_CONFIG",
            Error::InvalidPlanConfig => "INVALID_PLAN_CONFIG",
        }
    }
}
