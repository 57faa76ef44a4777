use soroban_sdk::{token, Address, Env};

use crate::errors::Error;
use crate::types::{DataKey, FeeConfig};

/// Fee extraction for the Collective Vault contract.
///
/// The protocol fee is taken at prediction time, not at resolution: the
/// gross deposit is split into `fee` and `net`, the fee is forwarded to the
/// operator within the same invocation, and only the net amount enters the
/// round's pool.

/// Split a gross deposit into `(fee, net)` under `config`.
///
/// `fee = floor(amount * fee_bps / fee_divisor)`. The multiply is checked;
/// an overflow is surfaced rather than truncated.
pub fn calculate(amount: i128, config: &FeeConfig) -> Result<(i128, i128), Error> {
    let fee = amount
        .checked_mul(config.fee_bps)
        .ok_or(Error::ArithmeticOverflow)?
        / config.fee_divisor;
    Ok((fee, amount - fee))
}

pub struct FeeManager;

impl FeeManager {
    /// Forward `fee` to the operator and add it to the lifetime accrual
    /// counter.
    pub fn accrue(
        env: &Env,
        token_id: &Address,
        operator: &Address,
        fee: i128,
    ) -> Result<(), Error> {
        if fee == 0 {
            return Ok(());
        }
        token::Client::new(env, token_id).transfer(
            &env.current_contract_address(),
            operator,
            &fee,
        );
        let total: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::FeesAccrued)
            .unwrap_or(0);
        let total = total.checked_add(fee).ok_or(Error::ArithmeticOverflow)?;
        env.storage().persistent().set(&DataKey::FeesAccrued, &total);
        Ok(())
    }

    /// Lifetime total of fees forwarded to the operator.
    pub fn total_accrued(env: &Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::FeesAccrued)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> FeeConfig {
        FeeConfig {
            fee_bps: 2_500,
            fee_divisor: 10_000,
        }
    }

    #[test]
    fn splits_deposit_with_floor_division() {
        let config = default_config();
        assert_eq!(calculate(1_000, &config).unwrap(), (250, 750));
        assert_eq!(calculate(3_000, &config).unwrap(), (750, 2_250));
        // 1001 * 2500 / 10000 = 250.25, floored
        assert_eq!(calculate(1_001, &config).unwrap(), (250, 751));
    }

    #[test]
    fn zero_deposit_takes_no_fee() {
        assert_eq!(calculate(0, &default_config()).unwrap(), (0, 0));
    }

    #[test]
    fn overflow_is_reported_not_truncated() {
        let config = default_config();
        assert_eq!(
            calculate(i128::MAX, &config),
            Err(Error::ArithmeticOverflow)
        );
    }

    #[test]
    fn fee_config_validation() {
        assert!(default_config().validate().is_ok());
        assert_eq!(
            FeeConfig {
                fee_bps: 10_000,
                fee_divisor: 10_000
            }
            .validate(),
            Err(Error::InvalidFeeConfig)
        );
        assert_eq!(
            FeeConfig {
                fee_bps: -1,
                fee_divisor: 10_000
            }
            .validate(),
            Err(Error::InvalidFeeConfig)
        );
    }
}
