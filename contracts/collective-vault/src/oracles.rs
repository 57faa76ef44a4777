use soroban_sdk::{contracttype, symbol_short, vec, Address, Env};

use crate::assets::AssetRegistry;
use crate::config::MAX_PRICE_AGE;
use crate::errors::Error;

/// Price-reference layer.
///
/// The vault never owns price discovery: each asset is backed by an
/// external feed contract exposing a `lastprice` entry returning the most
/// recent `(price, timestamp)` observation. Any missing, non-positive, or
/// stale reading is treated as `FeedUnavailable`; resolution aborts with no
/// state change and may be retried once the feed recovers.

/// Observation returned by a feed contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

/// Thin client over a feed contract.
pub struct FeedClient<'a> {
    env: &'a Env,
    feed: Address,
}

impl<'a> FeedClient<'a> {
    pub fn new(env: &'a Env, feed: Address) -> Self {
        Self { env, feed }
    }

    fn lastprice(&self) -> Option<PriceData> {
        let args = vec![self.env];
        self.env
            .invoke_contract(&self.feed, &symbol_short!("lastprice"), args)
    }
}

pub struct PriceReader;

impl PriceReader {
    /// Read and validate the current reference price of `asset`.
    pub fn current_price(env: &Env, asset: &Address) -> Result<i128, Error> {
        let feed = AssetRegistry::feed_of(env, asset)?;
        let data = FeedClient::new(env, feed)
            .lastprice()
            .ok_or(Error::FeedUnavailable)?;
        Self::validate(env, &data)?;
        Ok(data.price)
    }

    fn validate(env: &Env, data: &PriceData) -> Result<(), Error> {
        if data.price <= 0 {
            return Err(Error::FeedUnavailable);
        }
        let now = env.ledger().timestamp();
        if data.timestamp > now || now - data.timestamp > MAX_PRICE_AGE {
            return Err(Error::FeedUnavailable);
        }
        Ok(())
    }
}
