use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::types::DataKey;

/// Asset registry: which assets predictions may be placed on, and which
/// price-feed contract backs each one.
///
/// An asset must be registered before it can appear in a prediction; a feed
/// must be bound before a round on that asset can be resolved.
pub struct AssetRegistry;

impl AssetRegistry {
    /// Add an asset to the accepted set. Idempotent.
    pub fn register(env: &Env, asset: &Address) {
        env.storage()
            .persistent()
            .set(&DataKey::Asset(asset.clone()), &true);
    }

    pub fn is_registered(env: &Env, asset: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Asset(asset.clone()))
            .unwrap_or(false)
    }

    pub fn ensure_registered(env: &Env, asset: &Address) -> Result<(), Error> {
        if !Self::is_registered(env, asset) {
            return Err(Error::UnknownAsset);
        }
        Ok(())
    }

    /// Bind or replace the price feed of a registered asset.
    ///
    /// A feed pointing at the vault itself or at the asset it is supposed to
    /// price is a malformed binding.
    pub fn set_feed(env: &Env, asset: &Address, feed: &Address) -> Result<(), Error> {
        Self::ensure_registered(env, asset)?;
        if *feed == env.current_contract_address() || feed == asset {
            return Err(Error::InvalidFeed);
        }
        env.storage()
            .persistent()
            .set(&DataKey::Feed(asset.clone()), feed);
        Ok(())
    }

    /// The feed bound to `asset`. `FeedUnavailable` when unset.
    pub fn feed_of(env: &Env, asset: &Address) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Feed(asset.clone()))
            .ok_or(Error::FeedUnavailable)
    }
}
