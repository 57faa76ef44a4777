use soroban_sdk::Env;

use crate::errors::Error;
use crate::types::{DataKey, SlotPlan};

/// Slot plan table: static round configuration, looked up by plan id on
/// every prediction and resolution call.
pub struct SlotPlanTable;

impl SlotPlanTable {
    /// Define or redefine a plan. A redefinition only affects rounds opened
    /// afterwards; open rounds keep the end time snapshotted at open.
    pub fn define(env: &Env, plan: &SlotPlan) -> Result<(), Error> {
        plan.validate()?;
        env.storage()
            .persistent()
            .set(&DataKey::Plan(plan.plan_id), plan);
        Ok(())
    }

    pub fn get(env: &Env, plan_id: u32) -> Result<SlotPlan, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Plan(plan_id))
            .ok_or(Error::UnknownPlan)
    }
}
