//! Drives a policy through the engine's two-phase turn loop.

use anyhow::{Context, Result};
use harvest_bot_core::{ItemType, UpgradeType};
use harvest_bot_system_decision::Policy;
use harvest_bot_transport::Transport;
use tracing::info;

/// Announces the loadout and then plays turns until the transport fails.
pub(crate) fn run<T>(
    transport: &mut T,
    policy: &mut dyn Policy,
    item: ItemType,
    upgrade: UpgradeType,
) -> Result<()>
where
    T: Transport + ?Sized,
{
    transport
        .send_loadout(item, upgrade)
        .context("failed to send loadout")?;
    info!(policy = policy.name(), %item, %upgrade, "loadout sent");

    loop {
        play_turn(transport, policy)?;
    }
}

/// Plays one turn: a movement phase followed by an action phase.
pub(crate) fn play_turn<T>(transport: &mut T, policy: &mut dyn Policy) -> Result<()>
where
    T: Transport + ?Sized,
{
    let snapshot = transport
        .fetch_snapshot()
        .context("failed to fetch movement phase snapshot")?;
    let movement = policy.decide_move(&snapshot);
    transport
        .send_decision(&movement.into())
        .context("failed to send movement decision")?;

    let snapshot = transport
        .fetch_snapshot()
        .context("failed to fetch action phase snapshot")?;
    let action = policy
        .decide_action(&snapshot)
        .context("policy produced a malformed action")?;
    transport
        .send_decision(&action.into())
        .context("failed to send action decision")?;
    Ok(())
}
