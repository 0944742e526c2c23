//! Pickup system: drops, drift, expiry and collection effects.

use hecs::Entity;
use rand::Rng;

use skyfury_core::components::{Aircraft, Health, Lifecycle, Loadout, Pickup};
use skyfury_core::constants::*;
use skyfury_core::enums::PickupKind;
use skyfury_core::types::{Position, Velocity};

use crate::context::SimContext;
use crate::world_setup;

/// Drift pickups left and expire them.
pub fn run(ctx: &mut SimContext, dt: f64) {
    for (_entity, (life, pos, vel, pickup)) in ctx
        .world
        .query_mut::<(&mut Lifecycle, &mut Position, &Velocity, &mut Pickup)>()
    {
        if !life.alive {
            continue;
        }
        *pos = pos.advanced(vel, dt);
        pickup.lifetime_secs -= dt;
        if pickup.lifetime_secs <= 0.0 || pos.x < -OFFSCREEN_LEFT_MARGIN {
            life.alive = false;
        }
    }
}

/// Weighted pickup roll: health 30, upgrade 20, missiles 25, shield 15, score 10.
pub fn roll_kind<R: Rng>(rng: &mut R) -> PickupKind {
    match rng.gen_range(0..100) {
        0..=29 => PickupKind::Health,
        30..=49 => PickupKind::WeaponUpgrade,
        50..=74 => PickupKind::Missiles,
        75..=89 => PickupKind::Shield,
        _ => PickupKind::Score,
    }
}

/// Roll the drop chance for a destroyed regular enemy.
pub fn maybe_drop(ctx: &mut SimContext, position: Position) {
    if ctx.rng.gen_bool(PICKUP_DROP_CHANCE) {
        let kind = roll_kind(&mut ctx.rng);
        world_setup::spawn_pickup(ctx, kind, position);
    }
}

/// Scatter the guaranteed boss drops.
pub fn boss_drop(ctx: &mut SimContext, position: Position) {
    let count = ctx.rng.gen_range(BOSS_DROP_MIN..=BOSS_DROP_MAX);
    for _ in 0..count {
        let kind = roll_kind(&mut ctx.rng);
        let offset = Position::new(
            position.x + ctx.rng.gen_range(-BOSS_DROP_SCATTER..=BOSS_DROP_SCATTER),
            position.y + ctx.rng.gen_range(-BOSS_DROP_SCATTER..=BOSS_DROP_SCATTER),
        );
        world_setup::spawn_pickup(ctx, kind, offset);
    }
}

/// Apply a collected pickup to the player. Returns the HUD banner text.
pub fn apply(ctx: &mut SimContext, player: Entity, kind: PickupKind) -> String {
    let Ok((health, aircraft, loadout)) = ctx
        .world
        .query_one_mut::<(&mut Health, &mut Aircraft, &mut Loadout)>(player)
    else {
        log::warn!("Pickup {kind:?} collected by an entity without a loadout");
        return String::new();
    };

    let (text, bonus) = match kind {
        PickupKind::Health => {
            health.current = (health.current + PICKUP_HEAL_AMOUNT).min(health.max);
            (format!("+{PICKUP_HEAL_AMOUNT:.0} Health!"), 0)
        }
        PickupKind::WeaponUpgrade if loadout.primary_level < PRIMARY_MAX_LEVEL => {
            loadout.primary_level += 1;
            ("Weapon Upgraded!".to_string(), 0)
        }
        PickupKind::WeaponUpgrade => (
            format!("+{MAXED_UPGRADE_BONUS} Points!"),
            MAXED_UPGRADE_BONUS,
        ),
        PickupKind::Missiles => {
            loadout.missiles = (loadout.missiles + PICKUP_MISSILE_AMOUNT).min(MISSILE_MAX_AMMO);
            (format!("+{PICKUP_MISSILE_AMOUNT} Missiles!"), 0)
        }
        PickupKind::Shield => {
            loadout.shield_energy = SHIELD_MAX_ENERGY;
            aircraft.shield_secs = SHIELD_DURATION_SECS;
            ("Shield Activated!".to_string(), 0)
        }
        PickupKind::Score => {
            let points = SCORE_PICKUP_VALUES[ctx.rng.gen_range(0..SCORE_PICKUP_VALUES.len())];
            (format!("+{points} Points!"), points)
        }
    };

    ctx.session.add_score(bonus);
    text
}
