//! Player weapons: primary gun, homing missiles, charged plasma laser and shield.

use skyfury_core::components::{Aircraft, Lifecycle, Loadout};
use skyfury_core::constants::*;
use skyfury_core::enums::{Faction, FlightMode, ProjectileKind, SoundCue};
use skyfury_core::input::InputState;
use skyfury_core::types::{EntityId, Position, Velocity};

use crate::context::SimContext;
use crate::systems::projectiles;
use crate::world_setup::{self, ProjectileSpec};

/// Horizontal offset of the gun muzzle from the aircraft center.
const MUZZLE_OFFSET_X: f64 = 40.0;
/// Beam origin offset from the aircraft center.
const LASER_ORIGIN_OFFSET_X: f64 = 80.0;

/// Everything fired by the player this frame.
#[derive(Debug, Default)]
struct Volley {
    projectiles: Vec<ProjectileSpec>,
    sounds: Vec<SoundCue>,
    shield_raised: bool,
}

/// Process weapon input for the player.
pub fn run(ctx: &mut SimContext, input: &InputState, dt: f64) {
    let Some(entity) = ctx.player() else {
        return;
    };
    // Missile targets are picked before the player borrow is taken.
    let targets = projectiles::hostile_targets(ctx);

    let volley = {
        let Ok((life, pos, aircraft, loadout)) = ctx
            .world
            .query_one_mut::<(&Lifecycle, &Position, &mut Aircraft, &mut Loadout)>(entity)
        else {
            return;
        };

        tick_cooldowns(loadout, dt);
        update_shield_energy(aircraft, loadout, dt);

        // Weapons stay cold on the runway.
        if aircraft.mode == FlightMode::Runway {
            loadout.laser_charging = false;
            Volley::default()
        } else {
            let owner = life.id;
            let mut volley = Volley::default();

            fire_primary(owner, pos, loadout, input, &mut volley);
            fire_missile(owner, pos, loadout, input, &targets, &mut volley);
            update_laser(owner, pos, loadout, input, dt, &mut volley);
            raise_shield(aircraft, loadout, input, &mut volley);
            volley
        }
    };

    for spec in volley.projectiles {
        world_setup::spawn_projectile(ctx, spec);
    }
    for cue in volley.sounds {
        ctx.sound(cue);
    }
    if volley.shield_raised {
        ctx.message("SHIELD ACTIVATED", MESSAGE_SHORT_SECS);
    }
}

fn tick_cooldowns(loadout: &mut Loadout, dt: f64) {
    loadout.primary_cooldown = (loadout.primary_cooldown - dt).max(0.0);
    loadout.missile_cooldown = (loadout.missile_cooldown - dt).max(0.0);
    loadout.laser_cooldown = (loadout.laser_cooldown - dt).max(0.0);
    loadout.shield_cooldown = (loadout.shield_cooldown - dt).max(0.0);
}

/// Drain while the shield is up, regenerate while it is down.
fn update_shield_energy(aircraft: &mut Aircraft, loadout: &mut Loadout, dt: f64) {
    if aircraft.shield_secs > 0.0 {
        loadout.shield_energy -= SHIELD_ENERGY_RATE * dt;
        if loadout.shield_energy <= 0.0 {
            aircraft.shield_secs = 0.0;
        }
    } else {
        loadout.shield_energy += SHIELD_ENERGY_RATE * dt;
    }
    loadout.shield_energy = loadout.shield_energy.clamp(0.0, SHIELD_MAX_ENERGY);
}

fn fire_primary(
    owner: EntityId,
    pos: &Position,
    loadout: &mut Loadout,
    input: &InputState,
    volley: &mut Volley,
) {
    if !input.fire_primary || loadout.primary_cooldown > 0.0 {
        return;
    }
    let muzzle = Position::new(pos.x + MUZZLE_OFFSET_X, pos.y);
    let forward = Velocity::new(BULLET_SPEED, 0.0);

    match loadout.primary_level {
        0 | 1 => volley
            .projectiles
            .push(ProjectileSpec::bullet(owner, muzzle, forward)),
        2 => {
            for dy in [-TWIN_GUN_OFFSET, TWIN_GUN_OFFSET] {
                let barrel = Position::new(muzzle.x, muzzle.y + dy);
                volley
                    .projectiles
                    .push(ProjectileSpec::bullet(owner, barrel, forward));
            }
        }
        _ => {
            for angle_deg in [-SPREAD_ANGLE_DEG, 0.0, SPREAD_ANGLE_DEG] {
                let velocity = Velocity::from_angle(angle_deg.to_radians(), BULLET_SPEED);
                volley
                    .projectiles
                    .push(ProjectileSpec::bullet(owner, muzzle, velocity));
            }
        }
    }
    loadout.primary_cooldown = PRIMARY_COOLDOWN_SECS;
    volley.sounds.push(SoundCue::Shoot);
}

fn fire_missile(
    owner: EntityId,
    pos: &Position,
    loadout: &mut Loadout,
    input: &InputState,
    targets: &[(EntityId, Position)],
    volley: &mut Volley,
) {
    if !input.fire_missile || loadout.missile_cooldown > 0.0 || loadout.missiles == 0 {
        return;
    }
    let muzzle = Position::new(pos.x + MUZZLE_OFFSET_X, pos.y);
    volley.projectiles.push(ProjectileSpec {
        kind: ProjectileKind::HomingMissile,
        faction: Faction::Player,
        owner: Some(owner),
        position: muzzle,
        velocity: Velocity::new(MISSILE_SPEED, 0.0),
        width: MISSILE_SIZE,
        height: MISSILE_SIZE,
        damage: MISSILE_DAMAGE,
        lifetime_secs: MISSILE_LIFETIME_SECS,
        piercing: false,
        target: projectiles::nearest_target(targets, &muzzle),
    });
    loadout.missiles -= 1;
    loadout.missile_cooldown = MISSILE_COOLDOWN_SECS;
    volley.sounds.push(SoundCue::Missile);
}

/// Charge while held; discharge on release if enough charge has built up.
fn update_laser(
    owner: EntityId,
    pos: &Position,
    loadout: &mut Loadout,
    input: &InputState,
    dt: f64,
    volley: &mut Volley,
) {
    if input.charge_laser {
        loadout.laser_charge = (loadout.laser_charge + LASER_CHARGE_RATE * dt).min(LASER_MAX_CHARGE);
        loadout.laser_charging = true;
        return;
    }

    let released = std::mem::replace(&mut loadout.laser_charging, false);
    if released
        && loadout.laser_charge >= LASER_MIN_FIRE_CHARGE
        && loadout.laser_cooldown <= 0.0
    {
        let charge = loadout.laser_charge;
        let start_x = pos.x + LASER_ORIGIN_OFFSET_X;
        let width = (LASER_END_X - start_x).max(1.0);
        volley.projectiles.push(ProjectileSpec {
            kind: ProjectileKind::PlasmaLaser,
            faction: Faction::Player,
            owner: Some(owner),
            position: Position::new(start_x + width / 2.0, pos.y),
            velocity: Velocity::default(),
            width,
            height: LASER_BASE_WIDTH + LASER_WIDTH_PER_CHARGE * charge,
            damage: LASER_DPS_PER_CHARGE * charge,
            lifetime_secs: LASER_LIFETIME_SECS,
            piercing: true,
            target: None,
        });
        loadout.laser_charge = 0.0;
        loadout.laser_cooldown = LASER_COOLDOWN_SECS;
        volley.sounds.push(SoundCue::Laser);
        return;
    }

    loadout.laser_charge = (loadout.laser_charge + LASER_REGEN_RATE * dt).min(LASER_MAX_CHARGE);
}

fn raise_shield(
    aircraft: &mut Aircraft,
    loadout: &mut Loadout,
    input: &InputState,
    volley: &mut Volley,
) {
    if !input.shield
        || aircraft.shield_secs > 0.0
        || loadout.shield_cooldown > 0.0
        || loadout.shield_energy < SHIELD_ACTIVATION_COST
    {
        return;
    }
    loadout.shield_energy -= SHIELD_ACTIVATION_COST;
    loadout.shield_cooldown = SHIELD_COOLDOWN_SECS;
    aircraft.shield_secs = SHIELD_DURATION_SECS;
    volley.sounds.push(SoundCue::Shield);
    volley.shield_raised = true;
}
