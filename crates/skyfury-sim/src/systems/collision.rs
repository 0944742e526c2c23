//! Collision resolver.
//!
//! Four flat passes of axis-aligned box tests, in fixed order:
//! player vs enemy shots, hostiles vs player projectiles, player vs
//! hostiles, and player vs pickups. Every pass walks its colliders in
//! spawn order, so when several projectiles hit one target in the same
//! frame their damage lands in the order they were fired. Anything killed
//! or consumed in a pass is invisible to every later test.

use hecs::Entity;

use skyfury_core::components::*;
use skyfury_core::constants::*;
use skyfury_core::enums::*;
use skyfury_core::events::GameEvent;
use skyfury_core::types::{EntityId, Position, Rect};

use skyfury_enemy_ai::boss::is_invulnerable;
use skyfury_enemy_ai::profiles::{get_boss_profile, get_profile};

use crate::context::SimContext;
use crate::systems::{particles, pickups};

/// Axis-aligned overlap test between two boxes.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// A live entity with a usable bounding box.
#[derive(Debug, Clone, Copy)]
struct Collider {
    entity: Entity,
    id: EntityId,
    kind: EntityKind,
    rect: Rect,
}

/// Run all collision passes for this frame.
pub fn run(ctx: &mut SimContext, dt: f64) {
    let colliders = gather(ctx);

    let player = colliders.iter().find(|c| c.kind == EntityKind::Player).copied();
    let hostiles: Vec<Collider> = colliders
        .iter()
        .filter(|c| matches!(c.kind, EntityKind::Enemy | EntityKind::Boss))
        .copied()
        .collect();
    let (player_shots, enemy_shots) = split_projectiles(ctx, &colliders);
    let pickups: Vec<Collider> = colliders
        .iter()
        .filter(|c| c.kind == EntityKind::Pickup)
        .copied()
        .collect();

    if let Some(player) = player {
        player_vs_enemy_shots(ctx, &player, &enemy_shots);
    }
    hostiles_vs_player_shots(ctx, &hostiles, &player_shots, dt);
    if let Some(player) = player {
        player_vs_hostiles(ctx, &player, &hostiles);
        player_vs_pickups(ctx, &player, &pickups);
    }
}

/// Live colliders sorted by spawn order. Entities without a valid box are
/// skipped for this frame.
fn gather(ctx: &SimContext) -> Vec<Collider> {
    let mut colliders = Vec::new();
    let mut query = ctx
        .world
        .query::<(&Lifecycle, Option<&Position>, Option<&Hitbox>)>();
    for (entity, (life, pos, hitbox)) in query.iter() {
        if !life.alive || life.kind == EntityKind::Particle {
            continue;
        }
        let (Some(pos), Some(hitbox)) = (pos, hitbox) else {
            log::warn!("{:?} {} has no bounding box; skipped", life.kind, life.id);
            continue;
        };
        let rect = Rect::from_center(*pos, hitbox.width, hitbox.height);
        if !rect.is_valid() {
            log::warn!("{:?} {} has a malformed bounding box; skipped", life.kind, life.id);
            continue;
        }
        colliders.push(Collider {
            entity,
            id: life.id,
            kind: life.kind,
            rect,
        });
    }
    colliders.sort_by_key(|c| c.id);
    colliders
}

fn split_projectiles(ctx: &SimContext, colliders: &[Collider]) -> (Vec<Collider>, Vec<Collider>) {
    let mut player_shots = Vec::new();
    let mut enemy_shots = Vec::new();
    for collider in colliders.iter().filter(|c| c.kind == EntityKind::Projectile) {
        let Ok(projectile) = ctx.world.get::<&Projectile>(collider.entity) else {
            continue;
        };
        match projectile.faction {
            Faction::Player => player_shots.push(*collider),
            Faction::Enemy => enemy_shots.push(*collider),
        }
    }
    (player_shots, enemy_shots)
}

fn is_live(ctx: &SimContext, collider: &Collider) -> bool {
    ctx.world
        .get::<&Lifecycle>(collider.entity)
        .map(|life| life.alive)
        .unwrap_or(false)
}

fn kill(ctx: &mut SimContext, entity: Entity) {
    if let Ok(mut life) = ctx.world.get::<&mut Lifecycle>(entity) {
        life.alive = false;
    }
}

/// How an incoming hit on the player resolved.
enum PlayerHit {
    Shielded,
    Ignored,
    Damaged { remaining: f64 },
}

/// Apply a hit to the player, honoring shield and invulnerability.
fn hit_player(ctx: &mut SimContext, player: &Collider, damage: f64, shield_cost: f64) -> PlayerHit {
    let Ok((life, health, aircraft, loadout)) = ctx.world.query_one_mut::<(
        &mut Lifecycle,
        &mut Health,
        &mut Aircraft,
        Option<&mut Loadout>,
    )>(player.entity) else {
        return PlayerHit::Ignored;
    };

    if aircraft.shield_secs > 0.0 {
        if let Some(loadout) = loadout {
            loadout.shield_energy = (loadout.shield_energy - shield_cost).max(0.0);
            if loadout.shield_energy <= 0.0 {
                aircraft.shield_secs = 0.0;
            }
        }
        return PlayerHit::Shielded;
    }
    if aircraft.invulnerable_secs > 0.0 {
        return PlayerHit::Ignored;
    }

    health.current = (health.current - damage).max(0.0);
    aircraft.invulnerable_secs = HIT_INVULNERABILITY_SECS;
    if health.current <= 0.0 {
        life.alive = false;
    }
    PlayerHit::Damaged {
        remaining: health.current,
    }
}

/// Emit the feedback for a resolved player hit.
fn player_hit_feedback(
    ctx: &mut SimContext,
    player: &Collider,
    source: EntityId,
    damage: f64,
    at: Position,
    hit: PlayerHit,
) {
    match hit {
        PlayerHit::Shielded => {
            let remaining = ctx
                .world
                .get::<&Health>(player.entity)
                .map(|h| h.current)
                .unwrap_or(0.0);
            ctx.emit(GameEvent::Damage {
                target: player.id,
                source,
                amount: 0.0,
                remaining,
                shielded: true,
            });
            ctx.sound(SoundCue::ShieldHit);
            particles::spawn_effect(ctx, ParticleEffect::ShieldHit, at);
        }
        PlayerHit::Damaged { remaining } => {
            ctx.emit(GameEvent::Damage {
                target: player.id,
                source,
                amount: damage,
                remaining,
                shielded: false,
            });
            ctx.sound(SoundCue::Hit);
            particles::spawn_effect(ctx, ParticleEffect::HitSpark, at);
        }
        PlayerHit::Ignored => {}
    }
}

fn player_vs_enemy_shots(ctx: &mut SimContext, player: &Collider, shots: &[Collider]) {
    for shot in shots {
        if !is_live(ctx, player) {
            return;
        }
        if !is_live(ctx, shot) || !overlaps(&player.rect, &shot.rect) {
            continue;
        }
        let damage = ctx
            .world
            .get::<&Projectile>(shot.entity)
            .map(|p| p.damage)
            .unwrap_or(0.0);

        // Consumed whether or not it hurts.
        kill(ctx, shot.entity);
        let hit = hit_player(ctx, player, damage, SHIELD_PROJECTILE_COST);
        player_hit_feedback(ctx, player, shot.id, damage, shot.rect.center(), hit);
    }
}

fn hostiles_vs_player_shots(
    ctx: &mut SimContext,
    hostiles: &[Collider],
    shots: &[Collider],
    dt: f64,
) {
    for shot in shots {
        if !is_live(ctx, shot) {
            continue;
        }
        let Ok(projectile) = ctx.world.get::<&Projectile>(shot.entity).map(|p| (*p).clone()) else {
            continue;
        };

        if projectile.piercing {
            // Beam damage is a rate; every overlapping hostile takes its share.
            let amount = projectile.damage * dt;
            if amount <= 0.0 {
                continue;
            }
            for hostile in hostiles {
                if is_live(ctx, hostile) && overlaps(&shot.rect, &hostile.rect) {
                    damage_hostile(ctx, hostile, shot.id, projectile.owner, amount);
                }
            }
            continue;
        }

        let Some(hostile) = hostiles
            .iter()
            .find(|h| is_live(ctx, h) && overlaps(&shot.rect, &h.rect))
        else {
            continue;
        };
        kill(ctx, shot.entity);
        if damage_hostile(ctx, hostile, shot.id, projectile.owner, projectile.damage) {
            ctx.sound(SoundCue::Hit);
            particles::spawn_effect(ctx, ParticleEffect::HitSpark, shot.rect.center());
        }
    }
}

/// Damage an enemy or boss. Returns whether any damage was dealt.
fn damage_hostile(
    ctx: &mut SimContext,
    hostile: &Collider,
    source: EntityId,
    owner: Option<EntityId>,
    amount: f64,
) -> bool {
    let Ok((life, health, enemy, boss)) = ctx.world.query_one_mut::<(
        &mut Lifecycle,
        &mut Health,
        Option<&mut EnemyBrain>,
        Option<&mut BossBrain>,
    )>(hostile.entity) else {
        return false;
    };

    if let Some(boss) = &boss {
        if is_invulnerable(boss.phase, boss.transition_secs) {
            return false;
        }
    }

    health.current = (health.current - amount).max(0.0);
    let remaining = health.current;
    let mut bounty = None;
    if remaining <= 0.0 {
        life.alive = false;
        if let Some(enemy) = enemy {
            enemy.state = EnemyState::Dead;
            bounty = Some(get_profile(enemy.archetype).score);
        }
        if let Some(boss) = boss {
            boss.phase = BossPhase::Dead;
            bounty = Some(get_boss_profile(boss.archetype).score);
        }
    }

    ctx.emit(GameEvent::Damage {
        target: hostile.id,
        source,
        amount,
        remaining,
        shielded: false,
    });

    if let Some(points) = bounty {
        // Only an owner that still exists gets the credit.
        if owner.and_then(|id| ctx.resolve(id)).is_some() {
            ctx.session.add_score(points);
            ctx.session.kills += 1;
        }
        log::debug!("{:?} {} destroyed by {}", hostile.kind, hostile.id, source);
    }
    true
}

fn player_vs_hostiles(ctx: &mut SimContext, player: &Collider, hostiles: &[Collider]) {
    for hostile in hostiles {
        if !is_live(ctx, player) {
            return;
        }
        if !is_live(ctx, hostile) || !overlaps(&player.rect, &hostile.rect) {
            continue;
        }

        let (damage, shield_cost) = match hostile.kind {
            EntityKind::Boss => (BOSS_CONTACT_DAMAGE, BOSS_CONTACT_DAMAGE),
            _ => {
                let contact = ctx
                    .world
                    .get::<&EnemyBrain>(hostile.entity)
                    .map(|b| get_profile(b.archetype).contact_damage)
                    .unwrap_or(RAM_DAMAGE);
                (contact, SHIELD_CONTACT_COST)
            }
        };

        let hit = hit_player(ctx, player, damage, shield_cost);
        player_hit_feedback(ctx, player, hostile.id, damage, player.rect.center(), hit);

        if hostile.kind == EntityKind::Enemy {
            damage_hostile(ctx, hostile, player.id, Some(player.id), RAM_DAMAGE);
        }
    }
}

fn player_vs_pickups(ctx: &mut SimContext, player: &Collider, pickups: &[Collider]) {
    for pickup in pickups {
        if !is_live(ctx, player) {
            return;
        }
        if !is_live(ctx, pickup) || !overlaps(&player.rect, &pickup.rect) {
            continue;
        }
        let Ok(kind) = ctx.world.get::<&Pickup>(pickup.entity).map(|p| p.kind) else {
            continue;
        };

        kill(ctx, pickup.entity);
        let text = pickups::apply(ctx, player.entity, kind);
        ctx.emit(GameEvent::PickupCollected {
            id: pickup.id,
            kind,
        });
        ctx.sound(SoundCue::Powerup);
        particles::spawn_effect(ctx, ParticleEffect::PickupCollect, pickup.rect.center());
        if !text.is_empty() {
            ctx.message(text, MESSAGE_SHORT_SECS);
        }
    }
}
