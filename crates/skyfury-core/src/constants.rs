//! Simulation constants and tuning parameters.
//!
//! Rates are per second. Values tuned per 60 Hz frame are
//! expressed as `per_frame * REFERENCE_FPS`.

/// Frame rate the tuning values were authored against.
pub const REFERENCE_FPS: f64 = 60.0;

/// Largest delta time accepted by a single step (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

/// Default frame-rate cap for the runner.
pub const DEFAULT_FPS: u32 = 60;

// --- Play field ---

pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

/// Projectiles further than this outside the screen are culled.
pub const PROJECTILE_CULL_MARGIN: f64 = 50.0;

/// Enemies and pickups are culled once their x drops below `-OFFSCREEN_LEFT_MARGIN`.
pub const OFFSCREEN_LEFT_MARGIN: f64 = 100.0;

/// x coordinate new enemies enter at.
pub const ENEMY_SPAWN_X: f64 = 850.0;

// --- Aircraft ---

pub const PLAYER_WIDTH: f64 = 160.0;
pub const PLAYER_HEIGHT: f64 = 90.0;
pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_MAX_FUEL: f64 = 100.0;
pub const PLAYER_START_LIVES: u32 = 3;

pub const PLAYER_START_X: f64 = 100.0;
pub const GROUND_LEVEL: f64 = 500.0;
pub const RUNWAY_X_START: f64 = 50.0;
pub const RUNWAY_X_END: f64 = 300.0;

/// Downward acceleration while airborne (px/s²).
pub const GRAVITY: f64 = 18.0;
/// Top horizontal speed (px/s).
pub const AIRCRAFT_MAX_SPEED: f64 = 600.0;
/// Ground acceleration per percent of thrust (px/s² per %).
pub const GROUND_ACCEL_PER_THRUST: f64 = 15.0;
/// Airborne acceleration per percent of thrust (px/s² per %).
pub const AIR_ACCEL_PER_THRUST: f64 = 7.5;
/// Lift per unit of sin(pitch) per px/s of forward speed (1/s).
pub const LIFT_FACTOR: f64 = 4.8;
/// Per-reference-frame multiplicative drag.
pub const GROUND_DRAG: f64 = 0.97;
pub const BRAKE_DRAG: f64 = 0.95;
pub const AIR_DRAG_X: f64 = 0.97;
pub const AIR_DRAG_Y: f64 = 0.99;
/// Airborne vertical speed limit (px/s).
pub const MAX_VERTICAL_SPEED: f64 = 300.0;

/// Throttle change while the throttle/brake keys are held (% per second).
pub const THRUST_RATE: f64 = 300.0;
/// Throttle decay on the runway while the throttle key is released (% per second).
pub const THRUST_DECAY_RATE: f64 = 60.0;
/// Pitch lerp rate toward the takeoff target (1/s).
pub const TAKEOFF_PITCH_RATE: f64 = 2.5;
/// Target pitch at the end of the rotation ramp (degrees).
pub const TAKEOFF_TARGET_PITCH: f64 = 18.0;
/// The rotation ramp runs between these x coordinates.
pub const ROTATION_RAMP_START_X: f64 = 180.0;
pub const ROTATION_RAMP_END_X: f64 = 300.0;
/// Pitch bleed while braking (degrees per second).
pub const BRAKE_PITCH_RATE: f64 = 20.0;
/// Pitch change from up/down while climbing out (degrees per second).
pub const CLIMB_PITCH_RATE: f64 = 30.0;

pub const TAKEOFF_MIN_X: f64 = 240.0;
pub const TAKEOFF_MIN_SPEED: f64 = 210.0;
pub const TAKEOFF_MIN_PITCH: f64 = 15.0;
/// Vertical speed at rotation (px/s, negative is up).
pub const TAKEOFF_CLIMB_SPEED: f64 = -132.0;

pub const GROUND_PITCH_MIN: f64 = 0.0;
pub const GROUND_PITCH_MAX: f64 = 25.0;
pub const AIR_PITCH_MIN: f64 = -10.0;
pub const AIR_PITCH_MAX: f64 = 30.0;

pub const MAX_LANDING_SPEED: f64 = 180.0;
pub const MAX_LANDING_PITCH: f64 = 15.0;

/// Fuel burned per percent of thrust per second.
pub const FUEL_BURN_RATE: f64 = 0.005;

/// Seconds of climb-out before arcade combat control takes over.
pub const CLIMBOUT_DURATION_SECS: f64 = 1.5;
/// Duration of the glide into the combat position.
pub const COMBAT_TRANSITION_SECS: f64 = 1.5;
pub const COMBAT_ANCHOR_X: f64 = 150.0;
pub const COMBAT_ANCHOR_Y: f64 = 300.0;
/// Glide lerp rate toward the combat anchor (1/s).
pub const COMBAT_TRANSITION_RATE: f64 = 3.0;
/// Arcade movement speed (px/s).
pub const COMBAT_MOVE_SPEED: f64 = 300.0;
pub const COMBAT_MIN_X: f64 = 50.0;
pub const COMBAT_MAX_X: f64 = 250.0;
pub const FIELD_MIN_Y: f64 = 20.0;
pub const FIELD_MAX_Y: f64 = 580.0;
pub const TAKEOFF_MIN_FIELD_X: f64 = 20.0;
pub const TAKEOFF_MAX_FIELD_X: f64 = 780.0;

/// Invulnerability after taking a hit.
pub const HIT_INVULNERABILITY_SECS: f64 = 0.2;
/// Invulnerability after respawning.
pub const RESPAWN_INVULNERABILITY_SECS: f64 = 2.0;

// --- Weapons ---

pub const PRIMARY_COOLDOWN_SECS: f64 = 0.15;
pub const MISSILE_COOLDOWN_SECS: f64 = 1.5;
pub const LASER_COOLDOWN_SECS: f64 = 3.0;
pub const SHIELD_COOLDOWN_SECS: f64 = 8.0;

pub const PRIMARY_MAX_LEVEL: u8 = 3;
pub const BULLET_SPEED: f64 = 900.0;
pub const BULLET_DAMAGE: f64 = 15.0;
pub const BULLET_SIZE: f64 = 8.0;
pub const BULLET_LIFETIME_SECS: f64 = 3.0;
/// Vertical offset of the twin guns at level 2.
pub const TWIN_GUN_OFFSET: f64 = 10.0;
/// Spread angle of the outer guns at level 3 (degrees).
pub const SPREAD_ANGLE_DEG: f64 = 15.0;

pub const MISSILE_START_AMMO: u32 = 5;
pub const MISSILE_MAX_AMMO: u32 = 10;
pub const MISSILE_SPEED: f64 = 720.0;
pub const MISSILE_DAMAGE: f64 = 40.0;
pub const MISSILE_SIZE: f64 = 12.0;
pub const MISSILE_LIFETIME_SECS: f64 = 6.0;
/// Homing turn rate (degrees per second).
pub const MISSILE_TURN_RATE_DEG: f64 = 180.0;

pub const LASER_MAX_CHARGE: f64 = 100.0;
pub const LASER_MIN_FIRE_CHARGE: f64 = 30.0;
/// Charge gained per second while the charge button is held.
pub const LASER_CHARGE_RATE: f64 = 40.0;
/// Passive charge regeneration per second.
pub const LASER_REGEN_RATE: f64 = 5.0;
pub const LASER_LIFETIME_SECS: f64 = 0.6;
/// Beam damage per second per point of charge.
pub const LASER_DPS_PER_CHARGE: f64 = 0.96;
pub const LASER_BASE_WIDTH: f64 = 10.0;
pub const LASER_WIDTH_PER_CHARGE: f64 = 0.15;
/// Right end of the beam.
pub const LASER_END_X: f64 = 850.0;

pub const SHIELD_MAX_ENERGY: f64 = 100.0;
pub const SHIELD_START_ENERGY: f64 = 50.0;
pub const SHIELD_ACTIVATION_COST: f64 = 40.0;
pub const SHIELD_DURATION_SECS: f64 = 5.0;
/// Energy regeneration while the shield is down, and drain while it is up (per second).
pub const SHIELD_ENERGY_RATE: f64 = 3.0;
/// Shield energy lost when a projectile strikes the shield.
pub const SHIELD_PROJECTILE_COST: f64 = 8.0;
/// Shield energy lost when an enemy rams the shield.
pub const SHIELD_CONTACT_COST: f64 = 15.0;

pub const ENEMY_SHOT_SIZE: f64 = 14.0;
pub const ENEMY_SHOT_DAMAGE: f64 = 10.0;
pub const ENEMY_SHOT_LIFETIME_SECS: f64 = 10.0;

// --- Enemies ---

pub const ENEMY_SIZE: f64 = 80.0;
pub const KAMIKAZE_SIZE: f64 = 70.0;
/// Damage an enemy takes when it rams the player.
pub const RAM_DAMAGE: f64 = 25.0;
/// Contact damage dealt by a boss.
pub const BOSS_CONTACT_DAMAGE: f64 = 20.0;
/// Enemies only fire while inside this x band.
pub const ENEMY_FIRE_MIN_X: f64 = 50.0;
pub const ENEMY_FIRE_MAX_X: f64 = 750.0;

// --- Bosses ---

pub const BOSS_ENTRY_X: f64 = 900.0;
pub const BOSS_STATION_X: f64 = 650.0;
pub const BOSS_ENTRY_SPEED: f64 = 180.0;
pub const BOSS_CENTER_Y: f64 = 300.0;
pub const BOSS_SWAY_AMPLITUDE: f64 = 100.0;
/// Angular rate of the vertical sway (rad/s).
pub const BOSS_SWAY_RATE: f64 = 0.5;
pub const BOSS_MIN_Y: f64 = 100.0;
pub const BOSS_MAX_Y: f64 = 500.0;
pub const BOSS_PHASE_TWO_FRACTION: f64 = 0.66;
pub const BOSS_PHASE_THREE_FRACTION: f64 = 0.33;
pub const BOSS_TRANSITION_SECS: f64 = 2.0;
/// Vertical follow rate toward the sway target (1/s).
pub const BOSS_FOLLOW_RATE: f64 = 3.0;

// --- Pickups ---

pub const PICKUP_SIZE: f64 = 25.0;
pub const PICKUP_LIFETIME_SECS: f64 = 8.0;
pub const PICKUP_DRIFT_SPEED: f64 = -60.0;
/// Probability that a destroyed regular enemy drops a pickup.
pub const PICKUP_DROP_CHANCE: f64 = 0.3;
pub const BOSS_DROP_MIN: u32 = 3;
pub const BOSS_DROP_MAX: u32 = 5;
pub const BOSS_DROP_SCATTER: f64 = 50.0;
pub const PICKUP_HEAL_AMOUNT: f64 = 30.0;
pub const PICKUP_MISSILE_AMOUNT: u32 = 3;
/// Points awarded for a weapon upgrade collected at max level.
pub const MAXED_UPGRADE_BONUS: u64 = 500;
pub const SCORE_PICKUP_VALUES: [u64; 3] = [500, 1000, 2000];

// --- Particles ---

/// Hard cap on live particles; bursts beyond the cap are truncated.
pub const MAX_PARTICLES: usize = 2000;

// --- Levels ---

pub const LEVEL_COUNT: u32 = 3;
/// Seconds between a boss kill and the next level starting.
pub const LEVEL_INTERMISSION_SECS: f64 = 2.0;
/// Spawn interval used when a wave does not specify one.
pub const DEFAULT_SPAWN_INTERVAL_SECS: f64 = 0.8;

// --- HUD ---

pub const MESSAGE_SHORT_SECS: f64 = 1.5;
pub const MESSAGE_LONG_SECS: f64 = 3.0;
