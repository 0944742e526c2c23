//! Per-session simulation state threaded explicitly through every system.

use std::collections::HashMap;

use hecs::{Entity, EntityBuilder, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyfury_core::components::{Lifecycle, Player};
use skyfury_core::constants::PLAYER_START_LIVES;
use skyfury_core::enums::{EntityKind, SoundCue};
use skyfury_core::events::{AudioEvent, GameEvent, HudMessage};
use skyfury_core::types::{EntityId, Position, SimTime};

/// Score and lives for the current game.
#[derive(Debug, Clone)]
pub struct Session {
    pub score: u64,
    /// Best score seen by this process. Not persisted.
    pub high_score: u64,
    pub lives: u32,
    pub kills: u32,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            high_score: 0,
            lives,
            kills: 0,
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Reset for a new game, keeping the high score.
    pub fn restart(&mut self, lives: u32) {
        self.score = 0;
        self.lives = lives;
        self.kills = 0;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PLAYER_START_LIVES)
    }
}

/// Everything a system may read or mutate during a frame.
///
/// Entities are addressed by [`EntityId`]; the id index maps them to hecs
/// handles and forgets them on despawn, so a stale id simply fails to resolve.
pub struct SimContext {
    pub world: World,
    pub rng: ChaCha8Rng,
    pub time: SimTime,
    pub session: Session,
    pub events: Vec<GameEvent>,
    pub audio: Vec<AudioEvent>,
    pub messages: Vec<HudMessage>,
    next_id: u64,
    index: HashMap<EntityId, Entity>,
}

impl SimContext {
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            time: SimTime::default(),
            session: Session::default(),
            events: Vec::new(),
            audio: Vec::new(),
            messages: Vec::new(),
            next_id: 1,
            index: HashMap::new(),
        }
    }

    /// Spawn an entity, tagging it with a fresh id and a live [`Lifecycle`].
    pub fn spawn(&mut self, kind: EntityKind, builder: &mut EntityBuilder) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        builder.add(Lifecycle {
            id,
            kind,
            alive: true,
        });
        let entity = self.world.spawn(builder.build());
        self.index.insert(id, entity);
        id
    }

    /// Resolve an id to its hecs handle, if the entity still exists.
    pub fn resolve(&self, id: EntityId) -> Option<Entity> {
        self.index
            .get(&id)
            .copied()
            .filter(|entity| self.world.contains(*entity))
    }

    /// Whether the id resolves to an entity that has not been killed this frame.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.resolve(id)
            .and_then(|entity| self.world.get::<&Lifecycle>(entity).ok().map(|l| l.alive))
            .unwrap_or(false)
    }

    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.index.remove(&id) {
            let _ = self.world.despawn(entity);
        }
    }

    /// Remove every entity. Ids are never reused.
    pub fn clear_world(&mut self) {
        self.world.clear();
        self.index.clear();
    }

    /// The player's handle, if the player is on the field and alive.
    pub fn player(&self) -> Option<Entity> {
        self.world
            .query::<(&Player, &Lifecycle)>()
            .iter()
            .find(|(_, (_, life))| life.alive)
            .map(|(entity, _)| entity)
    }

    pub fn player_position(&self) -> Option<Position> {
        let entity = self.player()?;
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.audio.push(AudioEvent::PlaySound { cue });
    }

    pub fn message(&mut self, text: impl Into<String>, duration_secs: f64) {
        self.messages.push(HudMessage {
            text: text.into(),
            duration_secs,
            frame: self.time.frame,
        });
    }
}
