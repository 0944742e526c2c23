//! Sprite loading with drawn placeholders for anything missing.
//!
//! Only image dimensions are decoded; pixels belong to whichever frontend
//! draws the snapshot. A missing or undecodable file is never fatal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use skyfury_core::constants::*;
use skyfury_core::enums::{BossArchetype, EnemyArchetype, PickupKind, ProjectileKind};
use skyfury_enemy_ai::profiles::get_boss_profile;

use crate::error::AssetError;

/// Subdirectory of the asset root holding sprite images.
const IMAGE_DIR: &str = "images";

/// A loaded sprite, or the primitive drawn in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Image { width: u32, height: u32 },
    Placeholder { width: u32, height: u32, color: [u8; 3] },
}

impl Sprite {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Sprite::Placeholder { .. })
    }

    pub fn size(&self) -> (u32, u32) {
        match *self {
            Sprite::Image { width, height } | Sprite::Placeholder { width, height, .. } => {
                (width, height)
            }
        }
    }
}

/// Everything the game draws with a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    PlayerGearUp,
    PlayerGearDown,
    PlayerCrashed,
    Enemy(EnemyArchetype),
    Boss(BossArchetype),
    Projectile(ProjectileKind),
    Pickup(PickupKind),
    Airport,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 21] = [
        SpriteKey::PlayerGearUp,
        SpriteKey::PlayerGearDown,
        SpriteKey::PlayerCrashed,
        SpriteKey::Enemy(EnemyArchetype::Drone),
        SpriteKey::Enemy(EnemyArchetype::Bomber),
        SpriteKey::Enemy(EnemyArchetype::Gunship),
        SpriteKey::Enemy(EnemyArchetype::Elite),
        SpriteKey::Enemy(EnemyArchetype::Kamikaze),
        SpriteKey::Boss(BossArchetype::HiveQueen),
        SpriteKey::Boss(BossArchetype::AegisDefender),
        SpriteKey::Boss(BossArchetype::FinalDestroyer),
        SpriteKey::Projectile(ProjectileKind::Bullet),
        SpriteKey::Projectile(ProjectileKind::HomingMissile),
        SpriteKey::Projectile(ProjectileKind::PlasmaLaser),
        SpriteKey::Projectile(ProjectileKind::EnemyShot),
        SpriteKey::Pickup(PickupKind::Health),
        SpriteKey::Pickup(PickupKind::WeaponUpgrade),
        SpriteKey::Pickup(PickupKind::Missiles),
        SpriteKey::Pickup(PickupKind::Shield),
        SpriteKey::Pickup(PickupKind::Score),
        SpriteKey::Airport,
    ];

    /// Image file name under `<asset root>/images`.
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKey::PlayerGearUp => "plane_gear_up.png",
            SpriteKey::PlayerGearDown => "plane_gear_down.png",
            SpriteKey::PlayerCrashed => "crash.png",
            SpriteKey::Enemy(EnemyArchetype::Drone | EnemyArchetype::Kamikaze) => "enemy-1.png",
            SpriteKey::Enemy(EnemyArchetype::Bomber) => "enemy-2.png",
            SpriteKey::Enemy(EnemyArchetype::Gunship) => "enemy-3.png",
            SpriteKey::Enemy(EnemyArchetype::Elite) => "enemy-4.png",
            SpriteKey::Boss(BossArchetype::HiveQueen) => "enemy-2.png",
            SpriteKey::Boss(BossArchetype::AegisDefender) => "enemy-3.png",
            SpriteKey::Boss(BossArchetype::FinalDestroyer) => "enemy-4.png",
            SpriteKey::Projectile(ProjectileKind::Bullet | ProjectileKind::PlasmaLaser) => {
                "laserGreen.png"
            }
            SpriteKey::Projectile(ProjectileKind::HomingMissile | ProjectileKind::EnemyShot) => {
                "laserRed.png"
            }
            SpriteKey::Pickup(PickupKind::Health) => "shield.png",
            SpriteKey::Pickup(PickupKind::WeaponUpgrade) => "laserGreen.png",
            SpriteKey::Pickup(PickupKind::Missiles) => "laserRed.png",
            SpriteKey::Pickup(PickupKind::Shield) => "shield2.png",
            SpriteKey::Pickup(PickupKind::Score) => "destruction.png",
            SpriteKey::Airport => "airport.png",
        }
    }

    /// Primitive drawn when the image is unavailable.
    pub fn placeholder(self) -> Sprite {
        let (width, height, color) = match self {
            SpriteKey::PlayerGearUp | SpriteKey::PlayerCrashed => {
                (PLAYER_WIDTH, PLAYER_HEIGHT, [0, 150, 255])
            }
            SpriteKey::PlayerGearDown => (PLAYER_WIDTH, PLAYER_HEIGHT * 1.1, [0, 150, 255]),
            SpriteKey::Enemy(archetype) => {
                let color = match archetype {
                    EnemyArchetype::Drone => [255, 100, 100],
                    EnemyArchetype::Bomber => [100, 100, 255],
                    EnemyArchetype::Gunship => [100, 255, 100],
                    EnemyArchetype::Elite => [255, 100, 255],
                    EnemyArchetype::Kamikaze => [255, 50, 50],
                };
                let size = if archetype == EnemyArchetype::Kamikaze {
                    KAMIKAZE_SIZE
                } else {
                    ENEMY_SIZE
                };
                (size, size, color)
            }
            SpriteKey::Boss(archetype) => {
                let size = get_boss_profile(archetype).size;
                (size, size, [180, 40, 40])
            }
            SpriteKey::Projectile(ProjectileKind::Bullet) => (BULLET_SIZE, BULLET_SIZE, [255, 255, 0]),
            SpriteKey::Projectile(ProjectileKind::HomingMissile) => {
                (MISSILE_SIZE, MISSILE_SIZE, [255, 140, 0])
            }
            SpriteKey::Projectile(ProjectileKind::PlasmaLaser) => {
                (SCREEN_WIDTH, LASER_BASE_WIDTH, [0, 255, 120])
            }
            SpriteKey::Projectile(ProjectileKind::EnemyShot) => {
                (ENEMY_SHOT_SIZE, ENEMY_SHOT_SIZE, [255, 60, 60])
            }
            SpriteKey::Pickup(kind) => {
                let color = match kind {
                    PickupKind::Health => [0, 255, 0],
                    PickupKind::WeaponUpgrade => [255, 255, 0],
                    PickupKind::Missiles => [255, 100, 0],
                    PickupKind::Shield => [100, 150, 255],
                    PickupKind::Score => [255, 215, 0],
                };
                (PICKUP_SIZE, PICKUP_SIZE, color)
            }
            SpriteKey::Airport => (RUNWAY_X_END - RUNWAY_X_START, 40.0, [90, 90, 90]),
        };
        Sprite::Placeholder {
            width: width.round() as u32,
            height: height.round() as u32,
            color,
        }
    }
}

/// Loads sprites from an asset root and caches them by path.
#[derive(Debug)]
pub struct AssetLoader {
    root: PathBuf,
    cache: HashMap<PathBuf, Sprite>,
}

impl AssetLoader {
    /// A loader reading from `root`. A missing root only means every
    /// sprite is a placeholder; a root that exists but cannot be listed is an error.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        if root.exists() {
            if !root.is_dir() {
                return Err(AssetError::NotADirectory(root));
            }
            std::fs::read_dir(&root).map_err(|source| AssetError::Unreadable {
                path: root.clone(),
                source,
            })?;
        } else {
            log::warn!(
                "Asset root {} not found; drawing placeholders",
                root.display()
            );
        }
        Ok(Self {
            root,
            cache: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the image at `path` (relative to the asset root), falling back
    /// to `fallback` when it is missing or cannot be decoded.
    pub fn load_sprite(&mut self, path: impl AsRef<Path>, fallback: Sprite) -> Sprite {
        let full = self.root.join(path.as_ref());
        if let Some(sprite) = self.cache.get(&full) {
            return sprite.clone();
        }

        let sprite = match image::image_dimensions(&full) {
            Ok((width, height)) => {
                log::debug!("Loaded {} ({width}x{height})", full.display());
                Sprite::Image { width, height }
            }
            Err(err) => {
                log::warn!("Could not load {}: {err}; using placeholder", full.display());
                fallback
            }
        };
        self.cache.insert(full, sprite.clone());
        sprite
    }

    /// Sprite for `key` through the manifest.
    pub fn sprite(&mut self, key: SpriteKey) -> Sprite {
        let path = Path::new(IMAGE_DIR).join(key.file_name());
        self.load_sprite(path, key.placeholder())
    }

    /// Load every sprite in the manifest. Returns how many are placeholders.
    pub fn preload(&mut self) -> usize {
        let placeholders = SpriteKey::ALL
            .iter()
            .filter(|key| self.sprite(**key).is_placeholder())
            .count();
        log::info!(
            "Loaded {} sprites from {} ({placeholders} placeholders)",
            SpriteKey::ALL.len(),
            self.root.display()
        );
        placeholders
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let images = dir.join(IMAGE_DIR);
        std::fs::create_dir_all(&images).unwrap();
        image::RgbaImage::new(width, height)
            .save(images.join(name))
            .unwrap();
    }

    #[test]
    fn test_missing_file_gives_placeholder() {
        let dir = TempDir::new().unwrap();
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        let sprite = loader.sprite(SpriteKey::Enemy(EnemyArchetype::Drone));
        assert_eq!(
            sprite,
            Sprite::Placeholder {
                width: 80,
                height: 80,
                color: [255, 100, 100]
            }
        );
    }

    #[test]
    fn test_existing_file_reports_dimensions() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "enemy-4.png", 12, 7);
        let mut loader = AssetLoader::new(dir.path()).unwrap();

        let sprite = loader.sprite(SpriteKey::Enemy(EnemyArchetype::Elite));
        assert_eq!(sprite, Sprite::Image { width: 12, height: 7 });
        assert_eq!(sprite.size(), (12, 7));
    }

    #[test]
    fn test_undecodable_file_gives_placeholder() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join(IMAGE_DIR);
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("shield.png"), b"not a png").unwrap();

        let mut loader = AssetLoader::new(dir.path()).unwrap();
        assert!(loader.sprite(SpriteKey::Pickup(PickupKind::Health)).is_placeholder());
    }

    #[test]
    fn test_sprites_are_cached_per_path() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "enemy-1.png", 4, 4);
        let mut loader = AssetLoader::new(dir.path()).unwrap();

        loader.sprite(SpriteKey::Enemy(EnemyArchetype::Drone));
        loader.sprite(SpriteKey::Enemy(EnemyArchetype::Kamikaze));
        assert_eq!(loader.cached(), 1, "Drone and kamikaze share a file");
    }

    #[test]
    fn test_preload_counts_placeholders() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "plane_gear_up.png", 160, 90);
        let mut loader = AssetLoader::new(dir.path()).unwrap();
        assert_eq!(loader.preload(), SpriteKey::ALL.len() - 1);
    }

    #[test]
    fn test_missing_root_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut loader = AssetLoader::new(dir.path().join("nowhere")).unwrap();
        assert!(loader.sprite(SpriteKey::Airport).is_placeholder());
    }

    #[test]
    fn test_file_as_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("assets.txt");
        std::fs::write(&file, b"").unwrap();
        assert!(matches!(
            AssetLoader::new(&file),
            Err(AssetError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_boss_placeholder_matches_hitbox() {
        let sprite = SpriteKey::Boss(BossArchetype::HiveQueen).placeholder();
        assert_eq!(sprite.size(), (300, 300));
    }
}
