//! Sprite manifest mapping art groups and sprite keys to image paths.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use farm_defence_core::{ArtGroup, SpriteCatalog, SpriteKey};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

const ALL_ART_GROUPS: [ArtGroup; 6] = [
    ArtGroup::Magpie,
    ArtGroup::Eagle,
    ArtGroup::Pigeon,
    ArtGroup::Bee,
    ArtGroup::Hive,
    ArtGroup::Scarecrow,
];

const ALL_SPRITE_KEYS: [SpriteKey; 5] = [
    SpriteKey::Default,
    SpriteKey::Up,
    SpriteKey::Down,
    SpriteKey::Left,
    SpriteKey::Right,
];

/// Image paths keyed by art group and sprite key.
#[derive(Debug, Default)]
pub(crate) struct SpriteManifest {
    paths: HashMap<(ArtGroup, SpriteKey), PathBuf>,
}

impl SpriteManifest {
    /// Loads a manifest, resolving image paths relative to its directory.
    pub(crate) fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        parse_manifest(&contents, &base)
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }
}

impl SpriteCatalog for SpriteManifest {
    type Handle = PathBuf;

    fn sprite(&self, art: ArtGroup, key: SpriteKey) -> Option<&PathBuf> {
        self.paths.get(&(art, key))
    }
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<SpriteManifest> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut paths = HashMap::with_capacity(manifest.sprites.len());
    for (name, relative_path) in manifest.sprites {
        let entry = parse_entry_name(&name)
            .with_context(|| format!("unknown sprite entry `{name}` in manifest"))?;
        if paths.insert(entry, base_path.join(relative_path)).is_some() {
            bail!("sprite manifest contains duplicate entry for `{name}`");
        }
    }
    Ok(SpriteManifest { paths })
}

fn parse_entry_name(name: &str) -> Result<(ArtGroup, SpriteKey)> {
    let Some((art, key)) = name.split_once('.') else {
        bail!("sprite entry `{name}` must look like `art.key`");
    };
    let Some(art) = ALL_ART_GROUPS.into_iter().find(|group| group.as_str() == art) else {
        bail!("unknown art group `{art}`");
    };
    let Some(key) = ALL_SPRITE_KEYS.into_iter().find(|sprite| sprite.as_str() == key) else {
        bail!("unknown sprite key `{key}`");
    };
    Ok((art, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_defence_core::{Dimensions, EnemyKind, NpcKind, Position, RenderableSnapshot, Target};
    use farm_defence_world::{Field, Ledger, Surroundings, World};

    #[test]
    fn manifest_resolves_renderables() {
        let manifest = r#"
            version = 1

            [sprites]
            "magpie.up" = "birds/magpie_up.png"
            "bee.left" = "bees/left.png"
        "#;
        let catalog = parse_manifest(manifest, Path::new("assets")).expect("manifest parses");

        let renderable = RenderableSnapshot {
            position: Position::new(0, 0),
            art: ArtGroup::Magpie,
            sprite: SpriteKey::Up,
        };
        assert_eq!(
            renderable.resolve(&catalog),
            Some(&PathBuf::from("assets/birds/magpie_up.png"))
        );
        assert_eq!(catalog.sprite(ArtGroup::Bee, SpriteKey::Right), None);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn bundled_manifest_covers_fresh_and_moving_entities() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/sprites.toml");
        let catalog = SpriteManifest::from_path(path).expect("bundled manifest loads");
        let mut world = World::new(Dimensions::new(32));
        for kind in [EnemyKind::Magpie, EnemyKind::Eagle, EnemyKind::Pigeon] {
            let _ = world.add_enemy(kind, Position::new(0, 0), Target::Player);
        }
        let _ = world.add_npc(NpcKind::BeeHive, Position::new(500, 500));
        let _ = world.add_npc(NpcKind::Scarecrow, Position::new(900, 900));

        assert_all_resolve(&world, &catalog);

        let mut ledger = Ledger::new(0, 0);
        let mut field = Field::new();
        let mut surroundings = Surroundings {
            player: Position::new(100, 100),
            inventory: &mut ledger,
            farm: &mut field,
        };
        world.frame(&mut surroundings);
        assert_all_resolve(&world, &catalog);
    }

    fn assert_all_resolve(world: &World, catalog: &SpriteManifest) {
        for renderable in world.render() {
            let sprite = renderable.resolve(catalog);
            assert!(sprite.is_some(), "no sprite for {renderable:?}");
        }
    }

    #[test]
    fn manifest_rejects_unknown_entries() {
        let manifest = r#"
            version = 1

            [sprites]
            "crow.up" = "crow.png"
        "#;
        let error = parse_manifest(manifest, Path::new(".")).expect_err("crows are unknown");
        assert!(format!("{error:#}").contains("unknown art group `crow`"));
    }

    #[test]
    fn manifest_rejects_future_versions() {
        let manifest = r#"
            version = 2

            [sprites]
        "#;
        let error = parse_manifest(manifest, Path::new(".")).expect_err("version 2 unsupported");
        let message = error.to_string();
        assert!(message.contains("manifest version 2"), "{message}");
    }
}
