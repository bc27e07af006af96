use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::SizeBounds;

/// Unique identifier for a catalog entry, as used in `/games/{id}` routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One playable game: identity, assets and sizing bounds.
///
/// Keys are camelCase on the wire so the same JSON shape is embedded in
/// game pages and read back by the browser client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDescriptor {
    pub id: GameId,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    /// Base URL of the engine build, without a trailing slash.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Selects the `.unityweb` asset naming. Absent means enabled.
    #[serde(
        default,
        rename = "useUnityWebExtension",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_web_extension: Option<bool>,
}

impl GameDescriptor {
    /// Size bounds with the player defaults filled in for missing values.
    pub fn bounds(&self) -> SizeBounds {
        let d = SizeBounds::default();
        SizeBounds {
            min_width: self.min_width.unwrap_or(d.min_width),
            min_height: self.min_height.unwrap_or(d.min_height),
            max_width: self.max_width.unwrap_or(d.max_width),
            max_height: self.max_height.unwrap_or(d.max_height),
        }
    }

    pub fn uses_web_extension(&self) -> bool {
        self.use_web_extension.unwrap_or(true)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog entry {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate game id `{0}`")]
    DuplicateId(GameId),
    #[error("game `{0}` has a minimum size above its maximum")]
    InvertedBounds(GameId),
    #[error("game `{0}` path must not end with `/`")]
    TrailingSlash(GameId),
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    games: Vec<GameDescriptor>,
}

/// Ordered, immutable list of the games the site offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    games: Vec<GameDescriptor>,
}

impl Catalog {
    pub fn new(games: Vec<GameDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, game) in games.iter().enumerate() {
            if game.id.0.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !seen.insert(&game.id) {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
            let b = game.bounds();
            if b.min_width > b.max_width || b.min_height > b.max_height {
                return Err(CatalogError::InvertedBounds(game.id.clone()));
            }
            if game.path.ends_with('/') {
                return Err(CatalogError::TrailingSlash(game.id.clone()));
            }
        }
        Ok(Self { games })
    }

    /// The catalog shipped with the site.
    pub fn builtin() -> Self {
        let games = vec![
            GameDescriptor {
                id: GameId::from("essentials"),
                name: "Essentials".to_string(),
                description: "Learn the essentials of Unity development.".to_string(),
                thumbnail: "/Essentials.png".to_string(),
                path: "/UnityGames/Essentials".to_string(),
                min_width: Some(480),
                min_height: Some(270),
                max_width: Some(1280),
                max_height: Some(720),
                use_web_extension: Some(true),
            },
            GameDescriptor {
                id: GameId::from("clickyCrates"),
                name: "Clicky Crates".to_string(),
                description: "Clicky Game  - Test your reflexes!".to_string(),
                thumbnail: "/ClickyCrates.png".to_string(),
                path: "/UnityGames/Clicky Crates".to_string(),
                min_width: Some(480),
                min_height: Some(270),
                max_width: Some(1280),
                max_height: Some(720),
                use_web_extension: Some(false),
            },
        ];
        Self { games }
    }

    /// Parse a catalog from TOML with one `[[games]]` table per entry.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.games)
    }

    pub fn get(&self, id: &str) -> Option<&GameDescriptor> {
        self.games.iter().find(|g| g.id.0 == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameDescriptor> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 2);
        let game = catalog.get("clickyCrates").unwrap();
        assert_eq!(game.name, "Clicky Crates");
        assert!(!game.uses_web_extension());
        assert!(catalog.get("essentials").unwrap().uses_web_extension());
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(Catalog::builtin().get("nope").is_none());
        // Lookup is case sensitive
        assert!(Catalog::builtin().get("Essentials").is_none());
    }

    #[test]
    fn builtin_preserves_order() {
        let ids: Vec<_> = Catalog::builtin().iter().map(|g| g.id.0.clone()).collect();
        assert_eq!(ids, vec!["essentials", "clickyCrates"]);
    }

    #[test]
    fn missing_bounds_use_player_defaults() {
        let toml_str = r#"
[[games]]
id = "bare"
name = "Bare"
description = "No bounds"
thumbnail = "/bare.png"
path = "/UnityGames/Bare"
"#;
        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        let game = catalog.get("bare").unwrap();
        assert_eq!(game.bounds(), SizeBounds::default());
        assert!(game.uses_web_extension());
    }

    #[test]
    fn parse_catalog_toml() {
        let toml_str = r#"
[[games]]
id = "one"
name = "One"
description = "First"
thumbnail = "/one.png"
path = "/UnityGames/One"
minWidth = 320
maxWidth = 960
useUnityWebExtension = false

[[games]]
id = "two"
name = "Two"
description = "Second"
thumbnail = "/two.png"
path = "/UnityGames/Two"
"#;
        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.len(), 2);
        let one = catalog.get("one").unwrap();
        let bounds = one.bounds();
        assert_eq!(bounds.min_width, 320);
        assert_eq!(bounds.max_width, 960);
        assert_eq!(bounds.min_height, 270);
        assert!(!one.uses_web_extension());
    }

    #[test]
    fn min_above_max_rejected() {
        // minWidth alone is checked against the default maximum.
        let toml_str = r#"
[[games]]
id = "wide"
name = "Wide"
description = ""
thumbnail = ""
path = "/UnityGames/Wide"
minWidth = 1400
"#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::InvertedBounds(ref id) if id.0 == "wide"));

        let toml_str = r#"
[[games]]
id = "tall"
name = "Tall"
description = ""
thumbnail = ""
path = "/UnityGames/Tall"
minHeight = 600
maxHeight = 400
"#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::InvertedBounds(ref id) if id.0 == "tall"));
    }

    #[test]
    fn trailing_slash_path_rejected() {
        let toml_str = r#"
[[games]]
id = "slash"
name = "Slash"
description = ""
thumbnail = ""
path = "/UnityGames/Slash/"
"#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::TrailingSlash(ref id) if id.0 == "slash"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let toml_str = r#"
[[games]]
id = "dup"
name = "A"
description = ""
thumbnail = ""
path = "/a"

[[games]]
id = "dup"
name = "B"
description = ""
thumbnail = ""
path = "/b"
"#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id.0 == "dup"));
    }

    #[test]
    fn empty_id_rejected() {
        let mut game = Catalog::builtin().get("essentials").unwrap().clone();
        game.id = GameId::from("  ");
        assert!(matches!(
            Catalog::new(vec![game]),
            Err(CatalogError::EmptyId { index: 0 })
        ));
    }

    #[test]
    fn descriptor_json_uses_camel_case() {
        let game = Catalog::builtin().get("essentials").unwrap().clone();
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["id"], "essentials");
        assert_eq!(json["minWidth"], 480);
        assert_eq!(json["useUnityWebExtension"], true);
        let back: GameDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, game);
    }
}
