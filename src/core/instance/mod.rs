//! Instance data model
//!
//! Typed representation of a configured game profile: name, mod loader,
//! target game version, and the last time it was played.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A named, validated game profile.
///
/// Values of this type only exist after passing through
/// [`crate::core::schema::parse_instance`]; consumers can rely on the name
/// being 1-50 characters and the loader/game fields being non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub loader: Loader,
    pub game: Game,
    /// `None` means the instance has never been played.
    pub last_played: Option<DateTime<Utc>>,
}

/// Mod loader identity and version (e.g. Fabric 0.15.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loader {
    pub loader: String,
    pub version: String,
}

/// Target game version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub version: String,
}

impl Instance {
    /// Stamp the instance as played right now.
    pub fn touch(&mut self) {
        self.last_played = Some(Utc::now());
    }
}

/// Built-in seed instances, served by the simulated backend and the
/// "reset to defaults" action.
pub fn fake_instances() -> Vec<Instance> {
    vec![
        Instance {
            name: "Vanilla 1.20.4".to_string(),
            loader: Loader {
                loader: "Vanilla".to_string(),
                version: "1.20.4".to_string(),
            },
            game: Game {
                version: "1.20.4".to_string(),
            },
            last_played: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
        },
        Instance {
            name: "Fabric Modded".to_string(),
            loader: Loader {
                loader: "Fabric".to_string(),
                version: "0.15.3".to_string(),
            },
            game: Game {
                version: "1.20.1".to_string(),
            },
            last_played: Some(Utc.with_ymd_and_hms(2024, 1, 10, 14, 45, 0).unwrap()),
        },
        Instance {
            name: "Forge Adventure".to_string(),
            loader: Loader {
                loader: "Forge".to_string(),
                version: "47.2.20".to_string(),
            },
            game: Game {
                version: "1.20.1".to_string(),
            },
            last_played: Some(Utc.with_ymd_and_hms(2023, 12, 28, 16, 20, 0).unwrap()),
        },
        Instance {
            name: "Quilt Experimental".to_string(),
            loader: Loader {
                loader: "Quilt".to_string(),
                version: "0.21.2".to_string(),
            },
            game: Game {
                version: "1.20.2".to_string(),
            },
            last_played: Some(Utc.with_ymd_and_hms(2024, 1, 5, 9, 15, 0).unwrap()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_size() {
        assert_eq!(fake_instances().len(), 4);
    }

    #[test]
    fn test_touch_sets_last_played() {
        let mut instance = fake_instances().remove(0);
        let before = Utc::now();
        instance.touch();
        assert!(instance.last_played.unwrap() >= before);
    }
}
