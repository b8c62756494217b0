//! Instance validation
//!
//! Checks untrusted instance data against the schema rules before anything
//! reaches the store: name length, required loader/game fields, and the
//! optional last-played timestamp format. Violations are collected, never
//! short-circuited, so the caller can report every problem at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::instance::{Game, Instance, Loader};

/// Maximum instance name length.
pub const MAX_NAME_LEN: usize = 50;

/// Unvalidated instance data as it arrives from a form, a JSON file, or
/// the persistence backend. All fields are plain strings; `last_played`
/// is an optional RFC 3339 timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub loader: LoaderDraft,
    #[serde(default)]
    pub game: GameDraft,
    #[serde(default)]
    pub last_played: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderDraft {
    #[serde(default)]
    pub loader: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDraft {
    #[serde(default)]
    pub version: String,
}

impl From<&Instance> for InstanceDraft {
    fn from(instance: &Instance) -> Self {
        Self {
            name: instance.name.clone(),
            loader: LoaderDraft {
                loader: instance.loader.loader.clone(),
                version: instance.loader.version.clone(),
            },
            game: GameDraft {
                version: instance.game.version.clone(),
            },
            last_played: instance.last_played.map(|t| t.to_rfc3339()),
        }
    }
}

/// A single violated rule: dotted path to the field plus a human message.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// `path: message`, omitting the prefix when the path is empty and
    /// falling back to a generic message when the message is missing.
    pub fn format(&self) -> String {
        let message = if self.message.is_empty() {
            "Unknown error"
        } else {
            &self.message
        };
        if self.path.is_empty() {
            message.to_string()
        } else {
            format!("{}: {}", self.path, message)
        }
    }
}

/// One or more schema rule violations.
#[derive(Debug, Clone, Error)]
#[error("{}", format_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<Issue>,
}

impl SchemaError {
    pub fn messages(&self) -> Vec<String> {
        if self.issues.is_empty() {
            return vec!["Validation error".to_string()];
        }
        self.issues.iter().map(Issue::format).collect()
    }
}

/// Join issues into a single display string. Defensive: an empty issue
/// list still yields a generic message.
pub fn format_issues(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "Validation error".to_string();
    }
    issues
        .iter()
        .map(Issue::format)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of a non-consuming validation check.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid { errors: Vec<String> },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

fn check(draft: &InstanceDraft) -> Vec<Issue> {
    let mut issues = Vec::new();

    if draft.name.is_empty() {
        issues.push(Issue::new("name", "Instance name is required"));
    } else if draft.name.chars().count() > MAX_NAME_LEN {
        issues.push(Issue::new("name", "Instance name too long"));
    }

    if draft.loader.loader.is_empty() {
        issues.push(Issue::new("loader.loader", "Loader name is required"));
    }
    if draft.loader.version.is_empty() {
        issues.push(Issue::new("loader.version", "Loader version is required"));
    }
    if draft.game.version.is_empty() {
        issues.push(Issue::new("game.version", "Game version is required"));
    }

    if let Some(raw) = &draft.last_played {
        if DateTime::parse_from_rfc3339(raw).is_err() {
            issues.push(Issue::new("last_played", "Invalid datetime"));
        }
    }

    issues
}

/// Validate a draft and convert it into a typed [`Instance`].
///
/// Collects every violated rule; the draft is not mutated.
pub fn parse_instance(draft: &InstanceDraft) -> Result<Instance, SchemaError> {
    let issues = check(draft);
    if !issues.is_empty() {
        return Err(SchemaError { issues });
    }

    let last_played = draft
        .last_played
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc));

    Ok(Instance {
        name: draft.name.clone(),
        loader: Loader {
            loader: draft.loader.loader.clone(),
            version: draft.loader.version.clone(),
        },
        game: Game {
            version: draft.game.version.clone(),
        },
        last_played,
    })
}

/// Check a draft against the schema without constructing anything.
/// Never fails itself; always returns a report.
pub fn validate_instance(draft: &InstanceDraft) -> Validation {
    match parse_instance(draft) {
        Ok(_) => Validation::Valid,
        Err(err) => Validation::Invalid {
            errors: err.messages(),
        },
    }
}

/// Validate a batch of drafts, prefixing issue paths with the element
/// index. One bad element fails the whole batch.
pub fn parse_instances(drafts: &[InstanceDraft]) -> Result<Vec<Instance>, SchemaError> {
    let mut instances = Vec::with_capacity(drafts.len());
    let mut issues = Vec::new();

    for (index, draft) in drafts.iter().enumerate() {
        match parse_instance(draft) {
            Ok(instance) => instances.push(instance),
            Err(err) => {
                issues.extend(err.issues.into_iter().map(|issue| Issue {
                    path: if issue.path.is_empty() {
                        index.to_string()
                    } else {
                        format!("{}.{}", index, issue.path)
                    },
                    message: issue.message,
                }));
            }
        }
    }

    if issues.is_empty() {
        Ok(instances)
    } else {
        Err(SchemaError { issues })
    }
}

/// Validate a bare instance name (used by delete and duplicate lookups).
pub fn validate_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError {
            issues: vec![Issue::new("", "Instance name is required")],
        });
    }
    Ok(())
}

/// Validate a name intended for a new instance (non-empty, length-capped).
pub fn validate_new_name(name: &str) -> Result<(), SchemaError> {
    validate_name(name)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SchemaError {
            issues: vec![Issue::new("", "Instance name too long")],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instance::fake_instances;

    fn valid_draft() -> InstanceDraft {
        InstanceDraft {
            name: "Test Instance".to_string(),
            loader: LoaderDraft {
                loader: "Fabric".to_string(),
                version: "0.15.3".to_string(),
            },
            game: GameDraft {
                version: "1.20.1".to_string(),
            },
            last_played: Some("2024-01-15T10:30:00.000Z".to_string()),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_instance(&valid_draft()).is_valid());
    }

    #[test]
    fn test_missing_last_played_is_valid() {
        let mut draft = valid_draft();
        draft.last_played = None;
        let instance = parse_instance(&draft).unwrap();
        assert!(instance.last_played.is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut draft = valid_draft();
        draft.name = String::new();
        match validate_instance(&draft) {
            Validation::Invalid { errors } => {
                assert_eq!(errors, vec!["name: Instance name is required"]);
            }
            Validation::Valid => panic!("empty name accepted"),
        }
    }

    #[test]
    fn test_long_name_rejected() {
        let mut draft = valid_draft();
        draft.name = "x".repeat(51);
        match validate_instance(&draft) {
            Validation::Invalid { errors } => {
                assert_eq!(errors, vec!["name: Instance name too long"]);
            }
            Validation::Valid => panic!("51-char name accepted"),
        }
    }

    #[test]
    fn test_fifty_char_name_accepted() {
        let mut draft = valid_draft();
        draft.name = "x".repeat(50);
        assert!(validate_instance(&draft).is_valid());
    }

    #[test]
    fn test_all_violations_collected() {
        let draft = InstanceDraft::default();
        match validate_instance(&draft) {
            Validation::Invalid { errors } => {
                assert_eq!(errors.len(), 4);
                assert!(errors.contains(&"loader.version: Loader version is required".to_string()));
                assert!(errors.contains(&"game.version: Game version is required".to_string()));
            }
            Validation::Valid => panic!("empty draft accepted"),
        }
    }

    #[test]
    fn test_bad_datetime_rejected() {
        let mut draft = valid_draft();
        draft.last_played = Some("yesterday".to_string());
        match validate_instance(&draft) {
            Validation::Invalid { errors } => {
                assert_eq!(errors, vec!["last_played: Invalid datetime"]);
            }
            Validation::Valid => panic!("bad datetime accepted"),
        }
    }

    #[test]
    fn test_parse_preserves_timestamp() {
        let instance = parse_instance(&valid_draft()).unwrap();
        assert_eq!(
            instance.last_played.unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_batch_errors_carry_element_index() {
        let mut bad = valid_draft();
        bad.name = String::new();
        let err = parse_instances(&[valid_draft(), bad]).unwrap_err();
        assert_eq!(err.issues[0].path, "1.name");
    }

    #[test]
    fn test_batch_rejects_whole_load() {
        let mut bad = valid_draft();
        bad.game.version = String::new();
        assert!(parse_instances(&[valid_draft(), bad, valid_draft()]).is_err());
    }

    #[test]
    fn test_format_issues_fallbacks() {
        assert_eq!(format_issues(&[]), "Validation error");
        let malformed = Issue {
            path: String::new(),
            message: String::new(),
        };
        assert_eq!(format_issues(&[malformed]), "Unknown error");
    }

    #[test]
    fn test_draft_round_trip_from_instance() {
        for instance in fake_instances() {
            let draft = InstanceDraft::from(&instance);
            assert_eq!(parse_instance(&draft).unwrap(), instance);
        }
    }
}
