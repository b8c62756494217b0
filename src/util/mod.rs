//! Utility module
//!
//! Timestamp helpers shared by the CLI and GUI.

use chrono::{DateTime, Utc};

/// Human label for a last-played timestamp.
pub fn format_last_played(last_played: Option<DateTime<Utc>>) -> String {
    let Some(played) = last_played else {
        return "Never played".to_string();
    };

    let elapsed = Utc::now().signed_duration_since(played);
    if elapsed.num_seconds() < 60 {
        "Just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{} min ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{} h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 30 {
        format!("{} days ago", elapsed.num_days())
    } else {
        played.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_last_played_labels() {
        assert_eq!(format_last_played(None), "Never played");
        assert_eq!(format_last_played(Some(Utc::now())), "Just now");

        let five_min = Utc::now() - Duration::minutes(5);
        assert_eq!(format_last_played(Some(five_min)), "5 min ago");

        let old = Utc::now() - Duration::days(400);
        assert!(format_last_played(Some(old)).starts_with(&format!("{}", old.format("%Y"))));
    }
}
