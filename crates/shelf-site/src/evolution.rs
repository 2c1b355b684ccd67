//! Project timeline shown on the evolution page.

use serde::{Deserialize, Serialize};
use shelf_common::{Result, ShelfError};
use std::path::Path;
use tracing::{info, warn};

/// Timeline file looked up in the content directory.
pub const TIMELINE_FILE: &str = "evolution.yml";

/// Link attached to a timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Link text.
    pub name: String,
    /// Target URL.
    pub url: String,
}

/// One milestone of the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Heading.
    pub title: String,
    /// Raw multi-line description.
    pub description: String,
    /// Related links.
    pub artifacts: Vec<Artifact>,
    /// [`description`](Self::description) split into display lines.
    #[serde(skip)]
    pub description_lines: Vec<String>,
}

/// All timeline events, latest first once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Events.
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Parse a timeline document, sort it and split its descriptions.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut timeline: Self = serde_yaml::from_str(content)
            .map_err(|e| ShelfError::config_with_source("Failed to parse timeline", e))?;

        timeline.events.sort_by(|a, b| b.date.cmp(&a.date));
        for event in &mut timeline.events {
            event.description_lines = description_lines(&event.description);
        }
        Ok(timeline)
    }

    /// Read [`TIMELINE_FILE`] from `content_dir`.
    pub fn load(content_dir: &Path) -> Result<Self> {
        let path = content_dir.join(TIMELINE_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ShelfError::config_with_source(format!("Failed to read {}", path.display()), e)
        })?;
        let timeline = Self::from_yaml(&content)?;
        info!(path = %path.display(), events = timeline.events.len(), "Loaded timeline");
        Ok(timeline)
    }

    /// Like [`load`](Self::load), but an unreadable timeline is logged and
    /// replaced by an empty one.
    pub fn load_or_default(content_dir: &Path) -> Self {
        Self::load(content_dir).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load timeline, rendering without it");
            Self::default()
        })
    }
}

/// Display lines of a description: trimmed, blank lines dropped, list
/// markers and surrounding double quotes removed.
pub fn description_lines(description: &str) -> Vec<String> {
    description
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = line.strip_prefix("- ").unwrap_or(line).trim();
            line.strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_common::test_utils::create_temp_dir;

    const TIMELINE: &str = r#"
events:
  - date: "2024-03-18"
    title: "GitHub added"
    description: |
      - "Track the GitHub engineering blog"
      - Second line

  - date: "2025-11-19"
    title: "Stripe added"
    description: Stripe blog
    artifacts:
      - name: "PR"
        url: "https://example.com/pr/1"
"#;

    #[test]
    fn test_description_lines() {
        let lines = description_lines("\n  - \"Quoted\"  \n\n- plain\nno marker\n\"\n");
        assert_eq!(lines, ["Quoted", "plain", "no marker", "\""]);
    }

    #[test]
    fn test_from_yaml_sorts_latest_first() {
        let timeline = Timeline::from_yaml(TIMELINE).unwrap();

        let dates: Vec<_> = timeline.events.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, ["2025-11-19", "2024-03-18"]);
        assert_eq!(timeline.events[0].artifacts[0].name, "PR");
        assert_eq!(
            timeline.events[1].description_lines,
            ["Track the GitHub engineering blog", "Second line"]
        );
    }

    #[test]
    fn test_load_from_dir() {
        let dir = create_temp_dir();
        std::fs::write(dir.path().join(TIMELINE_FILE), TIMELINE).unwrap();

        let timeline = Timeline::load(dir.path()).unwrap();
        assert_eq!(timeline.events.len(), 2);
    }

    #[test]
    fn test_missing_timeline_is_empty() {
        let dir = create_temp_dir();
        assert!(Timeline::load(dir.path()).is_err());
        assert!(Timeline::load_or_default(dir.path()).events.is_empty());
    }

    #[test]
    fn test_invalid_timeline_is_error() {
        assert!(Timeline::from_yaml("events: [not, a, mapping").is_err());
    }
}
