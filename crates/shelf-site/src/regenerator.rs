//! Regenerates the report site and its per-date archive from every stored
//! snapshot.
//!
//! Each snapshot gets an analytics-only historical pass. The most recent one
//! also gets the full pass, which is the only pass whose failure aborts the
//! run.

use crate::render::{RenderConfig, SiteRenderer};
use chrono::{DateTime, Utc};
use shelf_common::{Result, ShelfError, SnapshotKey};
use shelf_graphs::ViewModel;
use shelf_metrics::SnapshotStore;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Which output a pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analytics page under `history/<key>/`.
    Historical,
    /// Every page at the site root.
    Full,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Historical => f.write_str("historical"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Output written.
    Rendered {
        /// Snapshot rendered.
        key: SnapshotKey,
        /// Pass kind.
        kind: PassKind,
    },
    /// Snapshot could not be loaded, projected or rendered.
    Failed {
        /// Snapshot attempted.
        key: SnapshotKey,
        /// Pass kind.
        kind: PassKind,
        /// Error message.
        error: String,
    },
}

impl PassOutcome {
    /// Snapshot of this pass.
    pub const fn key(&self) -> SnapshotKey {
        match self {
            Self::Rendered { key, .. } | Self::Failed { key, .. } => *key,
        }
    }

    /// Kind of this pass.
    pub const fn kind(&self) -> PassKind {
        match self {
            Self::Rendered { kind, .. } | Self::Failed { kind, .. } => *kind,
        }
    }

    /// Whether output was written.
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Every pass of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Pass results.
    pub outcomes: Vec<PassOutcome>,
}

impl RegenerationReport {
    /// Passes that wrote output.
    pub fn rendered(&self) -> impl Iterator<Item = &PassOutcome> {
        self.outcomes.iter().filter(|o| o.is_rendered())
    }

    /// Passes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &PassOutcome> {
        self.outcomes.iter().filter(|o| !o.is_rendered())
    }

    /// Key of the snapshot the site root was rendered from.
    pub fn full_key(&self) -> Option<SnapshotKey> {
        self.rendered()
            .find(|o| o.kind() == PassKind::Full)
            .map(PassOutcome::key)
    }
}

/// Multi-pass site regeneration rooted at one site directory.
#[derive(Debug, Clone)]
pub struct Regenerator {
    site_dir: PathBuf,
}

impl Regenerator {
    /// Regenerator writing below `site_dir`.
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
        }
    }

    /// Site root.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Render every snapshot in `store`, most recent first.
    ///
    /// `reference` is the instant the views are projected against; passing the
    /// same value makes reruns produce identical files.
    #[instrument(skip(self, store, renderer), fields(site = %self.site_dir.display()))]
    pub fn run(
        &self,
        store: &dyn SnapshotStore,
        renderer: &dyn SiteRenderer,
        reference: DateTime<Utc>,
    ) -> Result<RegenerationReport> {
        let mut keys = store.list()?;
        if keys.is_empty() {
            return Err(ShelfError::NoSnapshotsFound);
        }
        keys.sort_unstable_by(|a, b| b.cmp(a));

        let total = keys.len();
        let mut report = RegenerationReport::default();

        for (index, &key) in keys.iter().enumerate() {
            info!("[{}/{}] Generating reports for {}", index + 1, total, key);
            let is_latest = index == 0;

            let view = match store
                .read(key)
                .and_then(|metrics| ViewModel::build(&metrics, reference))
            {
                Ok(view) => view,
                Err(e) => {
                    warn!(%key, error = %e, "Skipping snapshot");
                    report.outcomes.push(failed(key, PassKind::Historical, &e));
                    if is_latest {
                        report.outcomes.push(failed(key, PassKind::Full, &e));
                        error!(%key, error = %e, "Latest snapshot could not be loaded");
                        return Err(ShelfError::render_with_source(
                            format!("Failed to load latest snapshot {key}"),
                            e,
                        ));
                    }
                    continue;
                }
            };

            let historical = RenderConfig::historical(&self.site_dir, key, keys.clone());
            match renderer.render_analytics(&view, &historical) {
                Ok(()) => report.outcomes.push(PassOutcome::Rendered {
                    key,
                    kind: PassKind::Historical,
                }),
                Err(e) => {
                    warn!(%key, error = %e, "Failed historical generation");
                    report.outcomes.push(failed(key, PassKind::Historical, &e));
                }
            }

            if is_latest {
                let full = RenderConfig::full(&self.site_dir, key, keys.clone());
                if let Err(e) = renderer.render_full(&view, &full) {
                    report.outcomes.push(failed(key, PassKind::Full, &e));
                    error!(%key, error = %e, "Failed to generate latest site");
                    return Err(ShelfError::render_with_source(
                        format!("Failed to generate latest site from {key}"),
                        e,
                    ));
                }
                report.outcomes.push(PassOutcome::Rendered {
                    key,
                    kind: PassKind::Full,
                });
            }
        }

        let failures = report.failed().count();
        if failures > 0 {
            warn!(failures, "Regeneration finished with skipped historical reports");
        }
        info!(
            passes = report.outcomes.len(),
            "Generated all historical and latest analytics"
        );
        Ok(report)
    }
}

fn failed(key: SnapshotKey, kind: PassKind, error: &ShelfError) -> PassOutcome {
    PassOutcome::Failed {
        key,
        kind,
        error: error.to_string(),
    }
}
