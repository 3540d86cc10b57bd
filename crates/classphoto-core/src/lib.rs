pub mod error;
pub mod executor;
pub mod group;
pub mod marker;
pub mod photo;
pub mod provision;
pub mod report;
pub mod roster;
pub mod store;

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use error::{Error, Result};
pub use executor::Outcome;
pub use group::{Decision, DecisionKind, GroupContext, GroupState, SkipReason};
pub use photo::{PhotoItem, TimeSource};
pub use provision::{Provision, ProvisionSummary};
pub use report::DecisionRecord;
pub use roster::{Roster, RosterColumns, StudentRecord};
pub use store::{DirectoryStore, FsStore};

fn default_extension() -> String {
    "jpg".to_string()
}

fn default_first_name_column() -> String {
    roster::DEFAULT_FIRST_NAME_COLUMN.to_string()
}

fn default_last_name_column() -> String {
    roster::DEFAULT_LAST_NAME_COLUMN.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeOptions {
    /// CSV roster with one row per student
    pub roster: PathBuf,
    /// Folder holding the session's photos; student folders are created here
    pub source_dir: PathBuf,
    #[serde(default)]
    pub simulate: bool,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_first_name_column")]
    pub first_name_column: String,
    #[serde(default = "default_last_name_column")]
    pub last_name_column: String,
    #[serde(default)]
    pub time_source: TimeSource,
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl OrganizeOptions {
    pub fn new(roster: impl Into<PathBuf>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            roster: roster.into(),
            source_dir: source_dir.into(),
            simulate: false,
            extension: default_extension(),
            first_name_column: default_first_name_column(),
            last_name_column: default_last_name_column(),
            time_source: TimeSource::default(),
            report: None,
        }
    }

    pub fn columns(&self) -> RosterColumns {
        RosterColumns {
            first_name: self.first_name_column.clone(),
            last_name: self.last_name_column.clone(),
        }
    }

    /// Check the inputs exist before anything is touched.
    pub fn validate(&self) -> Result<()> {
        if !self.roster.is_file() {
            return Err(Error::Configuration(format!("File not found: {}", self.roster.display())));
        }
        if !self.source_dir.is_dir() {
            return Err(Error::Configuration(format!(
                "Directory not found: {}",
                self.source_dir.display()
            )));
        }
        if photo::normalize_extension(&self.extension).is_empty() {
            return Err(Error::Configuration("photo extension must not be empty".to_string()));
        }
        if self.first_name_column.is_empty() || self.last_name_column.is_empty() {
            return Err(Error::Configuration("roster column names must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizeResult {
    pub directories: ProvisionSummary,
    pub photos: u64,
    pub markers: u64,
    pub missing_targets: u64,
    /// Photos moved, or that would have been moved in a dry run
    pub moved: u64,
    pub skipped: u64,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub decisions: Vec<DecisionRecord>,
}

/// Type alias for progress callback: (stage, current, total, message)
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + 'a;

/// Provision the roster's folders, then sort the session's photos into them.
pub fn organize(options: &OrganizeOptions, progress: &ProgressCallback<'_>) -> Result<OrganizeResult> {
    options.validate()?;
    organize_with_store(&FsStore, options, progress)
}

/// Same as [`organize`] without the up-front validation, acting through `store`.
pub fn organize_with_store<S: DirectoryStore + ?Sized>(
    store: &S,
    options: &OrganizeOptions,
    progress: &ProgressCallback<'_>,
) -> Result<OrganizeResult> {
    let t_total = Instant::now();
    let source_dir = options.source_dir.as_path();
    let simulate = options.simulate;

    if simulate {
        warn!("Dry run enabled - no changes to the file system will occur!");
    }

    // Stage 1: student folders
    let roster = Roster::open(&options.roster, &options.columns())?;
    let directories = provision::provision_roster(store, roster.records(), source_dir, simulate)?;
    let students = directories.created + directories.would_create + directories.already_existing;
    progress("roster", students.saturating_sub(1), students, "Student directories ready");

    // Stage 2: photos in capture order
    let photos = photo::list_photos(source_dir, &options.extension, options.time_source)?;
    let total = photos.len() as u64;
    debug!(
        "Listed {} photos ({:?} time) in {:.2}s",
        total,
        options.time_source,
        t_total.elapsed().as_secs_f64()
    );

    // Stage 3: group and move, one decision at a time
    let mut result = OrganizeResult {
        directories,
        photos: total,
        ..OrganizeResult::default()
    };
    let ctx = GroupContext {
        source_dir,
        simulate,
        store,
    };
    for (i, decision) in group::group(photos, ctx).enumerate() {
        if let Some(captured) = decision.photo().captured_at() {
            debug!(photo = %decision.photo().file_name, captured = %captured, "{:?}", decision.kind());
        }
        let outcome = executor::apply(store, &decision, simulate)?;

        if decision.is_marker() {
            result.markers += 1;
        }
        match outcome {
            Outcome::Moved { .. } | Outcome::WouldMove { .. } => result.moved += 1,
            Outcome::MarkerKept => {}
            Outcome::Warned(message) => {
                match decision.kind() {
                    DecisionKind::TargetMissing => result.missing_targets += 1,
                    _ => result.skipped += 1,
                }
                result.warnings.push(message);
            }
        }
        result.decisions.push(DecisionRecord::new(&decision, source_dir));
        progress("organize", i as u64, total, &decision.photo().file_name);
    }

    if let Some(report_path) = &options.report {
        report::write_report(&result, source_dir, simulate, report_path)?;
        info!("Wrote report to {}", report_path.display());
    }

    info!(
        moved = result.moved,
        skipped = result.skipped,
        markers = result.markers,
        missing = result.missing_targets,
        "Photo organization complete! ({:.2}s)",
        t_total.elapsed().as_secs_f64()
    );

    Ok(result)
}
