use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::roster::{student_dir_name, StudentRecord};
use crate::store::DirectoryStore;

/// What happened to one student's folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provision {
    Created(PathBuf),
    /// Dry run: the folder would have been created.
    WouldCreate(PathBuf),
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionSummary {
    pub created: u64,
    pub would_create: u64,
    pub already_existing: u64,
}

impl ProvisionSummary {
    fn record(&mut self, outcome: &Provision) {
        match outcome {
            Provision::Created(_) => self.created += 1,
            Provision::WouldCreate(_) => self.would_create += 1,
            Provision::AlreadyExists(_) => self.already_existing += 1,
        }
    }
}

/// Make sure `source_dir/First_Last` exists. Creation errors propagate.
pub fn ensure<S: DirectoryStore + ?Sized>(
    store: &S,
    first: &str,
    last: &str,
    source_dir: &Path,
    simulate: bool,
) -> Result<Provision> {
    let student_dir = source_dir.join(student_dir_name(first, last));

    if store.exists(&student_dir) {
        warn!("Directory already exists - skipping: {}", student_dir.display());
        return Ok(Provision::AlreadyExists(student_dir));
    }

    if first.is_empty() || last.is_empty() {
        warn!(first, last, "Roster row has an empty name field: {}", student_dir.display());
    }

    if simulate {
        info!("Would create directory: {}", student_dir.display());
        Ok(Provision::WouldCreate(student_dir))
    } else {
        store.create_dir(&student_dir)?;
        info!("Created directory: {}", student_dir.display());
        Ok(Provision::Created(student_dir))
    }
}

/// Provision every roster entry in order, stopping at the first error.
pub fn provision_roster<S, I>(store: &S, records: I, source_dir: &Path, simulate: bool) -> Result<ProvisionSummary>
where
    S: DirectoryStore + ?Sized,
    I: IntoIterator<Item = Result<StudentRecord>>,
{
    let mut summary = ProvisionSummary::default();
    for record in records {
        let record = record?;
        let outcome = ensure(store, &record.first_name, &record.last_name, source_dir, simulate)?;
        summary.record(&outcome);
    }
    Ok(summary)
}
