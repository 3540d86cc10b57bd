use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::group::Decision;
use crate::store::{self, DirectoryStore};

/// Result of acting on one [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved { from: PathBuf, to: PathBuf },
    /// Dry run: the photo would have been moved here.
    WouldMove { from: PathBuf, to: PathBuf },
    /// Marker photos stay where they are.
    MarkerKept,
    /// Nothing was done; carries the warning that was logged.
    Warned(String),
}

/// Act on a decision. Only `MoveAssigned` touches the filesystem, and only
/// when not simulating. Move failures propagate.
pub fn apply<S: DirectoryStore + ?Sized>(store: &S, decision: &Decision, simulate: bool) -> Result<Outcome> {
    match decision {
        Decision::MarkerSeen { target, .. } => {
            info!("Processing student: {}", dir_label(target));
            Ok(Outcome::MarkerKept)
        }
        Decision::TargetMissing { target, .. } => {
            info!("Processing student: {}", dir_label(target));
            let message = format!("Student directory not found: {}", target.display());
            warn!("{}", message);
            Ok(Outcome::Warned(message))
        }
        Decision::MoveSkipped { photo, .. } => {
            let message = format!("Photo not moved - no student directory found: {}", photo.path.display());
            warn!("{}", message);
            Ok(Outcome::Warned(message))
        }
        Decision::MoveAssigned { photo, target } => {
            if simulate {
                let to = store::destination(&photo.path, target)?;
                info!("Would have moved photo: {} to {}", photo.path.display(), target.display());
                Ok(Outcome::WouldMove {
                    from: photo.path.clone(),
                    to,
                })
            } else {
                let to = store.move_into(&photo.path, target)?;
                info!("Moved photo: {} to {}", photo.path.display(), target.display());
                Ok(Outcome::Moved {
                    from: photo.path.clone(),
                    to,
                })
            }
        }
    }
}

fn dir_label(target: &std::path::Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string())
}
