//! Grouping of a capture-ordered photo sequence into per-student runs.
//!
//! Each run opens with a marker photo named `First_Last` (a shot of the
//! student's name card) and covers every following photo up to the next
//! marker. The only state carried between photos is the folder of the most
//! recent usable marker, held in [`GroupState`] and threaded through
//! [`Iterator::scan`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::marker::{classify, Classification};
use crate::photo::PhotoItem;
use crate::roster::student_dir_name;
use crate::store::DirectoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No marker seen yet, or the last marker's folder is missing.
    NoActiveTarget,
}

/// What to do with one photo. One decision is produced per input photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    MarkerSeen { photo: PhotoItem, target: PathBuf },
    /// A marker whose folder does not exist (live runs only).
    TargetMissing { photo: PhotoItem, target: PathBuf },
    MoveAssigned { photo: PhotoItem, target: PathBuf },
    MoveSkipped { photo: PhotoItem, reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    MarkerSeen,
    TargetMissing,
    MoveAssigned,
    MoveSkipped,
}

impl Decision {
    pub fn photo(&self) -> &PhotoItem {
        match self {
            Decision::MarkerSeen { photo, .. }
            | Decision::TargetMissing { photo, .. }
            | Decision::MoveAssigned { photo, .. }
            | Decision::MoveSkipped { photo, .. } => photo,
        }
    }

    pub fn target(&self) -> Option<&Path> {
        match self {
            Decision::MarkerSeen { target, .. }
            | Decision::TargetMissing { target, .. }
            | Decision::MoveAssigned { target, .. } => Some(target),
            Decision::MoveSkipped { .. } => None,
        }
    }

    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::MarkerSeen { .. } => DecisionKind::MarkerSeen,
            Decision::TargetMissing { .. } => DecisionKind::TargetMissing,
            Decision::MoveAssigned { .. } => DecisionKind::MoveAssigned,
            Decision::MoveSkipped { .. } => DecisionKind::MoveSkipped,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Decision::MarkerSeen { .. } | Decision::TargetMissing { .. })
    }
}

/// The cursor carried from photo to photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupState {
    pub current_target: Option<PathBuf>,
}

/// Settings shared by every step of one pass.
pub struct GroupContext<'a, S: ?Sized> {
    pub source_dir: &'a Path,
    pub simulate: bool,
    pub store: &'a S,
}

/// Advance the grouping by one photo.
pub fn step<S: DirectoryStore + ?Sized>(
    state: GroupState,
    photo: PhotoItem,
    ctx: &GroupContext<'_, S>,
) -> (GroupState, Decision) {
    match classify(&photo.stem) {
        Classification::Marker { first, last } => {
            let candidate = ctx.source_dir.join(student_dir_name(&first, &last));
            if ctx.simulate || ctx.store.is_dir(&candidate) {
                let state = GroupState {
                    current_target: Some(candidate.clone()),
                };
                (state, Decision::MarkerSeen { photo, target: candidate })
            } else {
                let state = GroupState { current_target: None };
                (state, Decision::TargetMissing { photo, target: candidate })
            }
        }
        Classification::Member => {
            let decision = match &state.current_target {
                Some(target) => Decision::MoveAssigned {
                    photo,
                    target: target.clone(),
                },
                None => Decision::MoveSkipped {
                    photo,
                    reason: SkipReason::NoActiveTarget,
                },
            };
            (state, decision)
        }
    }
}

/// Lazily decide the fate of every photo, in the order given.
///
/// `photos` must already be in capture order (see [`crate::photo::sort_photos`]).
/// In live mode a marker's folder is checked when the marker is reached, so
/// the iterator should be consumed in step with the moves it drives.
pub fn group<'a, S, I>(photos: I, ctx: GroupContext<'a, S>) -> impl Iterator<Item = Decision> + 'a
where
    S: DirectoryStore + ?Sized + 'a,
    I: IntoIterator<Item = PhotoItem> + 'a,
    I::IntoIter: 'a,
{
    photos
        .into_iter()
        .scan(GroupState::default(), move |state, photo| {
            let (next, decision) = step(std::mem::take(state), photo, &ctx);
            *state = next;
            Some(decision)
        })
}
