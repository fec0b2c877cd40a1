//! Save-path derivation for training artifacts.

use crate::id::TrainingId;
use std::path::{Path, PathBuf};

/// Derives the artifact save path for a training job.
///
/// With `save_with_id` set, the training id becomes a new directory segment
/// directly above the leaf of `save_path`. A base path that already
/// contains the id anywhere as a substring is returned verbatim, as is any
/// path when `save_with_id` is unset. No path, no result.
///
/// The derivation is pure and idempotent: feeding a derived path back in
/// yields the same path, since the id is then present as a substring.
#[must_use]
pub fn save_path_with_id(
    save_path: Option<&Path>,
    save_with_id: bool,
    training_id: &TrainingId,
) -> Option<PathBuf> {
    let path = save_path?;
    if !save_with_id || path.to_string_lossy().contains(training_id.as_str()) {
        return Some(path.to_path_buf());
    }
    let Some(leaf) = path.file_name() else {
        return Some(path.to_path_buf());
    };
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    Some(parent.join(training_id.as_str()).join(leaf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> TrainingId {
        TrainingId::for_job("t", "job7")
    }

    #[test]
    fn test_injects_id_above_leaf() {
        let id = TrainingId::for_job("t", "job7");
        let derived =
            save_path_with_id(Some(Path::new("/models/my-model")), true, &id).unwrap();
        assert_eq!(
            derived,
            Path::new("/models").join(id.as_str()).join("my-model")
        );
    }

    #[test]
    fn test_id_already_present_returns_base_unchanged() {
        let id = TrainingId::for_job("t", "job7");
        let base = Path::new("/models").join(id.as_str()).join("my-model");
        let derived = save_path_with_id(Some(&base), true, &id).unwrap();
        assert_eq!(derived, base);
    }

    #[test]
    fn test_substring_match_anywhere_suppresses_injection() {
        // The already-present check is a plain substring match, not a
        // path-segment match
        let id = TrainingId::for_job("t", "job7");
        let base = PathBuf::from(format!("/models/prefix{}suffix/leaf", id.as_str()));
        let derived = save_path_with_id(Some(&base), true, &id).unwrap();
        assert_eq!(derived, base);
    }

    #[test]
    fn test_absent_base_path_stays_absent() {
        assert_eq!(save_path_with_id(None, true, &id()), None);
        assert_eq!(save_path_with_id(None, false, &id()), None);
    }

    #[test]
    fn test_save_with_id_unset_returns_base_verbatim() {
        let derived =
            save_path_with_id(Some(Path::new("/models/my-model")), false, &id()).unwrap();
        assert_eq!(derived, Path::new("/models/my-model"));
    }

    #[test]
    fn test_single_segment_base() {
        let id = TrainingId::for_job("t", "job7");
        let derived = save_path_with_id(Some(Path::new("my-model")), true, &id).unwrap();
        assert_eq!(derived, Path::new(id.as_str()).join("my-model"));
    }

    #[test]
    fn test_idempotent() {
        let id = TrainingId::for_job("t", "job7");
        let once = save_path_with_id(Some(Path::new("/models/m")), true, &id).unwrap();
        let twice = save_path_with_id(Some(&once), true, &id).unwrap();
        assert_eq!(once, twice);
    }
}
