//! Path resolution with ordered fallback locations.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Return the first of `primary` or `fallbacks` that is an existing regular file.
///
/// `primary` always wins when it exists; fallbacks are only consulted
/// otherwise. On failure the error lists `primary` followed by every fallback.
pub fn resolve(primary: &Path, fallbacks: &[PathBuf]) -> PipelineResult<PathBuf> {
    resolve_with(primary, fallbacks, Path::is_file)
}

/// [`resolve`] with a caller-supplied existence probe.
pub fn resolve_with<F>(primary: &Path, fallbacks: &[PathBuf], exists: F) -> PipelineResult<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if exists(primary) {
        return Ok(primary.to_path_buf());
    }

    if let Some(found) = fallbacks.iter().find(|candidate| exists(candidate)) {
        tracing::debug!("Resolved {:?} via fallback {:?}", primary, found);
        return Ok(found.clone());
    }

    let mut attempted = Vec::with_capacity(fallbacks.len() + 1);
    attempted.push(primary.to_path_buf());
    attempted.extend(fallbacks.iter().cloned());
    Err(PipelineError::not_found(primary, attempted))
}

/// Find the project root by walking up from `start` to the first directory
/// containing a README.md. Falls back to `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join("README.md").is_file())
        .unwrap_or(start)
        .to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_primary_skips_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("prompt.txt");
        std::fs::write(&primary, "hello").unwrap();
        let fallback = dir.path().join("never.txt");

        let resolved = resolve_with(&primary, &[fallback.clone()], |p| {
            assert_ne!(p, fallback.as_path(), "fallback must not be consulted");
            p.is_file()
        })
        .unwrap();
        assert_eq!(resolved, primary);
    }

    #[test]
    fn test_second_fallback_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a/frame.jpg");
        let second = dir.path().join("frame.jpg");
        std::fs::write(&second, [0xFF, 0xD8]).unwrap();

        let resolved = resolve(&dir.path().join("missing.jpg"), &[first, second.clone()]).unwrap();
        assert_eq!(resolved, second);
    }

    #[test]
    fn test_all_missing_lists_every_path() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("nope.jpg");
        let fallbacks = vec![dir.path().join("x/nope.jpg"), dir.path().join("y/nope.jpg")];

        let err = resolve(&primary, &fallbacks).unwrap_err();
        match &err {
            PipelineError::NotFound { attempted, .. } => {
                assert_eq!(attempted.len(), 3);
                assert_eq!(attempted[0], primary);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains(&primary.display().to_string()));
        for fallback in &fallbacks {
            assert!(msg.contains(&fallback.display().to_string()));
        }
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(dir.path(), &[]).is_err());
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# root").unwrap();
        let nested = dir.path().join("phase0/src");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), dir.path());
    }
}
