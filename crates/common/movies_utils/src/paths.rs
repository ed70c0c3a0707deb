use nix::unistd::access;
use nix::unistd::AccessFlags;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

#[derive(thiserror::Error, Debug)]
pub enum TargetDirectoryError {
    #[error("Attempt to download movies within a file instead of a directory. Please turn {} into a directory or change its location with --target-directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Directory {} cannot be created: {} is not writable. Please check your permission rights on this directory or change the location with --target-directory", .path.display(), .parent.display())]
    PermissionDenied { path: PathBuf, parent: PathBuf },

    #[error("Directory {} cannot be accessed. Check permissions or change the location with --target-directory", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Creating the directory {} failed", .path.display())]
    CreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Make sure `path` is a directory files can be downloaded into.
///
/// - An existing directory is returned as is.
/// - An existing file that is not a directory is rejected.
/// - A missing directory is created, provided its parent exists and is writable.
///   Missing ancestors are not created.
pub fn resolve_target_directory(path: impl AsRef<Path>) -> Result<PathBuf, TargetDirectoryError> {
    let path = path.as_ref();
    info!(
        "Movies files will be downloaded in the directory {}. Use --target-directory or MOVIES_TARGET_DIRECTORY to pick another location",
        display_absolute(path)
    );

    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(path.to_path_buf()),
        Ok(_) => Err(TargetDirectoryError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            create_target_directory(path)
        }
        Err(source) => Err(TargetDirectoryError::Inaccessible {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn create_target_directory(path: &Path) -> Result<PathBuf, TargetDirectoryError> {
    let parent = parent_dir(path);
    if !is_writable_dir(parent) {
        return Err(TargetDirectoryError::PermissionDenied {
            path: path.to_path_buf(),
            parent: parent.to_path_buf(),
        });
    }

    std::fs::create_dir(path).map_err(|source| TargetDirectoryError::CreationFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Directory {} has been created in order to receive movies files",
        display_absolute(path)
    );

    Ok(path.to_path_buf())
}

fn is_writable_dir(path: &Path) -> bool {
    path.is_dir() && access(path, AccessFlags::W_OK).is_ok()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn running_as_root() -> bool {
        nix::unistd::geteuid().is_root()
    }

    #[test]
    fn existing_directory_is_returned_unchanged() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let before = std::fs::metadata(ttd.path())?.modified()?;

        let resolved = resolve_target_directory(ttd.path())?;

        assert_eq!(resolved, ttd.path());
        assert_eq!(std::fs::metadata(ttd.path())?.modified()?, before);
        assert_eq!(std::fs::read_dir(ttd.path())?.count(), 0);

        // and again
        assert_eq!(resolve_target_directory(ttd.path())?, ttd.path());
        Ok(())
    }

    #[test]
    fn missing_directory_is_created() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let target = ttd.path().join("interfaces");

        let resolved = resolve_target_directory(&target)?;

        assert_eq!(resolved, target);
        assert!(target.is_dir());
        assert_eq!(std::fs::read_dir(ttd.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn missing_ancestors_are_not_created() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let target = ttd.path().join("base").join("interfaces");

        let err = resolve_target_directory(&target).unwrap_err();

        assert_matches!(
            err,
            TargetDirectoryError::PermissionDenied { ref parent, .. } if parent == &ttd.path().join("base")
        );
        assert_eq!(std::fs::read_dir(ttd.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn plain_file_is_rejected() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let file = ttd.path().join("interfaces");
        std::fs::write(&file, "not a directory")?;

        let err = resolve_target_directory(&file).unwrap_err();

        assert_matches!(err, TargetDirectoryError::NotADirectory { ref path } if path == &file);
        assert!(err.to_string().contains("--target-directory"));
        assert!(file.is_file());
        Ok(())
    }

    #[test]
    fn parent_that_is_not_a_directory_is_rejected() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let parent = ttd.path().join("base");
        std::fs::write(&parent, "a file")?;
        let target = parent.join("interfaces");

        let err = resolve_target_directory(&target).unwrap_err();

        assert_matches!(
            err,
            TargetDirectoryError::PermissionDenied { ref path, parent: ref denied } if path == &target && denied == &parent
        );
        assert!(err.to_string().contains("--target-directory"));
        assert_eq!(std::fs::read(&parent)?, b"a file");
        assert_eq!(std::fs::read_dir(ttd.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn read_only_parent_is_rejected() -> anyhow::Result<()> {
        if running_as_root() {
            // root can write in read-only directories
            return Ok(());
        }
        let ttd = TempDir::new()?;
        let parent = ttd.path().join("read-only");
        std::fs::create_dir(&parent)?;
        std::fs::set_permissions(&parent, Permissions::from_mode(0o555))?;
        let target = parent.join("interfaces");

        let result = resolve_target_directory(&target);
        std::fs::set_permissions(&parent, Permissions::from_mode(0o755))?;

        assert_matches!(
            result,
            Err(TargetDirectoryError::PermissionDenied { ref path, .. }) if path == &target
        );
        assert!(!target.exists());
        Ok(())
    }

    #[test]
    fn relative_path_without_parent_uses_current_directory() {
        assert_eq!(parent_dir(Path::new("interfaces")), Path::new("."));
        assert_eq!(parent_dir(Path::new("base/interfaces")), Path::new("base"));
        assert_eq!(parent_dir(Path::new("/interfaces")), Path::new("/"));
    }
}
