//! Output path resolution and the single write a run performs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::OutputFormat;
use crate::error::PipelineError;

pub const DEFAULT_OUTPUT_DIR: &str = "resume";
pub const DEFAULT_OUTPUT_STEM: &str = "resume";

/// `<root>/resume/resume.<ext>`.
pub fn default_output_path(root: &Path, format: OutputFormat) -> PathBuf {
    root.join(DEFAULT_OUTPUT_DIR).join(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
}

fn not_writable(path: &Path, source: io::Error) -> PipelineError {
    PipelineError::OutputNotWritable { path: path.to_path_buf(), source }
}

/// Check, without touching the filesystem, that `path` could be written.
///
/// The nearest existing ancestor must be a writable directory, and `path`
/// itself must not be a directory.
pub fn check_output_writable(path: &Path) -> Result<(), PipelineError> {
    if path.is_dir() {
        let source = io::Error::new(io::ErrorKind::Other, "path is a directory");
        return Err(not_writable(path, source));
    }
    if path.exists() {
        let meta = fs::metadata(path).map_err(|e| not_writable(path, e))?;
        if meta.permissions().readonly() {
            let source = io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only");
            return Err(not_writable(path, source));
        }
        return Ok(());
    }

    let mut ancestor = path.parent();
    while let Some(dir) = ancestor {
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {
                if meta.permissions().readonly() {
                    let message = format!("{} is read-only", dir.display());
                    let source = io::Error::new(io::ErrorKind::PermissionDenied, message);
                    return Err(not_writable(path, source));
                }
                return Ok(());
            }
            Ok(_) => {
                let message = format!("{} is not a directory", dir.display());
                return Err(not_writable(path, io::Error::new(io::ErrorKind::Other, message)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => ancestor = dir.parent(),
            Err(e) => return Err(not_writable(path, e)),
        }
    }
    Ok(())
}

/// Write the rendered document, creating parent directories right before
/// the write so that no earlier failure leaves partial output behind.
///
/// Content is staged in a sibling temporary file and renamed into place, so
/// a failed write never leaves a truncated document at `path`.
pub fn write_output(path: &Path, content: &str) -> Result<(), PipelineError> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| not_writable(path, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| not_writable(path, e))?;
    staged
        .write_all(content.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| not_writable(path, e))?;
    if let Some(permissions) = output_permissions(path) {
        fs::set_permissions(staged.path(), permissions).map_err(|e| not_writable(path, e))?;
    }
    staged.persist(path).map_err(|e| not_writable(path, e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Permissions for the renamed file: those of the file being replaced, or
/// the usual world-readable mode for a new one.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_path_uses_format_extension() {
        let root = Path::new("/work/widget");
        assert_eq!(
            default_output_path(root, OutputFormat::Markdown),
            root.join("resume").join("resume.md")
        );
        assert_eq!(
            default_output_path(root, OutputFormat::Html),
            root.join("resume").join("resume.html")
        );
    }

    #[test]
    fn check_accepts_missing_nested_dirs_without_creating_them() {
        let temp = TempDir::new().expect("tempdir");
        let target = temp.path().join("a").join("b").join("resume.html");
        check_output_writable(&target).expect("writable");
        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn check_rejects_directories_and_file_parents() {
        let temp = TempDir::new().expect("tempdir");
        let err = check_output_writable(temp.path()).expect_err("dir");
        assert!(err.is_environment_missing());

        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").expect("write");
        let err = check_output_writable(&file.join("resume.html")).expect_err("file parent");
        assert!(matches!(err, PipelineError::OutputNotWritable { .. }));
    }

    #[test]
    fn write_creates_parents() {
        let temp = TempDir::new().expect("tempdir");
        let target = temp.path().join("out").join("resume.md");
        write_output(&target, "# Resume\n").expect("write");
        assert_eq!(fs::read_to_string(&target).expect("read"), "# Resume\n");
    }

    #[test]
    fn write_replaces_in_place_without_leftovers() {
        let temp = TempDir::new().expect("tempdir");
        let target = temp.path().join("resume.md");
        fs::write(&target, "old content that is longer than the new one\n").expect("seed");

        write_output(&target, "# New\n").expect("write");
        assert_eq!(fs::read_to_string(&target).expect("read"), "# New\n");

        let names: Vec<String> = fs::read_dir(temp.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["resume.md"]);
    }

    #[test]
    fn failed_write_leaves_existing_output_untouched() {
        let temp = TempDir::new().expect("tempdir");
        let target = temp.path().join("resume.md");
        fs::create_dir(&target).expect("dir in the way");

        let err = write_output(&target, "# New\n").expect_err("cannot replace a directory");
        assert!(matches!(err, PipelineError::OutputNotWritable { .. }));
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 1);
    }
}
