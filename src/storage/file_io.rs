//! File I/O utilities with atomic writes
//!
//! Reading inputs and writing outputs is the caller's side of the codec.
//! Writes never leave a partial file behind.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{rngs::OsRng, RngCore};

use crate::error::{SealError, SealResult};

/// Read a whole input file (plain file or container)
pub fn read_input<P: AsRef<Path>>(path: P) -> SealResult<Vec<u8>> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(SealError::InputReadFailed(format!(
            "Not a readable file: {}",
            path.display()
        )));
    }

    fs::read(path)
        .map_err(|e| SealError::InputReadFailed(format!("Failed to read {}: {}", path.display(), e)))
}

/// Final path component of `path` as a display string
pub fn file_name_of(path: &Path) -> SealResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SealError::InputReadFailed(format!("Path has no file name: {}", path.display()))
        })
}

/// Reduce a name taken from a container to a bare file name
///
/// Container metadata is untrusted, so directory components and parent
/// references are stripped before the name is used as an output path.
pub fn sanitize_file_name(name: &str) -> String {
    let candidate = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match candidate {
        "" | "." | ".." => "decrypted.bin".to_string(),
        other => other.to_string(),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8], overwrite: bool) -> SealResult<()> {
    let path = path.as_ref();

    if path.exists() && !overwrite {
        return Err(SealError::Validation(format!(
            "Output file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SealError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| SealError::Io(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(temp_path: &Path, data: &[u8]) -> SealResult<()> {
    // create_new: never truncate a file that happens to share the name
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)
        .map_err(|e| SealError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .map_err(|e| SealError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SealError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SealError::Io(format!("Failed to sync data: {}", e)))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(format!(".{:016x}.tmp", OsRng.next_u64()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_input(temp_dir.path().join("missing.txt"));
        assert!(matches!(result, Err(SealError::InputReadFailed(_))));
    }

    #[test]
    fn test_read_directory_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_input(temp_dir.path());
        assert!(matches!(result, Err(SealError::InputReadFailed(_))));
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");

        write_bytes_atomic(&path, b"payload", false).unwrap();
        assert_eq!(read_input(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");

        write_bytes_atomic(&path, b"payload", false).unwrap();

        assert!(path.exists());
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "out.bin")
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
    }

    #[test]
    fn test_unrelated_tmp_file_survives() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");
        let bystander = temp_dir.path().join("out.bin.tmp");
        fs::write(&bystander, b"keep me").unwrap();

        write_bytes_atomic(&path, b"payload", false).unwrap();

        assert_eq!(fs::read(&bystander).unwrap(), b"keep me");
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let path = Path::new("/data/out.bin");
        let a = temp_path_for(path);
        let b = temp_path_for(path);
        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
    }

    #[test]
    fn test_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");
        fs::write(&path, b"original").unwrap();

        let result = write_bytes_atomic(&path, b"new", false);
        assert!(matches!(result, Err(SealError::Validation(_))));
        assert_eq!(fs::read(&path).unwrap(), b"original");

        write_bytes_atomic(&path, b"new", true).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.bin");

        write_bytes_atomic(&path, b"x", false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\doc.txt"), "doc.txt");
        assert_eq!(sanitize_file_name(".."), "decrypted.bin");
        assert_eq!(sanitize_file_name("dir/"), "decrypted.bin");
        assert_eq!(sanitize_file_name(""), "decrypted.bin");
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/a/b.txt")).unwrap(), "b.txt");
        assert!(file_name_of(Path::new("/")).is_err());
    }
}
