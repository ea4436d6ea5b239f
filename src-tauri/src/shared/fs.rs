//! Usage: Small filesystem helpers shared across infra adapters (atomic writes, optional reads).

use std::path::Path;

pub(crate) fn read_optional_file(path: &Path) -> Result<Option<Vec<u8>>, String> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read(path)
        .map(Some)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))
}

pub(crate) fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create dir {}: {e}", parent.display()))?;
        }
    }

    let file_name = path.file_name().and_then(|v| v.to_str()).unwrap_or("file");
    let tmp_path = path.with_file_name(format!("{file_name}.shell-tmp"));

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write temp file {}: {e}", tmp_path.display()))?;

    // Windows rename requires target not to exist; elsewhere rename replaces it.
    #[cfg(windows)]
    let target_removed = path.exists() && std::fs::remove_file(path).is_ok();
    #[cfg(not(windows))]
    let target_removed = false;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // With the target gone the temp file is the only copy left on disk.
        if !target_removed {
            let _ = std::fs::remove_file(&tmp_path);
        }
        return Err(format!("failed to finalize file {}: {e}", path.display()));
    }

    Ok(())
}

/// Pretty JSON (2-space indent) with a trailing newline, the on-disk form of every JSON file we write.
pub(crate) fn json_to_bytes(value: &serde_json::Value, hint: &str) -> Result<Vec<u8>, String> {
    let mut out =
        serde_json::to_vec_pretty(value).map_err(|e| format!("failed to serialize {hint}: {e}"))?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
pub(crate) fn unique_tmp_dir(tag: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TMP_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    let seq = TMP_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "desktop_shell_{tag}_test_{nanos}_{}_{}",
        std::process::id(),
        seq
    ));
    std::fs::create_dir_all(&dir).expect("create tmp dir");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_tmp_dir_is_unique_across_calls() {
        let a = unique_tmp_dir("fs");
        let b = unique_tmp_dir("fs");
        assert_ne!(a, b);
        let _ = std::fs::remove_dir_all(&a);
        let _ = std::fs::remove_dir_all(&b);
    }

    #[test]
    fn read_optional_file_missing_is_none() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("missing.txt");
        let out = read_optional_file(&path).expect("read_optional_file");
        assert!(out.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_file_atomic_creates_parent_and_replaces_existing() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("a").join("b").join("file.txt");
        write_file_atomic(&path, b"hello").expect("first write");
        write_file_atomic(&path, b"world").expect("second write");
        let got = read_optional_file(&path)
            .expect("read_optional_file")
            .expect("file exists");
        assert_eq!(got, b"world");
        assert!(!dir.join("a").join("b").join("file.txt.shell-tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_rename_leaves_existing_target_in_place() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("settings.json");
        std::fs::create_dir_all(path.join("occupied")).expect("create blocking dir");

        let err = write_file_atomic(&path, b"{}").expect_err("rename onto a non-empty dir");

        assert!(err.contains("failed to finalize"));
        assert!(path.join("occupied").is_dir());
        assert!(!dir.join("settings.json.shell-tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_to_bytes_uses_two_space_indent_and_trailing_newline() {
        let bytes = json_to_bytes(&serde_json::json!({ "a": { "b": 1 } }), "test").expect("json");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": 1\n  }\n}\n");
    }
}
