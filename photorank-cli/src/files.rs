//! Folder scanning, rejected-file relocation, progress persistence,
//! and percentile-folder export.
//!
//! All the filesystem plumbing the core deliberately does not do.
//! Identifiers are bare file names within the session folder.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use photorank_core::SessionRecord;

/// Scan `folder` for image files matching `extensions`
/// (case-insensitive), non-recursive. Names come back sorted so the
/// live-set order is reproducible across runs.
pub fn scan_images(folder: &Path, extensions: &[String]) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_image_extension(&name, extensions) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        }
        _ => false,
    }
}

/// File names already sitting in the rejection directory. Empty set if
/// the directory does not exist yet.
pub fn scan_rejected(rejected_dir: &Path) -> io::Result<HashSet<String>> {
    let mut names = HashSet::new();
    let entries = match fs::read_dir(rejected_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e),
    };
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Move a rejected image out of the working folder.
pub fn move_to_rejected(folder: &Path, rejected_dir: &Path, name: &str) -> io::Result<()> {
    fs::create_dir_all(rejected_dir)?;
    fs::rename(folder.join(name), rejected_dir.join(name))
}

/// Load a saved session record, `None` if no progress file exists.
pub fn load_progress(path: &Path) -> io::Result<Option<SessionRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let record = serde_json::from_str(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(record))
}

/// Write the session record as JSON.
pub fn save_progress(path: &Path, record: &SessionRecord) -> io::Result<()> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Export folder name for a category: e.g. "rated_5" for the top 20%.
pub fn category_folder(prefix: &str, category: u8) -> String {
    format!("{prefix}_{category}")
}

/// Copy every image into its category folder under `folder`. Images
/// whose source file has vanished are skipped with a note; the export
/// keeps going. Returns the number of files copied.
pub fn export_categories(
    folder: &Path,
    prefix: &str,
    categories: &HashMap<String, u8>,
) -> io::Result<usize> {
    for category in 1..=5u8 {
        fs::create_dir_all(folder.join(category_folder(prefix, category)))?;
    }

    let mut copied = 0;
    for (name, category) in categories {
        let src: PathBuf = folder.join(name);
        if !src.exists() {
            eprintln!("File not found: {}. Skipping copy.", src.display());
            continue;
        }
        let dst = folder.join(category_folder(prefix, *category)).join(name);
        fs::copy(&src, &dst)?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photorank_core::SessionState;

    fn exts() -> Vec<String> {
        crate::config::DEFAULT_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_extension_filter() {
        let extensions = exts();
        assert!(has_image_extension("photo.JPG", &extensions));
        assert!(has_image_extension("a.b.png", &extensions));
        assert!(!has_image_extension("notes.txt", &extensions));
        assert!(!has_image_extension("no_extension", &extensions));
        assert!(!has_image_extension(".gif", &extensions));
    }

    #[test]
    fn test_scan_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.png", "skip.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let names = scan_images(dir.path(), &exts()).unwrap();
        assert_eq!(names, vec!["a.png".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn test_scan_rejected_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = scan_rejected(&dir.path().join("rejected")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_move_to_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let rejected = dir.path().join("rejected");
        fs::write(dir.path().join("bad.jpg"), b"x").unwrap();

        move_to_rejected(dir.path(), &rejected, "bad.jpg").unwrap();
        assert!(!dir.path().join("bad.jpg").exists());
        assert!(rejected.join("bad.jpg").exists());
        assert_eq!(
            scan_rejected(&rejected).unwrap(),
            HashSet::from(["bad.jpg".to_string()])
        );
    }

    #[test]
    fn test_progress_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        assert!(load_progress(&path).unwrap().is_none());

        let session = SessionState::new(
            "trip",
            vec!["a.jpg".to_string(), "b.jpg".to_string()],
        );
        let record = session.snapshot();
        save_progress(&path, &record).unwrap();

        let loaded = load_progress(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_export_copies_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.jpg"), b"x").unwrap();

        let categories = HashMap::from([
            ("top.jpg".to_string(), 5u8),
            ("vanished.jpg".to_string(), 1u8),
        ]);
        let copied = export_categories(dir.path(), "rated", &categories).unwrap();

        assert_eq!(copied, 1);
        assert!(dir.path().join("rated_5").join("top.jpg").exists());
        assert!(dir.path().join("rated_1").exists());
        assert!(!dir.path().join("rated_1").join("vanished.jpg").exists());
    }
}
