//! Output file naming.
//!
//! Names are probed against the destination directory and against the names
//! the current batch has already handed out. Nothing is reserved on disk, so
//! two batches writing into one directory can still collide.

use crate::scanner::SourceFile;
use std::collections::HashSet;
use std::path::Path;

/// Pick a file name in `dest_dir` that no existing entry uses.
///
/// Tries `{base}.{ext}` first, then `{base} (1).{ext}`, `{base} (2).{ext}`
/// and so on. Names in `allocated` count as taken even when nothing exists
/// on disk yet. An empty `extension` produces names without a dot.
///
/// # Example
///
/// ```no_run
/// use trackmux::batch::naming::unique_file_name;
/// use std::path::Path;
///
/// // With "Episode.mkv" already present this returns "Episode (1).mkv".
/// let name = unique_file_name("Episode", "mkv", Path::new("/media/out"), &Default::default());
/// ```
pub fn unique_file_name(
    base: &str,
    extension: &str,
    dest_dir: &Path,
    allocated: &HashSet<String>,
) -> String {
    let candidate = |suffix: &str| {
        if extension.is_empty() {
            format!("{base}{suffix}")
        } else {
            format!("{base}{suffix}.{extension}")
        }
    };

    let mut name = candidate("");
    let mut n = 1u64;
    while allocated.contains(&name) || dest_dir.join(&name).exists() {
        name = candidate(&format!(" ({n})"));
        n += 1;
    }
    name
}

/// Output file name for one video of a batch.
///
/// Without a rename pattern (or with a blank one) the source's file name is
/// kept as is, even if the destination already holds a file by that name.
/// With a pattern the name is made unique in `dest_dir` and among
/// `allocated`, keeping the video's extension.
pub fn output_file_name(
    pattern: Option<&str>,
    video: &SourceFile,
    dest_dir: &Path,
    allocated: &HashSet<String>,
) -> String {
    match pattern.filter(|p| !p.trim().is_empty()) {
        Some(base) => unique_file_name(base, &video.extension, dest_dir, allocated),
        None => video.file_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_free_name_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        assert_eq!(unique_file_name("Movie", "mkv", dir.path(), &none), "Movie.mkv");
    }

    #[test]
    fn test_probes_past_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        fs::write(dir.path().join("Movie.mkv"), b"").unwrap();
        fs::write(dir.path().join("Movie (1).mkv"), b"").unwrap();

        assert_eq!(unique_file_name("Movie", "mkv", dir.path(), &none), "Movie (2).mkv");
    }

    #[test]
    fn test_idempotent_without_writes() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        fs::write(dir.path().join("Movie.mkv"), b"").unwrap();

        let first = unique_file_name("Movie", "mkv", dir.path(), &none);
        let second = unique_file_name("Movie", "mkv", dir.path(), &none);
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_extensions_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        fs::write(dir.path().join("Movie.mp4"), b"").unwrap();
        assert_eq!(unique_file_name("Movie", "mkv", dir.path(), &none), "Movie.mkv");
    }

    #[test]
    fn test_no_extension() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        fs::write(dir.path().join("Movie"), b"").unwrap();
        assert_eq!(unique_file_name("Movie", "", dir.path(), &none), "Movie (1)");
    }

    #[test]
    fn test_output_name_without_pattern_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        fs::write(dir.path().join("Show S01E01.mkv"), b"").unwrap();
        let video = SourceFile::from_path("/src/Show S01E01.mkv").unwrap();

        assert_eq!(output_file_name(None, &video, dir.path(), &none), "Show S01E01.mkv");
        assert_eq!(output_file_name(Some(""), &video, dir.path(), &none), "Show S01E01.mkv");
    }

    #[test]
    fn test_output_name_with_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let none = HashSet::new();
        let video = SourceFile::from_path("/src/ep01.mp4").unwrap();

        assert_eq!(output_file_name(Some("Show"), &video, dir.path(), &none), "Show.mp4");
        fs::write(dir.path().join("Show.mp4"), b"").unwrap();
        assert_eq!(output_file_name(Some("Show"), &video, dir.path(), &none), "Show (1).mp4");
    }

    #[test]
    fn test_allocated_names_count_as_taken() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Movie (1).mkv"), b"").unwrap();
        let allocated = taken(&["Movie.mkv", "Movie (2).mkv"]);

        assert_eq!(
            unique_file_name("Movie", "mkv", dir.path(), &allocated),
            "Movie (3).mkv"
        );
    }

    #[test]
    fn test_allocated_names_ignored_without_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let video = SourceFile::from_path("/src/ep01.mkv").unwrap();
        let allocated = taken(&["ep01.mkv"]);

        assert_eq!(output_file_name(None, &video, dir.path(), &allocated), "ep01.mkv");
    }

    #[test]
    fn test_whitespace_pattern_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let video = SourceFile::from_path("/src/ep01.mkv").unwrap();

        assert_eq!(
            output_file_name(Some("   "), &video, dir.path(), &HashSet::new()),
            "ep01.mkv"
        );
    }
}
