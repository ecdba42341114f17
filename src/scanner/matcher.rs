//! Companion file matching.

use super::SourceFile;

/// Select the companions belonging to a video.
///
/// A candidate belongs to the video when its base name starts with the
/// video's base name. The comparison is case-sensitive with no separator
/// normalization, so `Show S01E01 [en].srt` matches `Show S01E01.mkv` but
/// `Show S01E1.aac` does not. Candidate order is preserved.
pub fn match_companions<'a>(video_base_name: &str, candidates: &'a [SourceFile]) -> Vec<&'a SourceFile> {
    candidates
        .iter()
        .filter(|candidate| candidate.base_name.starts_with(video_base_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<SourceFile> {
        names
            .iter()
            .map(|name| SourceFile::from_path(format!("/src/{name}")).unwrap())
            .collect()
    }

    fn names(matched: &[&SourceFile]) -> Vec<String> {
        matched.iter().map(|f| f.file_name()).collect()
    }

    #[test]
    fn test_prefix_match() {
        let pool = files(&["Show S01E01.aac", "Show S01E01 [en].srt", "Show S01E1.aac"]);
        let matched = match_companions("Show S01E01", &pool);
        assert_eq!(names(&matched), vec!["Show S01E01.aac", "Show S01E01 [en].srt"]);
    }

    #[test]
    fn test_case_sensitive() {
        let pool = files(&["show s01e01.aac"]);
        assert!(match_companions("Show S01E01", &pool).is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let pool = files(&["Movie [ta].aac", "Other.aac", "Movie.aac", "Movie [en].aac"]);
        let matched = match_companions("Movie", &pool);
        assert_eq!(
            names(&matched),
            vec!["Movie [ta].aac", "Movie.aac", "Movie [en].aac"]
        );
    }

    #[test]
    fn test_empty_pool() {
        assert!(match_companions("Movie", &[]).is_empty());
    }

    #[test]
    fn test_episode_prefix_overlap() {
        // Plain prefix matching: episode 1 also claims episode 10's companions.
        let pool = files(&["Show E1.srt", "Show E10.srt"]);
        assert_eq!(match_companions("Show E1", &pool).len(), 2);
        assert_eq!(match_companions("Show E10", &pool).len(), 1);
    }
}
