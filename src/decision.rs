//! Label decision logic - decides whether to label a pull request and with what.
//!
//! Pure functions only: the version is already read, the changed files are
//! already fetched. Nothing here touches the network or the filesystem.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{LabelerError, Result};

/// Placeholder substituted with the version string in a label template
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Compiled `changed-files` glob
#[derive(Debug, Clone)]
pub struct ChangedFilesPattern {
    pattern: String,
    matcher: GlobMatcher,
    negated: bool,
}

impl ChangedFilesPattern {
    /// Compile a glob pattern.
    ///
    /// An empty (or whitespace-only) pattern means no filtering was requested
    /// and yields `Ok(None)`. `*` and `?` stay within one path segment, `**`
    /// crosses separators. Leading `!`s negate the pattern, an odd count
    /// matching every path the rest of the pattern does not.
    ///
    /// # Returns
    /// * `Ok(Some(pattern))` - Compiled pattern
    /// * `Ok(None)` - No pattern given
    /// * `Err` - If the glob syntax is malformed
    pub fn parse(pattern: &str) -> Result<Option<Self>> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(None);
        }

        let body = pattern.trim_start_matches('!');
        let negated = (pattern.len() - body.len()) % 2 == 1;

        let glob = GlobBuilder::new(body)
            .literal_separator(true)
            .build()
            .map_err(|e| LabelerError::pattern(pattern, e))?;

        Ok(Some(ChangedFilesPattern {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            negated,
        }))
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match a single repository-relative path
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path) != self.negated
    }

    /// True if at least one path matches; false for an empty list
    pub fn matches_any<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        paths.iter().any(|p| self.is_match(p.as_ref()))
    }

    /// Paths that match, in input order
    pub fn matching<'a, S: AsRef<str>>(&self, paths: &'a [S]) -> Vec<&'a str> {
        paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| self.is_match(p))
            .collect()
    }
}

/// Label naming template (e.g. "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormat {
    pub template: String,
}

impl LabelFormat {
    /// Create a new label format
    pub fn new(template: impl Into<String>) -> Self {
        LabelFormat {
            template: template.into(),
        }
    }

    /// Substitute the first `{version}` occurrence.
    /// Example: template="v{version}-release", version="1.2.3" -> "v1.2.3-release"
    pub fn format(&self, version: &str) -> String {
        self.template.replacen(VERSION_PLACEHOLDER, version, 1)
    }
}

/// Outcome of [`decide`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecision {
    pub should_apply: bool,
    pub label: String,
}

/// Decide whether to label and compute the label text.
///
/// The label text depends only on `version` and `template`; whether it is
/// applied depends only on `changed_files` and `pattern`.
///
/// # Arguments
/// * `version` - Version string read from the properties file
/// * `changed_files` - Files touched by the pull request (ignored without a pattern)
/// * `pattern` - Optional changed-files filter
/// * `template` - Optional label template; empty is treated as absent
pub fn decide<S: AsRef<str>>(
    version: &str,
    changed_files: &[S],
    pattern: Option<&ChangedFilesPattern>,
    template: Option<&str>,
) -> LabelDecision {
    let should_apply = match pattern {
        Some(pattern) => pattern.matches_any(changed_files),
        None => true,
    };

    let label = match template {
        Some(t) if !t.is_empty() => LabelFormat::new(t).format(version),
        _ => version.to_string(),
    };

    LabelDecision {
        should_apply,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FILES: [&str; 0] = [];

    fn pattern(p: &str) -> ChangedFilesPattern {
        ChangedFilesPattern::parse(p).unwrap().unwrap()
    }

    #[test]
    fn test_no_pattern_always_applies() {
        let decision = decide("1.2.3", &["docs/readme.md"], None, None);
        assert!(decision.should_apply);

        let decision = decide("1.2.3", &NO_FILES, None, None);
        assert!(decision.should_apply);
    }

    #[test]
    fn test_empty_pattern_is_absent() {
        assert!(ChangedFilesPattern::parse("").unwrap().is_none());
        assert!(ChangedFilesPattern::parse("   ").unwrap().is_none());
    }

    #[test]
    fn test_pattern_with_no_files_does_not_apply() {
        let p = pattern("**");
        let decision = decide("1.2.3", &NO_FILES, Some(&p), None);
        assert!(!decision.should_apply);
        assert_eq!(decision.label, "1.2.3");
    }

    #[test]
    fn test_pattern_matches_any_file() {
        let files = ["src/a.txt", "docs/readme.md"];
        let p = pattern("src/**");
        assert!(decide("1.2.3", &files, Some(&p), None).should_apply);

        let p = pattern("docs/**");
        assert!(!decide("1.2.3", &["src/a.txt"], Some(&p), None).should_apply);
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let p = pattern("app/*.kt");
        assert!(p.is_match("app/Main.kt"));
        assert!(!p.is_match("app/src/Main.kt"));

        let p = pattern("app/**/*.kt");
        assert!(p.is_match("app/src/main/Main.kt"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let p = pattern("src/**");
        assert!(!p.is_match("SRC/a.txt"));
    }

    #[test]
    fn test_brace_alternation_and_classes() {
        let p = pattern("{app,lib}/**/*.gradle");
        assert!(p.is_match("lib/build.gradle"));
        assert!(!p.is_match("docs/build.gradle"));

        let p = pattern("v[0-9].txt");
        assert!(p.is_match("v1.txt"));
        assert!(!p.is_match("va.txt"));
    }

    #[test]
    fn test_leading_bang_negates() {
        let p = pattern("!docs/**");
        assert!(p.is_match("src/a.rs"));
        assert!(!p.is_match("docs/readme.md"));
        assert_eq!(p.as_str(), "!docs/**");

        let only_docs = ["docs/readme.md"];
        assert!(!decide("1.0", &only_docs, Some(&p), None).should_apply);
        assert!(decide("1.0", &["docs/readme.md", "src/a.rs"], Some(&p), None).should_apply);
        assert!(!decide("1.0", &NO_FILES, Some(&p), None).should_apply);
    }

    #[test]
    fn test_double_bang_cancels_out() {
        let p = pattern("!!docs/**");
        assert!(p.is_match("docs/readme.md"));
        assert!(!p.is_match("src/a.rs"));
    }

    #[test]
    fn test_malformed_negated_pattern_is_error() {
        let err = ChangedFilesPattern::parse("!src/[abc").unwrap_err();
        assert!(err.to_string().contains("'!src/[abc'"));
    }

    #[test]
    fn test_malformed_pattern_is_error() {
        let err = ChangedFilesPattern::parse("src/[abc").unwrap_err();
        assert!(matches!(err, LabelerError::Pattern { .. }));
    }

    #[test]
    fn test_matching_returns_subset_in_order() {
        let files = vec![
            "src/b.rs".to_string(),
            "README.md".to_string(),
            "src/a.rs".to_string(),
        ];
        let p = pattern("src/*.rs");
        assert_eq!(p.matching(&files), vec!["src/b.rs", "src/a.rs"]);
    }

    #[test]
    fn test_template_substitution() {
        let decision = decide("1.2.3", &NO_FILES, None, Some("v{version}-release"));
        assert_eq!(decision.label, "v1.2.3-release");
    }

    #[test]
    fn test_no_template_uses_version() {
        assert_eq!(decide("1.2.3", &NO_FILES, None, None).label, "1.2.3");
        assert_eq!(decide("1.2.3", &NO_FILES, None, Some("")).label, "1.2.3");
    }

    #[test]
    fn test_template_without_placeholder_is_verbatim() {
        let decision = decide("2.0.0", &NO_FILES, None, Some("stable"));
        assert_eq!(decision.label, "stable");
    }

    #[test]
    fn test_only_first_placeholder_replaced() {
        let format = LabelFormat::new("{version}/{version}");
        assert_eq!(format.format("3.1"), "3.1/{version}");
    }

    #[test]
    fn test_label_independent_of_should_apply() {
        let p = pattern("docs/**");
        let applied = decide("4.0.0", &["docs/a.md"], Some(&p), Some("v{version}"));
        let skipped = decide("4.0.0", &["src/a.rs"], Some(&p), Some("v{version}"));
        assert!(applied.should_apply);
        assert!(!skipped.should_apply);
        assert_eq!(applied.label, skipped.label);
    }

    #[test]
    fn test_decide_is_repeatable() {
        let p = pattern("src/**");
        let files = ["src/lib.rs"];
        let first = decide("1.0", &files, Some(&p), Some("v{version}"));
        let second = decide("1.0", &files, Some(&p), Some("v{version}"));
        assert_eq!(first, second);
    }
}
