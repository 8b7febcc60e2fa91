// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Glob (pathname) expansion for shell words.
//!
//! Implements POSIX-style glob expansion where unquoted metacharacters (`*`, `?`, `[...]`)
//! are expanded against the filesystem. Quoted strings suppress glob expansion.

use std::path::Path;

/// Configuration for glob expansion behavior.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GlobConfig {
    /// If true, return empty vec when no matches (like bash nullglob).
    /// If false, return literal pattern when no matches (default POSIX).
    pub nullglob: bool,
}

/// Track which character positions in an expanded string are glob-eligible.
///
/// When a word contains a mix of quoted and unquoted parts, or variables and literals,
/// we need to track which characters came from unquoted material so we know which
/// glob metacharacters should actually trigger expansion.
#[derive(Debug, Default)]
pub(crate) struct GlobEligibility {
    /// The assembled text from all word parts.
    pub text: String,
    /// True at index `i` if the byte at position `i` can trigger glob expansion.
    eligible: Vec<bool>,
}

impl GlobEligibility {
    /// Create a new empty eligibility tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text that IS eligible for glob expansion (from unquoted material).
    pub fn push_eligible(&mut self, s: &str) {
        self.text.push_str(s);
        self.eligible.extend(std::iter::repeat_n(true, s.len()));
    }

    /// Append text that is NOT eligible for glob expansion (quoted material).
    pub fn push_ineligible(&mut self, s: &str) {
        self.text.push_str(s);
        self.eligible.extend(std::iter::repeat_n(false, s.len()));
    }

    /// Append text with a precomputed per-byte eligibility mask.
    pub fn push_masked(&mut self, s: &str, mask: &[bool]) {
        self.text.push_str(s);
        for i in 0..s.len() {
            self.eligible.push(mask.get(i).copied().unwrap_or(false));
        }
    }

    /// Append a single glob-eligible character.
    pub fn push_eligible_char(&mut self, ch: char) {
        let start = self.text.len();
        self.text.push(ch);
        self.eligible.extend(std::iter::repeat_n(true, self.text.len() - start));
    }

    /// Check if the text contains any glob-eligible metacharacters.
    pub fn has_glob_pattern(&self) -> bool {
        self.text.bytes().enumerate().any(|(i, b)| {
            self.eligible.get(i).copied().unwrap_or(false) && matches!(b, b'*' | b'?' | b'[')
        })
    }
}

/// Process backslash escapes in unquoted text for glob eligibility.
///
/// Returns (processed_text, per-byte eligibility). Escaped glob metacharacters
/// (`\*`, `\?`, `\[`, `\\`) become literal and ineligible; all else is eligible.
pub(crate) fn process_glob_escapes(s: &str) -> (String, Vec<bool>) {
    let mut text = String::new();
    let mut eligible = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '*' | '?' | '[' | '\\') {
                    chars.next();
                    text.push(next);
                    eligible.extend(std::iter::repeat_n(false, next.len_utf8()));
                    continue;
                }
            }
        }
        text.push(ch);
        eligible.extend(std::iter::repeat_n(true, ch.len_utf8()));
    }

    (text, eligible)
}

/// Check if a pattern's filename component starts with a dot.
///
/// This is used to determine if hidden files should be included in matches.
fn pattern_matches_hidden(pattern: &str) -> bool {
    Path::new(pattern)
        .file_name()
        .and_then(|f| f.to_str())
        .map(|f| f.starts_with('.'))
        .unwrap_or(false)
}

/// Expand a glob pattern against the filesystem.
///
/// Relative patterns are resolved against `cwd`, and matches are returned
/// relative to it, lexicographically sorted. If nothing matches:
/// - with `nullglob: true`: returns an empty vector
/// - with `nullglob: false` (POSIX default): returns the original pattern
///
/// A pattern that does not compile (`[]`, unclosed bracket) stays literal.
pub(crate) fn expand_glob_pattern(pattern: &str, cwd: &Path, config: &GlobConfig) -> Vec<String> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        cwd.join(pattern).to_string_lossy().into_owned()
    };

    // POSIX: patterns starting with . match hidden files, others don't.
    let include_hidden = pattern_matches_hidden(pattern);

    let Ok(paths) = glob::glob(&full_pattern) else {
        return vec![pattern.to_string()];
    };

    let mut matches: Vec<String> = paths
        // Skip paths that had errors (e.g., permission denied)
        .filter_map(|result| result.ok())
        .filter_map(|path| {
            let relative = if let Ok(rel) = path.strip_prefix(cwd) {
                rel.to_string_lossy().into_owned()
            } else {
                path.to_string_lossy().into_owned()
            };

            // Filter hidden files unless the pattern explicitly matches them
            if !include_hidden {
                if let Some(filename) = Path::new(&relative).file_name() {
                    if filename.to_string_lossy().starts_with('.') {
                        return None;
                    }
                }
            }

            Some(relative)
        })
        .collect();

    // Sort results lexicographically (POSIX requirement)
    matches.sort();

    if matches.is_empty() && !config.nullglob {
        vec![pattern.to_string()]
    } else {
        matches
    }
}

#[cfg(test)]
#[path = "expand_glob_tests.rs"]
mod tests;
