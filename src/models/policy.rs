//! Note rewrite policies
//!
//! Exactly one policy is active per run. The policy decides, per
//! transaction, what the notes should become; the rewriter service applies
//! the decision.

use regex::{Regex, RegexBuilder};

/// Marker used to tag and untag notes
pub const TEST_PREFIX: &str = "[test] ";

/// What to do with each transaction's notes
#[derive(Debug, Clone)]
pub enum NotePolicy {
    /// Prefix notes with the marker unless already present
    AddPrefix,
    /// Strip one leading marker if present
    RemovePrefix,
    /// Prepend `prepend + " "` to every note not matching `exclude`
    PrependWithExclusion { exclude: Regex, prepend: String },
    /// Print every transaction verbatim, change nothing
    FullDump,
}

/// Outcome of evaluating a policy against one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteDecision {
    /// Notes stay as they are
    Keep,
    /// Notes matched the exclusion pattern
    Excluded,
    /// Notes become the contained value
    Rewrite(String),
}

impl NotePolicy {
    /// Short name used in progress output
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPrefix => "add-prefix",
            Self::RemovePrefix => "remove-prefix",
            Self::PrependWithExclusion { .. } => "prepend-with-exclusion",
            Self::FullDump => "full-dump",
        }
    }

    /// Whether this policy can ever produce an update
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::FullDump)
    }

    /// Decide the new notes for `notes` (absent notes must already be `""`)
    ///
    /// Prepending is not idempotent: running it twice prepends twice.
    pub fn decide(&self, notes: &str) -> NoteDecision {
        match self {
            Self::AddPrefix => {
                if notes.starts_with(TEST_PREFIX) {
                    NoteDecision::Keep
                } else {
                    NoteDecision::Rewrite(format!("{}{}", TEST_PREFIX, notes))
                }
            }
            Self::RemovePrefix => match notes.strip_prefix(TEST_PREFIX) {
                Some(rest) => NoteDecision::Rewrite(rest.to_string()),
                None => NoteDecision::Keep,
            },
            Self::PrependWithExclusion { exclude, prepend } => {
                if exclude.is_match(notes) {
                    NoteDecision::Excluded
                } else {
                    NoteDecision::Rewrite(format!("{} {}", prepend, notes))
                }
            }
            Self::FullDump => NoteDecision::Keep,
        }
    }
}

/// Options shared by every rewrite run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Report pending updates without submitting them
    pub dry_run: bool,
}

/// Parse an exclusion pattern
///
/// Accepts a delimited literal `/pattern/flags` or a bare pattern. Flags:
/// `i` case-insensitive, `m` multi-line, `s` dot matches newline, `u`
/// unicode (always on); `g` and `y` have no meaning for a single match and
/// are ignored.
pub fn parse_exclude_pattern(input: &str) -> Result<Regex, String> {
    let (pattern, flags) = match split_delimited(input) {
        Some(parts) => parts,
        None => (input, ""),
    };

    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' | 'g' | 'y' => {}
            other => return Err(format!("Invalid regex flag '{}'", other)),
        }
    }

    builder
        .build()
        .map_err(|e| format!("Invalid regex pattern: {}", e))
}

fn split_delimited(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('/')?;
    let close = body.rfind('/')?;
    let (pattern, flags) = (&body[..close], &body[close + 1..]);
    if pattern.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((pattern, flags))
}
