//! Validation and correction of AI-suggested line numbers.
//!
//! Suggested line numbers are frequently off by a few lines (the model counts
//! from an annotated diff, not the real file). The functions here either
//! confirm a requested line, snap it to the nearest valid one within a
//! severity-scaled radius, or reject it. A rejected suggestion must be
//! dropped by the caller: a wrong-line comment is worse than a missing one.

use crate::model::{DiffLineKind, DiffLineMapping};
use crate::parser::{has_change_within, CHANGED_SECTION_RADIUS};
use log::debug;

/// Default search distance for [`find_nearest_valid_line`].
pub const DEFAULT_MAX_DISTANCE: u32 = 5;

/// Severity of a review finding, ordered most to least severe.
///
/// The severity scales how far line correction may move a comment: the more
/// severe the finding, the tighter the comment must stay to the flagged line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Major,
    #[default]
    Minor,
    Info,
}

impl Severity {
    /// Search radius used by [`suggest_best_comment_line`].
    pub fn search_radius(&self) -> u32 {
        match self {
            Severity::Critical => 3,
            Severity::Major => 5,
            Severity::Minor => 7,
            Severity::Info => 10,
        }
    }

    /// Parse a severity keyword; anything unrecognized falls into the
    /// widest-radius bucket.
    pub fn from_key(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            _ => Severity::Info,
        }
    }

    /// Lowercase keyword form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Info => "info",
        }
    }
}

/// A validated, inclusive new-file line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a single-point range.
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Whether this range spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.start != self.end
    }
}

/// Find the closest commentable new-file line to `requested`.
///
/// An exact, non-deleted match wins immediately. Otherwise candidates are the
/// new-file lines of added/unchanged entries, scanned in ascending order; a
/// candidate replaces the current best only on strictly smaller distance, so
/// the smaller line number wins distance ties. Candidates further than
/// `max_distance` are rejected.
pub fn find_nearest_valid_line(
    lines: &[DiffLineMapping],
    requested: u32,
    max_distance: u32,
) -> Option<u32> {
    let exact = lines
        .iter()
        .any(|m| m.new_line == Some(requested) && m.kind != DiffLineKind::Deleted);
    if exact {
        return Some(requested);
    }

    let mut candidates: Vec<u32> = lines
        .iter()
        .filter(|m| matches!(m.kind, DiffLineKind::Added | DiffLineKind::Unchanged))
        .filter_map(|m| m.new_line)
        .collect();
    candidates.sort_unstable();

    let mut best: Option<(u32, u32)> = None; // (line, distance)
    for candidate in candidates {
        let distance = candidate.abs_diff(requested);
        if distance > max_distance {
            continue;
        }
        // Strict < keeps the earlier (smaller) candidate on equal distance.
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(line, _)| line)
}

/// Validate a requested line range against the mapping.
///
/// The start must resolve (within [`DEFAULT_MAX_DISTANCE`]) or the whole
/// range is rejected. A missing or equal end yields a single-point range; an
/// end that fails to resolve collapses the range to its start; a resolved
/// range with start after end is swapped.
pub fn validate_line_range(
    lines: &[DiffLineMapping],
    start: u32,
    end: Option<u32>,
) -> Option<LineRange> {
    let resolved_start = find_nearest_valid_line(lines, start, DEFAULT_MAX_DISTANCE)?;

    let end = match end {
        None => return Some(LineRange::single(resolved_start)),
        Some(e) if e == start => return Some(LineRange::single(resolved_start)),
        Some(e) => e,
    };

    match find_nearest_valid_line(lines, end, DEFAULT_MAX_DISTANCE) {
        None => Some(LineRange::single(resolved_start)),
        Some(resolved_end) if resolved_start > resolved_end => Some(LineRange {
            start: resolved_end,
            end: resolved_start,
        }),
        Some(resolved_end) => Some(LineRange {
            start: resolved_start,
            end: resolved_end,
        }),
    }
}

/// Whether a new-file line may host an inline comment.
///
/// Deleted lines cannot; added lines always can; unchanged lines only when an
/// added/deleted entry sits within 3 lines. Lines absent from the mapping are
/// not commentable.
pub fn is_in_commentable_context(lines: &[DiffLineMapping], line: u32) -> bool {
    let entry = lines.iter().find(|m| m.new_line == Some(line));
    match entry.map(|m| m.kind) {
        Some(DiffLineKind::Added) => true,
        Some(DiffLineKind::Unchanged) => has_change_within(lines, line, CHANGED_SECTION_RADIUS),
        _ => false,
    }
}

/// Pick the best commentable line for a suggestion.
///
/// The requested line is kept whenever it is already commentable. Otherwise
/// the nearest valid line within the severity's radius is tried, and it must
/// itself be commentable. Critical findings that still fail fall back to the
/// first added line anywhere in the mapping so they are never silently
/// dropped; everything else resolves to `None`.
pub fn suggest_best_comment_line(
    lines: &[DiffLineMapping],
    requested: u32,
    severity: Severity,
) -> Option<u32> {
    if is_in_commentable_context(lines, requested) {
        return Some(requested);
    }

    let radius = severity.search_radius();
    if let Some(candidate) = find_nearest_valid_line(lines, requested, radius) {
        if is_in_commentable_context(lines, candidate) {
            debug!(
                "Corrected line {} to nearby commentable line {} (severity {})",
                requested,
                candidate,
                severity.as_str()
            );
            return Some(candidate);
        }
    }

    if severity == Severity::Critical {
        let fallback = lines
            .iter()
            .find(|m| m.kind == DiffLineKind::Added)
            .and_then(|m| m.new_line);
        if let Some(line) = fallback {
            debug!(
                "Critical finding at line {} anchored to first added line {}",
                requested, line
            );
            return Some(line);
        }
    }

    None
}
