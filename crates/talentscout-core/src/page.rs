//! Candidate table pagination and row projection.

use crate::platform::{PlatformStyle, platform_style};
use crate::types::{Candidate, MatchedCandidate};
use std::collections::HashSet;

/// Candidates shown per table page.
pub const PAGE_SIZE: usize = 5;

/// Skills shown inline per row before collapsing into a "+N" tag.
pub const SKILLS_PER_ROW: usize = 5;

/// What to do with a remembered page number that no longer exists,
/// e.g. after a re-run returned fewer candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePagePolicy {
    /// Move to the last valid page
    #[default]
    Clamp,
    /// Go back to the first page
    Reset,
    /// Keep the number; the page renders empty
    Keep,
}

impl StalePagePolicy {
    /// Resolve a stored page number against the current page count.
    pub fn resolve(&self, page: usize, total_pages: usize) -> usize {
        let page = page.max(1);
        let last = total_pages.max(1);
        if page <= last {
            return page;
        }
        match self {
            Self::Clamp => last,
            Self::Reset => 1,
            Self::Keep => page,
        }
    }
}

/// Number of pages needed for `count` candidates.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// One skill tag in a candidate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTag<'a> {
    pub name: &'a str,
    /// The skill is one the backend matched against the job
    pub matched: bool,
}

/// A rendered candidate table row.
#[derive(Debug, Clone)]
pub struct CandidateRow<'a> {
    pub rank: u32,
    pub candidate: &'a Candidate,
    pub skills: Vec<SkillTag<'a>>,
    /// Skills beyond [`SKILLS_PER_ROW`]
    pub hidden_skills: usize,
    pub top_3: bool,
    pub score_percent: u32,
    pub platform: PlatformStyle,
}

impl<'a> CandidateRow<'a> {
    /// Project one ranked candidate. `position` is its 0-based index in the
    /// full candidate list.
    pub fn new(matched: &'a MatchedCandidate, position: usize) -> Self {
        let candidate = &matched.candidate;
        let matched_lower: HashSet<String> = matched
            .matched_skills()
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let skills = candidate
            .skills
            .iter()
            .take(SKILLS_PER_ROW)
            .map(|skill| SkillTag {
                name: skill.as_str(),
                matched: matched_lower.contains(&skill.to_lowercase()),
            })
            .collect();

        let rank = matched
            .match_breakdown
            .as_ref()
            .and_then(|b| b.rank)
            .filter(|r| *r > 0)
            .unwrap_or(position as u32 + 1);

        Self {
            rank,
            candidate,
            skills,
            hidden_skills: candidate.skills.len().saturating_sub(SKILLS_PER_ROW),
            top_3: matched.is_top_3(),
            score_percent: matched.score_percent(),
            platform: platform_style(candidate.platform()),
        }
    }
}

/// One page of a job's candidate table.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// 1-based page number actually shown
    pub number: usize,
    pub total_pages: usize,
    /// Index of the first row in the full list
    pub start: usize,
    pub rows: Vec<CandidateRow<'a>>,
}

impl<'a> Page<'a> {
    /// Slice `candidates` for the stored page number.
    pub fn build(candidates: &'a [MatchedCandidate], page: usize, policy: StalePagePolicy) -> Self {
        let total_pages = total_pages(candidates.len());
        let number = policy.resolve(page, total_pages);
        let start = (number - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(candidates.len());

        let rows = candidates
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map(|(i, matched)| CandidateRow::new(matched, start + i))
            .collect();

        Self {
            number,
            total_pages,
            start,
            rows,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Previous/Next controls are only drawn for multi-page tables.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// "Page p of n" label.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.number, self.total_pages)
    }
}
