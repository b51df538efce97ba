//! Candidate detail overlay.

use crate::types::Candidate;

/// The single detail overlay slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CandidateOverlay {
    #[default]
    Closed,
    /// Waiting for the detailed profile; summary fields are shown meanwhile
    Loading { summary: Candidate },
    Ready {
        candidate: Candidate,
        /// False when the profile fetch failed and the summary is shown
        detailed: bool,
    },
}

impl CandidateOverlay {
    /// Open the overlay for a candidate, replacing whatever was shown.
    pub fn open(&mut self, summary: Candidate) {
        *self = Self::Loading { summary };
    }

    /// Settle a pending profile fetch.
    ///
    /// `None` falls back to the summary already on screen. Returns false if
    /// the overlay has since been closed or moved to another candidate.
    pub fn resolve(&mut self, candidate_id: &str, profile: Option<Candidate>) -> bool {
        let Self::Loading { summary } = self else {
            return false;
        };
        if summary.id != candidate_id {
            return false;
        }
        *self = match profile {
            Some(mut candidate) => {
                // Profiles don't carry the per-job score.
                if candidate.match_score.is_none() {
                    candidate.match_score = summary.match_score;
                }
                Self::Ready {
                    candidate,
                    detailed: true,
                }
            }
            None => Self::Ready {
                candidate: std::mem::take(summary),
                detailed: false,
            },
        };
        true
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Candidate currently shown.
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Closed => None,
            Self::Loading { summary } => Some(summary),
            Self::Ready { candidate, .. } => Some(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkExperience;

    fn summary(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Candidate {id}"),
            match_score: Some(0.8),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_shows_loading_summary() {
        let mut overlay = CandidateOverlay::default();
        assert!(!overlay.is_open());
        overlay.open(summary("c1"));
        assert!(overlay.is_loading());
        assert_eq!(overlay.candidate().unwrap().name, "Candidate c1");
    }

    #[test]
    fn test_resolve_with_profile() {
        let mut overlay = CandidateOverlay::default();
        overlay.open(summary("c1"));
        let profile = Candidate {
            id: "c1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            experience: vec![WorkExperience {
                title: Some("Engineer".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(overlay.resolve("c1", Some(profile)));
        match &overlay {
            CandidateOverlay::Ready {
                candidate,
                detailed,
            } => {
                assert!(*detailed);
                assert_eq!(candidate.email.as_deref(), Some("ada@example.com"));
                assert_eq!(candidate.match_score, Some(0.8));
            }
            other => panic!("unexpected overlay state: {other:?}"),
        }
    }

    #[test]
    fn test_failed_fetch_falls_back_to_summary() {
        let mut overlay = CandidateOverlay::default();
        overlay.open(summary("c1"));
        assert!(overlay.resolve("c1", None));
        assert_eq!(
            overlay,
            CandidateOverlay::Ready {
                candidate: summary("c1"),
                detailed: false
            }
        );
        assert!(!overlay.candidate().unwrap().has_contact_details());
    }

    #[test]
    fn test_second_open_replaces_first() {
        let mut overlay = CandidateOverlay::default();
        overlay.open(summary("c1"));
        overlay.open(summary("c2"));
        // The late answer for c1 must not overwrite c2.
        assert!(!overlay.resolve("c1", None));
        assert_eq!(overlay.candidate().unwrap().id, "c2");
        assert!(overlay.is_loading());
    }

    #[test]
    fn test_resolve_after_close_ignored() {
        let mut overlay = CandidateOverlay::default();
        overlay.open(summary("c1"));
        overlay.close();
        assert!(!overlay.resolve("c1", Some(summary("c1"))));
        assert!(!overlay.is_open());
    }
}
