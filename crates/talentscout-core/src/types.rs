//! Job and candidate types as served by the sourcing backend.

use crate::wire;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Still being scraped or matched. Covers `pending` and unknown values.
    #[default]
    Processing,
    /// Finished with results
    Completed,
    /// Backend gave up on the job
    Failed,
}

impl JobStatus {
    /// Map a backend status string. Anything unrecognized is still processing.
    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Processing,
        }
    }

    /// Whether no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Processing => "●",
            Self::Completed => "✓",
            Self::Failed => "✗",
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_wire).unwrap_or_default())
    }
}

/// One entry of a candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A sourced person profile.
///
/// Summary fields are always present in job listings; the contact and
/// history fields are only filled in by a detailed profile fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub id: String,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub name: String,

    #[serde(default)]
    pub current_title: Option<String>,

    #[serde(default, deserialize_with = "wire::skills")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "wire::lenient_u32")]
    pub experience_years: u32,

    #[serde(default)]
    pub location: Option<String>,

    /// Platform the profile was scraped from
    #[serde(default)]
    pub source_portal: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub education: Option<String>,

    #[serde(default)]
    pub profile_url: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    /// Free-text explanation of the match
    #[serde(default)]
    pub reasoning: Option<String>,

    #[serde(default)]
    pub match_score: Option<f64>,

    #[serde(default, deserialize_with = "nullable_experience")]
    pub experience: Vec<WorkExperience>,
}

fn nullable_experience<'de, D>(deserializer: D) -> Result<Vec<WorkExperience>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<WorkExperience>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Candidate {
    /// Platform name, or "Unknown" when the backend didn't record one.
    pub fn platform(&self) -> &str {
        self.source_portal
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Unknown")
    }

    /// Whether this carries the fields only a detailed fetch provides.
    pub fn has_contact_details(&self) -> bool {
        self.email.is_some() || self.phone.is_some() || !self.experience.is_empty()
    }
}

/// Backend-computed match annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    #[serde(default, deserialize_with = "wire::skills")]
    pub matched_skills: Vec<String>,

    #[serde(default, deserialize_with = "wire::lenient_bool")]
    pub is_top_3: bool,

    /// 1-based rank; absent means "use list position"
    #[serde(default, deserialize_with = "wire::lenient_opt_u32")]
    pub rank: Option<u32>,
}

/// A candidate ranked against one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchedCandidate {
    pub candidate: Candidate,
    /// Score in [0, 1]
    pub match_score: f64,
    pub match_breakdown: Option<MatchBreakdown>,
}

impl MatchedCandidate {
    /// Score as a whole percentage.
    pub fn score_percent(&self) -> u32 {
        (self.match_score.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn matched_skills(&self) -> &[String] {
        self.match_breakdown
            .as_ref()
            .map(|b| b.matched_skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_top_3(&self) -> bool {
        self.match_breakdown.as_ref().is_some_and(|b| b.is_top_3)
    }
}

#[derive(Deserialize)]
struct MatchEnvelope {
    #[serde(default)]
    candidate: Option<Candidate>,
    #[serde(default)]
    match_score: Option<f64>,
    #[serde(default)]
    match_breakdown: Option<MatchBreakdown>,
    #[serde(default)]
    reasoning: Option<String>,
}

// Ranked candidates arrive either as {candidate: {...}, match_score, ...} or
// with the candidate fields flattened next to the match fields.
impl<'de> Deserialize<'de> for MatchedCandidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let envelope: MatchEnvelope =
            serde_json::from_value(value.clone()).map_err(D::Error::custom)?;

        let mut candidate = match envelope.candidate {
            Some(candidate) => candidate,
            None => serde_json::from_value(value).map_err(D::Error::custom)?,
        };
        if candidate.reasoning.is_none() {
            candidate.reasoning = envelope.reasoning;
        }
        let match_score = envelope
            .match_score
            .or(candidate.match_score)
            .unwrap_or(0.0);
        if candidate.match_score.is_none() {
            candidate.match_score = Some(match_score);
        }

        Ok(Self {
            candidate,
            match_score,
            match_breakdown: envelope.match_breakdown,
        })
    }
}

/// A candidate-search request and its lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobWire")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_years: u32,
    pub location: String,
    pub status: JobStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub candidates: Vec<MatchedCandidate>,
}

impl Job {
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Title for display, with a placeholder for untitled jobs.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled Job"
        } else {
            &self.title
        }
    }
}

/// Job fields as `POST /jobs` and `GET /jobs/{id}` nest them.
#[derive(Deserialize, Default)]
struct DescriptionWire {
    #[serde(default, deserialize_with = "wire::nullable_string")]
    title: String,
    #[serde(default, deserialize_with = "wire::nullable_string")]
    description: String,
    #[serde(default, deserialize_with = "wire::skills")]
    required_skills: Vec<String>,
    #[serde(default, deserialize_with = "wire::lenient_u32")]
    experience_years: u32,
    #[serde(default, deserialize_with = "wire::nullable_string")]
    location: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptionField {
    Text(String),
    Nested(DescriptionWire),
}

/// Either the nested shape of the job endpoints or the flat shape of the
/// job listing.
#[derive(Deserialize)]
struct JobWire {
    #[serde(default, deserialize_with = "wire::nullable_string")]
    id: String,
    #[serde(default)]
    description: Option<DescriptionField>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "wire::skills")]
    required_skills: Vec<String>,
    #[serde(default, deserialize_with = "wire::lenient_opt_u32")]
    experience_years: Option<u32>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    status: JobStatus,
    #[serde(default, deserialize_with = "wire::opt_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    candidates: Option<Vec<MatchedCandidate>>,
}

impl From<JobWire> for Job {
    fn from(wire: JobWire) -> Self {
        let (nested, text) = match wire.description {
            Some(DescriptionField::Nested(nested)) => (nested, None),
            Some(DescriptionField::Text(text)) => (DescriptionWire::default(), Some(text)),
            None => (DescriptionWire::default(), None),
        };

        let required_skills = if wire.required_skills.is_empty() {
            nested.required_skills
        } else {
            wire.required_skills
        };

        Self {
            id: wire.id,
            title: wire.title.unwrap_or(nested.title),
            description: text.unwrap_or(nested.description),
            required_skills,
            experience_years: wire.experience_years.unwrap_or(nested.experience_years),
            location: wire.location.unwrap_or(nested.location),
            status: wire.status,
            created_at: wire.created_at,
            candidates: wire.candidates.unwrap_or_default(),
        }
    }
}

/// Server-reported progress of a running job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProgress {
    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub step_name: String,

    /// Percentage in 0..=100
    #[serde(default)]
    pub progress: f64,

    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub message: String,

    #[serde(default, deserialize_with = "wire::lenient_u32")]
    pub candidates_found: u32,
}

impl JobProgress {
    pub fn percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0).round() as u8
    }
}

/// Response of the backend health check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "wire::nullable_string")]
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub candidates_count: Option<u64>,
    #[serde(default)]
    pub jobs_count: Option<u64>,
}
