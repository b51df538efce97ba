//! Job creation form parsing.

use crate::types::Job;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    Skills,
    Experience,
    Location,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Title,
        Self::Description,
        Self::Skills,
        Self::Experience,
        Self::Location,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Job title",
            Self::Description => "Description",
            Self::Skills => "Required skills (comma-separated)",
            Self::Experience => "Years of experience",
            Self::Location => "Location",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Skills,
            Self::Skills => Self::Experience,
            Self::Experience => Self::Location,
            Self::Location => Self::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Title => Self::Location,
            Self::Description => Self::Title,
            Self::Skills => Self::Description,
            Self::Experience => Self::Skills,
            Self::Location => Self::Experience,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(FormField),
    #[error("Years of experience must be a whole number, got {0:?}")]
    InvalidExperience(String),
}

impl FormError {
    /// The field the error should be shown against.
    pub fn field(&self) -> FormField {
        match self {
            Self::Missing(field) => *field,
            Self::InvalidExperience(_) => FormField::Experience,
        }
    }
}

/// Raw form input as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub skills: String,
    pub experience: String,
    pub location: String,
}

impl JobForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Skills => &self.skills,
            FormField::Experience => &self.experience,
            FormField::Location => &self.location,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Skills => &mut self.skills,
            FormField::Experience => &mut self.experience,
            FormField::Location => &mut self.location,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Split a comma-separated skill list.
///
/// Each element is trimmed and empty segments are dropped, so a trailing
/// comma doesn't produce a blank skill.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validated payload for `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_years: u32,
    pub location: String,
}

impl JobDraft {
    /// Validate the form and build the create-job payload.
    pub fn parse(form: &JobForm) -> Result<Self, FormError> {
        let required = |field: FormField| -> Result<String, FormError> {
            let value = form.field(field).trim();
            if value.is_empty() {
                Err(FormError::Missing(field))
            } else {
                Ok(value.to_string())
            }
        };

        let title = required(FormField::Title)?;
        let description = required(FormField::Description)?;

        let required_skills = split_skills(&form.skills);
        if required_skills.is_empty() {
            return Err(FormError::Missing(FormField::Skills));
        }

        let experience = required(FormField::Experience)?;
        let experience_years = experience
            .parse::<u32>()
            .map_err(|_| FormError::InvalidExperience(experience.clone()))?;

        let location = required(FormField::Location)?;

        Ok(Self {
            title,
            description,
            required_skills,
            experience_years,
            location,
        })
    }

    /// Rebuild the payload of an existing job, for re-running its search.
    pub fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            required_skills: job.required_skills.clone(),
            experience_years: job.experience_years,
            location: job.location.clone(),
        }
    }
}
