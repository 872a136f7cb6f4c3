//! Records exchanged with the hosted backend: projects, skills, contact
//! messages, auth sessions and thumbnail uploads.

use serde::{Deserialize, Deserializer, Serialize};

pub mod upload;

pub use upload::{image_mime_for, validate_image, ImageUpload, MAX_IMAGE_BYTES, THUMBNAIL_BUCKET};

pub const PROJECTS_TABLE: &str = "projects";
pub const SKILLS_TABLE: &str = "skills";
pub const MESSAGES_TABLE: &str = "messages";

/// Category a skill is grouped under when the record has none
pub const DEFAULT_SKILL_CATEGORY: &str = "Other";

/// Input rejected before it reaches the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("skill level {0} is outside 0-100")]
    LevelOutOfRange(i64),

    #[error("unknown project category '{0}'")]
    UnknownCategory(String),

    #[error("'{0}' is not an image type")]
    NotAnImage(String),

    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("invalid file name '{0}'")]
    InvalidFileName(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    Frontend,
    Backend,
    Fullstack,
    Other,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Frontend,
        ProjectCategory::Backend,
        ProjectCategory::Fullstack,
        ProjectCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::Frontend => "frontend",
            ProjectCategory::Backend => "backend",
            ProjectCategory::Fullstack => "fullstack",
            ProjectCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// A project record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "record_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for inserting a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub category: ProjectCategory,
    pub image_url: String,
    pub live_url: String,
    pub github_url: String,
}

impl NewProject {
    /// Title and description are required; everything else may be blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }
        Ok(())
    }
}

/// Partial update; only the fields that are set are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A skill record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(deserialize_with = "record_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(deserialize_with = "stored_level")]
    pub level: u8,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for inserting a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub level: u8,
    pub category: String,
}

impl NewSkill {
    pub fn new(
        name: impl Into<String>,
        level: i64,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        let level = u8::try_from(level)
            .ok()
            .filter(|l| *l <= 100)
            .ok_or(ValidationError::LevelOutOfRange(level))?;

        Ok(Self {
            name,
            level,
            category: category.into(),
        })
    }
}

/// Message left through the public contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Tables may key rows by uuid or by integer; both are carried as text.
fn record_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Stored levels were never range checked; clamp them into 0..=100 rather
/// than failing the whole listing on one bad row.
fn stored_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLevel {
        Int(i64),
        Float(f64),
    }

    let level = match RawLevel::deserialize(deserializer)? {
        RawLevel::Int(level) => level,
        RawLevel::Float(level) if level.is_finite() => level.round() as i64,
        RawLevel::Float(_) => 0,
    };
    Ok(level.clamp(0, 100) as u8)
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Split a comma separated tech list, dropping blanks
pub fn parse_tech_stack(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Group skills by category, keeping categories in first-seen order
pub fn group_skills(skills: &[Skill]) -> Vec<(String, Vec<&Skill>)> {
    let mut groups: Vec<(String, Vec<&Skill>)> = Vec::new();

    for skill in skills {
        let category = skill
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_SKILL_CATEGORY);

        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, members)) => members.push(skill),
            None => groups.push((category.to_string(), vec![skill])),
        }
    }

    groups
}

/// Projects in the given category, or all of them for `None`
pub fn filter_projects(projects: &[Project], category: Option<ProjectCategory>) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}
