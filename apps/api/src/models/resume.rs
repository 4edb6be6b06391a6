use serde::{Deserialize, Serialize};

/// Returns true when an optional text field is present and not blank.
pub fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

impl PersonalInfo {
    /// All fields in a fixed order, for completeness counting.
    pub fn fields(&self) -> [&Option<String>; 8] {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.location,
            &self.linkedin,
            &self.github,
            &self.website,
            &self.summary,
        ]
    }

    pub fn links(&self) -> [&Option<String>; 3] {
        [&self.linkedin, &self.github, &self.website]
    }

    pub fn filled_count(&self) -> usize {
        self.fields().into_iter().filter(|f| is_filled(f)).count()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub achievements: Vec<String>,
}

impl Education {
    pub fn is_complete(&self) -> bool {
        [
            &self.institution,
            &self.degree,
            &self.field,
            &self.start_date,
            &self.end_date,
        ]
        .into_iter()
        .all(|f| non_blank(f))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
    pub technologies: Vec<String>,
}

impl Experience {
    pub fn is_complete(&self) -> bool {
        [&self.company, &self.position, &self.start_date, &self.end_date]
            .into_iter()
            .all(|f| non_blank(f))
            && self.bullet_count() >= 1
    }

    /// Number of non-blank description lines.
    pub fn bullet_count(&self) -> usize {
        self.description.iter().filter(|d| non_blank(d)).count()
    }

    pub fn has_quantified_bullet(&self) -> bool {
        self.description
            .iter()
            .any(|d| d.chars().any(|c| c.is_ascii_digit()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub github: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub highlights: Vec<String>,
}

impl Project {
    pub fn is_complete(&self) -> bool {
        non_blank(&self.name)
            && non_blank(&self.description)
            && self.technologies.iter().any(|t| non_blank(t))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

/// Structured resume document as submitted by the resume builder.
/// Every section is optional on the wire; missing sections deserialize empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub achievements: Vec<String>,
    pub interests: Vec<String>,
}
