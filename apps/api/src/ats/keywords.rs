use crate::models::resume::Resume;

/// Terms recruiters' ATS filters commonly look for. Matched as lowercase
/// substrings, so "team" also credits "teamwork".
pub const ATS_KEYWORDS: &[&str] = &[
    "leadership",
    "management",
    "team",
    "project",
    "communication",
    "optimization",
    "development",
    "analysis",
    "strategy",
    "collaboration",
    "innovation",
    "implementation",
    "problem solving",
    "agile",
    "scrum",
    "design",
    "testing",
    "automation",
    "deployment",
    "architecture",
    "cloud",
    "database",
    "api",
    "performance",
    "scalability",
    "security",
    "mentoring",
    "stakeholder",
    "research",
    "customer",
];

/// Concatenates the free-text sections the keyword scan covers, lowercased.
/// Interests, contact details and dates are deliberately not scanned.
fn searchable_text(resume: &Resume) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(summary) = resume.personal_info.summary.as_deref() {
        parts.push(summary);
    }
    for exp in &resume.experience {
        parts.extend(exp.description.iter().map(String::as_str));
    }
    for project in &resume.projects {
        parts.push(&project.description);
        parts.extend(project.highlights.iter().map(String::as_str));
    }
    parts.extend(resume.skills.iter().map(String::as_str));
    parts.extend(resume.achievements.iter().map(String::as_str));

    parts.join("\n").to_lowercase()
}

/// Returns the vocabulary terms found anywhere in the resume text, in
/// vocabulary order.
pub fn detect_keywords(resume: &Resume) -> Vec<String> {
    let text = searchable_text(resume);
    if text.trim().is_empty() {
        return Vec::new();
    }
    ATS_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}
