//! ATS scoring: a heuristic resume score (0 to 100) with categorized feedback.
//!
//! Point-budget accumulation: every category contributes a capped number of
//! points, the categories are summed and the total is clamped to 100.
//! The weights are product heuristics; changing them is a product decision.
//!
//! Pure and deterministic: the same `Resume` always yields the same
//! `ScoreResult`, and the input is never mutated.

use serde::{Deserialize, Serialize};

use crate::ats::keywords::detect_keywords;
use crate::models::resume::{is_filled, Resume};

pub const MAX_SCORE: u32 = 100;

const POINTS_PER_CONTACT_FIELD: u32 = 3;
const MAX_PERSONAL_INFO: u32 = 20;
const STRONG_CONTACT_POINTS: u32 = 15;
const SUMMARY_POINTS: u32 = 10;
const SUMMARY_MIN_CHARS: usize = 50;
const EDUCATION_BASE: u32 = 10;
const EDUCATION_COMPLETE_BONUS: u32 = 5;
const EDUCATION_COMPLETE_CAP: u32 = 5;
const EXPERIENCE_BASE: u32 = 15;
const EXPERIENCE_COMPLETE_BONUS: u32 = 5;
const EXPERIENCE_COMPLETE_CAP: u32 = 10;
const PROJECTS_BASE: u32 = 5;
const PROJECT_COMPLETE_BONUS: u32 = 2;
const PROJECT_COMPLETE_CAP: u32 = 5;
const POINTS_PER_CERTIFICATION: u32 = 2;
const MAX_CERTIFICATIONS: u32 = 5;
const MAX_LANGUAGES: u32 = 3;
const MAX_ACHIEVEMENTS: u32 = 2;
const DETAILED_BULLET_COUNT: usize = 3;
const EXTENSIVE_SKILL_COUNT: usize = 10;

const LOW_BAND: u32 = 60;
const HIGH_BAND: u32 = 80;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PersonalInfo,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Languages,
    Achievements,
    Formatting,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub points: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub keywords: Vec<String>,
    pub breakdown: Vec<CategoryScore>,
}

/// Insertion-ordered, deduplicated feedback labels.
#[derive(Default)]
struct Feedback {
    strengths: Vec<String>,
    improvements: Vec<String>,
}

impl Feedback {
    fn check(&mut self, met: bool, strength: &str, improvement: &str) {
        if met {
            push_unique(&mut self.strengths, strength);
        } else {
            push_unique(&mut self.improvements, improvement);
        }
    }

    fn improve(&mut self, label: &str) {
        push_unique(&mut self.improvements, label);
    }
}

fn push_unique(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}

fn capped(count: usize, per_item: u32, cap: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_item)
        .min(cap)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores a resume for ATS friendliness. Total; missing sections contribute 0.
pub fn score_resume(resume: &Resume) -> ScoreResult {
    let mut feedback = Feedback::default();

    let breakdown = vec![
        CategoryScore {
            category: Category::PersonalInfo,
            points: personal_info_points(resume, &mut feedback),
            max_points: MAX_PERSONAL_INFO,
        },
        CategoryScore {
            category: Category::Summary,
            points: summary_points(resume, &mut feedback),
            max_points: SUMMARY_POINTS,
        },
        CategoryScore {
            category: Category::Education,
            points: education_points(resume, &mut feedback),
            max_points: EDUCATION_BASE + EDUCATION_COMPLETE_CAP,
        },
        CategoryScore {
            category: Category::Experience,
            points: experience_points(resume, &mut feedback),
            max_points: EXPERIENCE_BASE + EXPERIENCE_COMPLETE_CAP,
        },
        CategoryScore {
            category: Category::Skills,
            points: skills_points(resume, &mut feedback),
            max_points: 15,
        },
        CategoryScore {
            category: Category::Projects,
            points: projects_points(resume, &mut feedback),
            max_points: PROJECTS_BASE + PROJECT_COMPLETE_CAP,
        },
        CategoryScore {
            category: Category::Certifications,
            points: certification_points(resume, &mut feedback),
            max_points: MAX_CERTIFICATIONS,
        },
        CategoryScore {
            category: Category::Languages,
            points: language_points(resume, &mut feedback),
            max_points: MAX_LANGUAGES,
        },
        CategoryScore {
            category: Category::Achievements,
            points: achievement_points(resume, &mut feedback),
            max_points: MAX_ACHIEVEMENTS,
        },
        CategoryScore {
            category: Category::Formatting,
            points: formatting_points(resume, &mut feedback),
            max_points: 10,
        },
    ];

    let raw: u32 = breakdown.iter().map(|c| c.points).sum();
    let score = raw.min(MAX_SCORE);

    if score < LOW_BAND {
        feedback.improve("Complete all resume sections to improve your ATS score");
        feedback.improve("Add more detail to your experience and project descriptions");
    } else if score < HIGH_BAND {
        feedback.improve("Add specific metrics and outcomes to your achievements");
        feedback.improve("Include more industry-specific keywords");
    }

    ScoreResult {
        score,
        strengths: feedback.strengths,
        improvements: feedback.improvements,
        keywords: detect_keywords(resume),
        breakdown,
    }
}

fn personal_info_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let points = capped(
        resume.personal_info.filled_count(),
        POINTS_PER_CONTACT_FIELD,
        MAX_PERSONAL_INFO,
    );
    feedback.check(
        points >= STRONG_CONTACT_POINTS,
        "Complete contact information",
        "Add complete contact details (phone, location, profile links)",
    );
    points
}

fn summary_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let long_enough = resume
        .personal_info
        .summary
        .as_deref()
        .is_some_and(|s| s.trim().chars().count() > SUMMARY_MIN_CHARS);
    feedback.check(
        long_enough,
        "Strong professional summary",
        "Add a professional summary of more than 50 characters",
    );
    if long_enough {
        SUMMARY_POINTS
    } else {
        0
    }
}

fn education_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let entries = &resume.education;
    feedback.check(
        !entries.is_empty(),
        "Education section included",
        "Add your education details",
    );
    if entries.is_empty() {
        return 0;
    }

    let complete = entries.iter().filter(|e| e.is_complete()).count();
    if complete == 0 {
        feedback.improve("Fill in institution, degree, field and dates for your education");
    }
    EDUCATION_BASE + capped(complete, EDUCATION_COMPLETE_BONUS, EDUCATION_COMPLETE_CAP)
}

fn experience_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let entries = &resume.experience;
    feedback.check(
        !entries.is_empty(),
        "Work experience included",
        "Add your work experience",
    );
    // Quantification is feedback only; it carries no points.
    feedback.check(
        entries.iter().any(|e| e.has_quantified_bullet()),
        "Quantified achievements in experience",
        "Quantify achievements with numbers and metrics",
    );
    if entries.is_empty() {
        return 0;
    }

    let complete = entries.iter().filter(|e| e.is_complete()).count();
    if complete == 0 {
        feedback.improve("Fill in company, position, dates and bullet points for each role");
    }
    EXPERIENCE_BASE + capped(complete, EXPERIENCE_COMPLETE_BONUS, EXPERIENCE_COMPLETE_CAP)
}

fn skills_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let count = resume.skills.len();
    feedback.check(
        count >= 5,
        "Good range of skills",
        "List at least 5 relevant skills",
    );
    let base = match count {
        0..=2 => 0,
        3..=4 => 5,
        _ => 10,
    };
    if count >= 8 {
        base + 5
    } else {
        base
    }
}

fn projects_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let entries = &resume.projects;
    feedback.check(
        !entries.is_empty(),
        "Projects showcase practical work",
        "Add projects that demonstrate your skills",
    );
    if entries.is_empty() {
        return 0;
    }

    let complete = entries.iter().filter(|p| p.is_complete()).count();
    PROJECTS_BASE + capped(complete, PROJECT_COMPLETE_BONUS, PROJECT_COMPLETE_CAP)
}

fn certification_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let points = capped(
        resume.certifications.len(),
        POINTS_PER_CERTIFICATION,
        MAX_CERTIFICATIONS,
    );
    feedback.check(
        points > 0,
        "Professional certifications listed",
        "Add relevant certifications",
    );
    points
}

fn language_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    // The first language is assumed; only additional ones earn points.
    let points = capped(resume.languages.len().saturating_sub(1), 1, MAX_LANGUAGES);
    feedback.check(
        points > 0,
        "Multiple languages listed",
        "List additional languages you speak",
    );
    points
}

fn achievement_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let points = capped(resume.achievements.len(), 1, MAX_ACHIEVEMENTS);
    feedback.check(
        points > 0,
        "Achievements highlighted",
        "Add notable achievements or awards",
    );
    points
}

fn formatting_points(resume: &Resume, feedback: &mut Feedback) -> u32 {
    let info = &resume.personal_info;
    let mut points = 0;

    let valid_email = info.email.as_deref().is_some_and(|e| e.contains('@'));
    feedback.check(valid_email, "Valid email address", "Add a valid email address");
    if valid_email {
        points += 2;
    }

    let has_linkedin = info.links().into_iter().any(|link| {
        is_filled(link)
            && link
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains("linkedin.com"))
    });
    feedback.check(
        has_linkedin,
        "LinkedIn profile included",
        "Add your LinkedIn profile URL",
    );
    if has_linkedin {
        points += 3;
    }

    let detailed = resume
        .experience
        .iter()
        .any(|e| e.bullet_count() >= DETAILED_BULLET_COUNT);
    feedback.check(
        detailed,
        "Detailed experience descriptions",
        "Use at least 3 bullet points for your key roles",
    );
    if detailed {
        points += 3;
    }

    let extensive = resume.skills.len() >= EXTENSIVE_SKILL_COUNT;
    feedback.check(
        extensive,
        "Extensive skill set",
        "Expand your skills list to 10 or more",
    );
    if extensive {
        points += 2;
    }

    points
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
