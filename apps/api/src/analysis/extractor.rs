//! Feature extractor: turns raw resume text into `ResumeFields` and scans any text
//! against a fixed skill vocabulary.
//!
//! Pure string processing: no model state, never fails. Unparseable input simply
//! yields empty fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::adjust::EducationLevel;
use crate::models::resume::ResumeFields;

/// Heading keywords, checked in this order: skills > experience > education.
const SKILL_HEADINGS: &[&str] = &["skills", "technical skills", "expertise", "proficiencies"];
const EXPERIENCE_HEADINGS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional experience",
];
const EDUCATION_HEADINGS: &[&str] = &["education", "academic background", "qualifications"];

/// Fixed vocabulary for the keyword skill scanner. Result order follows this list.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "sql",
    "database",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "machine learning",
    "data analysis",
    "project management",
    "leadership",
    "communication",
    "problem solving",
    "teamwork",
    "agile",
    "scrum",
];

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "software_engineer",
        &["python", "java", "javascript", "react", "node.js", "sql", "git"],
    ),
    (
        "data_scientist",
        &[
            "machine learning",
            "data analysis",
            "python",
            "r",
            "statistics",
            "pandas",
            "numpy",
        ],
    ),
    (
        "devops",
        &["aws", "azure", "docker", "kubernetes", "ci/cd", "terraform", "jenkins"],
    ),
    (
        "ui_ux",
        &["figma", "adobe xd", "ui/ux", "prototyping", "user research", "wireframing"],
    ),
];

static YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:years?|yrs?)").expect("valid years regex"));

static SKILL_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;]").expect("valid delimiter regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Skills,
    Experience,
    Education,
}

fn detect_heading(line_lower: &str) -> Option<Section> {
    let hit = |keywords: &[&str]| keywords.iter().any(|k| line_lower.contains(k));
    if hit(SKILL_HEADINGS) {
        Some(Section::Skills)
    } else if hit(EXPERIENCE_HEADINGS) {
        Some(Section::Experience)
    } else if hit(EDUCATION_HEADINGS) {
        Some(Section::Education)
    } else {
        None
    }
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

/// Splits raw resume text into skills, experience and education.
///
/// Lines are trimmed and lowercased first, so every emitted field is lowercase. A line
/// containing a heading keyword switches the current section and is not emitted. Lines
/// seen before any heading are dropped. Skill lines are split on `,`/`;`; experience
/// and education lines are joined with single spaces.
pub fn extract_fields(text: &str) -> ResumeFields {
    let mut fields = ResumeFields::default();
    let mut current: Option<Section> = None;

    for raw_line in text.lines() {
        let lowered = raw_line.trim().to_lowercase();
        let line = lowered.as_str();

        if let Some(section) = detect_heading(line) {
            current = Some(section);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match current {
            Some(Section::Skills) => fields.skills.extend(
                SKILL_DELIMITERS
                    .split(line)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            ),
            Some(Section::Experience) => append_line(&mut fields.experience, line),
            Some(Section::Education) => append_line(&mut fields.education, line),
            None => {}
        }
    }

    fields
}

/// Returns every vocabulary term found as a literal substring of the lowercased text,
/// in vocabulary order.
pub fn scan_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Largest `N` in phrases like "5 years" / "3 yrs". Zero when nothing matches.
pub fn extract_years_of_experience(experience_text: &str) -> u32 {
    let lower = experience_text.to_lowercase();
    YEARS_PATTERN
        .captures_iter(&lower)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

fn contains_word(words: &[&str], candidates: &[&str]) -> bool {
    words.iter().any(|w| candidates.contains(w))
}

/// Infers the highest education level mentioned in free text.
pub fn extract_education_level(education_text: &str) -> EducationLevel {
    let lower = education_text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if lower.contains("phd") || lower.contains("doctorate") {
        EducationLevel::Phd
    } else if lower.contains("master") || contains_word(&words, &["ms", "msc"]) {
        EducationLevel::Masters
    } else if lower.contains("bachelor") || contains_word(&words, &["bs", "ba", "bsc"]) {
        EducationLevel::Bachelors
    } else {
        EducationLevel::Other
    }
}

/// Picks the role family with the most keyword hits in the skills text.
/// Earlier-declared roles win ties; `"other"` when nothing matches.
pub fn determine_role_type(skills_text: &str) -> &'static str {
    let lower = skills_text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .collect();

    let mut best: Option<(&'static str, usize)> = None;
    for (role, keywords) in ROLE_KEYWORDS {
        // single-letter keywords ("r") only count as whole tokens
        let hits = keywords
            .iter()
            .filter(|k| {
                if k.len() == 1 {
                    tokens.contains(k)
                } else {
                    lower.contains(*k)
                }
            })
            .count();
        if hits > best.map_or(0, |(_, h)| h) {
            best = Some((role, hits));
        }
    }

    best.map_or("other", |(role, _)| role)
}

/// Overlap between the skills found in a resume and in a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOverlap {
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub match_percentage: f64,
}

pub fn compare_skill_overlap(resume_text: &str, job_description: &str) -> SkillOverlap {
    let resume_skills = scan_skills(resume_text);
    let job_skills = scan_skills(job_description);

    let matched_skills: Vec<String> = job_skills
        .iter()
        .filter(|s| resume_skills.contains(s))
        .cloned()
        .collect();

    let match_percentage = if job_skills.is_empty() {
        0.0
    } else {
        round2(matched_skills.len() as f64 / job_skills.len() as f64 * 100.0)
    };

    SkillOverlap {
        resume_skills,
        job_skills,
        matched_skills,
        match_percentage,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Jane Doe\n\
        jane@example.com\n\
        Technical Skills\n\
        Python, Java ; SQL\n\
        Docker;  \n\
        Professional Experience\n\
        Software Engineer at Acme for 4 years\n\
           Built data pipelines\n\
        Education\n\
        Bachelor of Science in Computer Science\n";

    #[test]
    fn test_scan_skills_vocabulary_order() {
        assert_eq!(scan_skills("I know Python and SQL"), vec!["python", "sql"]);
    }

    #[test]
    fn test_scan_skills_no_match_is_empty() {
        assert!(scan_skills("Carpentry, plumbing and welding").is_empty());
        assert!(scan_skills("").is_empty());
    }

    #[test]
    fn test_scan_skills_is_substring_based() {
        // "javascript" contains "java"; both are reported
        assert_eq!(scan_skills("JavaScript"), vec!["java", "javascript"]);
    }

    #[test]
    fn test_skills_heading_then_delimited_line() {
        let fields = extract_fields("Skills:\nPython, Java");
        assert_eq!(fields.skills, vec!["python", "java"]);
        assert!(fields.experience.is_empty());
        assert!(fields.education.is_empty());
    }

    #[test]
    fn test_experience_and_education_are_lowercased() {
        let fields = extract_fields(
            "Skills:\nPython, Java\nExperience\nBuilt APIs at ACME\nEducation\nMSc Physics",
        );
        assert_eq!(fields.skills, vec!["python", "java"]);
        assert_eq!(fields.experience, "built apis at acme");
        assert_eq!(fields.education, "msc physics");
    }

    #[test]
    fn test_extract_fields_full_resume() {
        let fields = extract_fields(SAMPLE_RESUME);
        assert_eq!(fields.skills, vec!["python", "java", "sql", "docker"]);
        assert_eq!(
            fields.experience,
            "software engineer at acme for 4 years built data pipelines"
        );
        assert_eq!(
            fields.education,
            "bachelor of science in computer science"
        );
    }

    #[test]
    fn test_lines_before_any_heading_are_dropped() {
        let fields = extract_fields("Rust, Go\nSkills\nC++");
        assert_eq!(fields.skills, vec!["c++"]);
    }

    #[test]
    fn test_skills_accumulate_across_blocks() {
        let text = "Skills\nPython\nEducation\nMSc Physics\nExpertise\nGit, Linux";
        let fields = extract_fields(text);
        assert_eq!(fields.skills, vec!["python", "git", "linux"]);
        assert_eq!(fields.education, "msc physics");
    }

    #[test]
    fn test_heading_precedence_skills_before_experience() {
        // Contains both "skills" and "experience": skills wins
        let fields = extract_fields("Skills and Experience\nRust, Go");
        assert_eq!(fields.skills, vec!["rust", "go"]);
        assert!(fields.experience.is_empty());
    }

    #[test]
    fn test_empty_text_yields_empty_fields() {
        assert!(extract_fields("").is_empty());
        assert!(extract_fields("\n\n   \n").is_empty());
    }

    #[test]
    fn test_years_of_experience_takes_max() {
        assert_eq!(
            extract_years_of_experience("2 years at A, then 6 yrs at B, 1 year at C"),
            6
        );
        assert_eq!(extract_years_of_experience("Intern"), 0);
    }

    #[test]
    fn test_education_level_detection() {
        assert_eq!(extract_education_level("PhD in Physics"), EducationLevel::Phd);
        assert_eq!(
            extract_education_level("Masters in Information Technology"),
            EducationLevel::Masters
        );
        assert_eq!(extract_education_level("MS, Stanford"), EducationLevel::Masters);
        assert_eq!(
            extract_education_level("Bachelor in Computer Science"),
            EducationLevel::Bachelors
        );
        assert_eq!(extract_education_level("High school diploma"), EducationLevel::Other);
        // "systems" contains "ms" but is not the abbreviation
        assert_eq!(extract_education_level("Diploma in Computer Systems"), EducationLevel::Other);
    }

    #[test]
    fn test_education_abbreviation_needs_whole_word() {
        // "systems" must not read as an MS degree
        assert_eq!(
            extract_education_level("Certificate in information systems"),
            EducationLevel::Other
        );
    }

    #[test]
    fn test_role_type_picks_most_hits() {
        assert_eq!(determine_role_type("AWS Docker Kubernetes Python"), "devops");
        assert_eq!(determine_role_type("Python Java SQL Git"), "software_engineer");
        assert_eq!(determine_role_type("Figma Prototyping"), "ui_ux");
        assert_eq!(determine_role_type("Carpentry"), "other");
    }

    #[test]
    fn test_role_type_tie_prefers_earlier_role() {
        // python counts for both software_engineer and data_scientist
        assert_eq!(determine_role_type("python"), "software_engineer");
    }

    #[test]
    fn test_skill_overlap_percentage() {
        let overlap = compare_skill_overlap(
            "Python developer who loves Docker",
            "We need Python, SQL and Docker skills",
        );
        assert_eq!(overlap.matched_skills, vec!["python", "docker"]);
        assert_eq!(overlap.job_skills, vec!["python", "sql", "docker"]);
        assert!((overlap.match_percentage - 66.67).abs() < 1e-9);
    }

    #[test]
    fn test_skill_overlap_without_job_skills_is_zero() {
        let overlap = compare_skill_overlap("Python", "Friendly team, great snacks");
        assert!(overlap.matched_skills.is_empty());
        assert_eq!(overlap.match_percentage, 0.0);
    }
}
