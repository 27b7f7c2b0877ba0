//! Feedback generator: fixed score bands mapped to canned remarks.
//! Output is always four strings: overall, skills, experience, education.

pub const OVERALL_NEEDS_WORK: &str =
    "Your resume needs significant improvement to be competitive in the job market.";
pub const OVERALL_DECENT: &str =
    "Your resume is decent but could use some improvements to stand out.";
pub const OVERALL_STRONG: &str = "Your resume looks strong and well-structured.";

pub const SKILLS_LOW: &str =
    "Consider adding more relevant technical skills and tools to your resume.";
pub const SKILLS_MID: &str = "Your skills section is good but could be more comprehensive.";
pub const SKILLS_HIGH: &str =
    "Your skills section is well-developed and shows good technical expertise.";

pub const EXPERIENCE_LOW: &str =
    "Try to highlight more relevant work experience and quantify your achievements.";
pub const EXPERIENCE_MID: &str =
    "Your experience section is solid but could be more detailed with specific accomplishments.";
pub const EXPERIENCE_HIGH: &str =
    "Your experience section effectively showcases your professional growth and achievements.";

pub const EDUCATION_LOW: &str =
    "Consider adding more details about your education, relevant coursework, and academic projects.";
pub const EDUCATION_MID: &str =
    "Your education section is good but could be more detailed with relevant coursework and projects.";
pub const EDUCATION_HIGH: &str =
    "Your education section effectively highlights your academic background and achievements.";

fn band(score: f64, low_below: f64, mid_below: f64, messages: [&str; 3]) -> String {
    let message = if score < low_below {
        messages[0]
    } else if score < mid_below {
        messages[1]
    } else {
        messages[2]
    };
    message.to_string()
}

pub fn generate_feedback(
    overall_score: f64,
    skills_score: f64,
    experience_score: f64,
    education_score: f64,
) -> Vec<String> {
    vec![
        band(
            overall_score,
            60.0,
            75.0,
            [OVERALL_NEEDS_WORK, OVERALL_DECENT, OVERALL_STRONG],
        ),
        band(skills_score, 30.0, 40.0, [SKILLS_LOW, SKILLS_MID, SKILLS_HIGH]),
        band(
            experience_score,
            25.0,
            30.0,
            [EXPERIENCE_LOW, EXPERIENCE_MID, EXPERIENCE_HIGH],
        ),
        band(
            education_score,
            25.0,
            30.0,
            [EDUCATION_LOW, EDUCATION_MID, EDUCATION_HIGH],
        ),
    ]
}
