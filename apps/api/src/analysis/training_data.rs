/// One labelled resume from the embedded reference corpus.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSample {
    pub skills: &'static [&'static str],
    pub experience: &'static str,
    pub education: &'static str,
    pub score: f64,
}

impl TrainingSample {
    pub fn skills_text(&self) -> String {
        self.skills.join(" ")
    }
}

/// Fixed corpus used once to fit the vectorizers, scaler and regressor.
pub const TRAINING_SAMPLES: &[TrainingSample] = &[
    TrainingSample {
        skills: &["Python", "Java", "SQL"],
        experience: "Software Developer with 3 years experience",
        education: "Bachelor in Computer Science",
        score: 75.0,
    },
    TrainingSample {
        skills: &["JavaScript", "React", "HTML", "CSS"],
        experience: "Frontend Developer for 2 years",
        education: "Masters in Information Technology",
        score: 70.0,
    },
    TrainingSample {
        skills: &["Python", "Machine Learning", "Statistics", "Pandas"],
        experience: "Data Scientist with 5 years experience building predictive models",
        education: "PhD in Statistics",
        score: 90.0,
    },
    TrainingSample {
        skills: &["AWS", "Docker", "Kubernetes", "Linux", "CI/CD"],
        experience: "DevOps Engineer with 6 years experience managing cloud infrastructure",
        education: "Bachelor in Computer Engineering",
        score: 85.0,
    },
    TrainingSample {
        skills: &["Figma", "Prototyping", "Wireframing"],
        experience: "Junior UX Designer for 1 year",
        education: "Bachelor of Arts in Graphic Design",
        score: 60.0,
    },
    TrainingSample {
        skills: &["Excel", "Communication"],
        experience: "Retail sales associate with no technical experience",
        education: "High School Diploma",
        score: 35.0,
    },
    TrainingSample {
        skills: &["Node.js", "Python", "SQL", "REST API", "Microservices"],
        experience: "Backend Developer with 4 years experience designing scalable APIs",
        education: "Masters in Computer Science",
        score: 80.0,
    },
    TrainingSample {
        skills: &["Project Management", "Agile", "Leadership", "Communication"],
        experience: "Product Manager for 7 years leading cross-functional teams",
        education: "MBA in Business Administration",
        score: 82.0,
    },
];
