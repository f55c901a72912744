pub const MAX_SKILLS: usize = 5;

pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "vue",
    "angular",
    "node.js",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "machine learning",
    "ai",
    "data science",
    "analytics",
    "agile",
    "scrum",
    "git",
    "ci/cd",
    "devops",
    "html",
    "css",
    "typescript",
    "golang",
    "rust",
    "project management",
    "communication",
    "leadership",
];

/// Matching is a plain case-insensitive substring test, so short terms like
/// `"ai"` also hit inside longer words.
pub fn extract_skills(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    SKILL_KEYWORDS
        .iter()
        .filter(|skill| text.contains(*skill))
        .take(MAX_SKILLS)
        .map(ToString::to_string)
        .collect()
}
