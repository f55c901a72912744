
mod salary;
mod skills;

pub use salary::{parse_salary, HOURS_PER_YEAR, MONTHS_PER_YEAR};
pub use skills::{extract_skills, MAX_SKILLS, SKILL_KEYWORDS};
