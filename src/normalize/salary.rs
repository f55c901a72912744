use lazy_regex::regex;

// 40 hours a week, 52 weeks a year.
pub const HOURS_PER_YEAR: i64 = 40 * 52;
pub const MONTHS_PER_YEAR: i64 = 12;

pub fn parse_salary(salary_text: Option<&str>) -> (Option<i64>, Option<i64>) {
    let Some(text) = salary_text else {
        return (None, None);
    };

    let lower = text.to_lowercase();
    let multiplier = if lower.contains("hour") {
        HOURS_PER_YEAR
    } else if lower.contains("month") {
        MONTHS_PER_YEAR
    } else {
        1
    };

    let mut numbers = regex!(r"[\d,]+")
        .find_iter(text)
        .map(|m| m.as_str().replace(',', ""))
        .filter(|digits| !digits.is_empty())
        .filter_map(|digits| digits.parse::<i64>().ok())
        .filter_map(|n| n.checked_mul(multiplier));

    (numbers.next(), numbers.next())
}
