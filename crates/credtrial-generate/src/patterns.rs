//! Dictionary-driven candidates from common password habits and target hints.

use tracing::debug;

use crate::clock::Clock;
use crate::text::{capitalize, dedup_preserving_order};

/// Passwords people keep choosing.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password", "pass", "welcome", "admin", "user", "login", "changeme", "secret", "secure",
    "security", "letmein", "qwerty", "123456", "abc123",
];

pub const SEASONS: &[&str] = &["spring", "summer", "autumn", "fall", "winter"];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Shorter results are discarded.
pub const MIN_PATTERN_LEN: usize = 4;

/// Years before the current year in the dictionary window.
const WINDOW_BEFORE: i32 = 10;

/// Common-pattern candidates, optionally specialised by company name and username.
///
/// The year window is `[year-10, year+1]`; "last N years" refers to the
/// last N entries of that window.
pub fn common_patterns(company: Option<&str>, username: Option<&str>, clock: &dyn Clock) -> Vec<String> {
    let current = clock.current_year();
    let years: Vec<String> = ((current - WINDOW_BEFORE)..=(current + 1))
        .map(|y| y.to_string())
        .collect();

    let mut out: Vec<String> = COMMON_PASSWORDS.iter().map(|p| p.to_string()).collect();

    for pattern in COMMON_PASSWORDS {
        for year in &years {
            out.push(format!("{pattern}{year}"));
            out.push(format!("{year}{pattern}"));
        }
    }
    for season in SEASONS {
        for year in &years {
            out.push(format!("{season}{year}"));
        }
    }
    for month in MONTHS {
        for year in last_years(&years, 3) {
            out.push(format!("{month}{year}"));
        }
    }

    if let Some(company) = company.filter(|c| !c.is_empty()) {
        push_company_variants(&mut out, company, &years);
    }
    if let Some(username) = username.filter(|u| !u.is_empty()) {
        push_username_variants(&mut out, username, &years);
    }

    let out: Vec<String> = dedup_preserving_order(out)
        .into_iter()
        .filter(|p| p.chars().count() >= MIN_PATTERN_LEN)
        .collect();
    debug!(patterns = out.len(), "generated common patterns");
    out
}

fn last_years(years: &[String], n: usize) -> &[String] {
    &years[years.len().saturating_sub(n)..]
}

fn push_company_variants(out: &mut Vec<String>, company: &str, years: &[String]) {
    let company = company.to_lowercase();
    let capitalized = capitalize(&company);

    out.push(company.clone());
    out.push(capitalized.clone());
    for year in last_years(years, 5) {
        out.push(format!("{company}{year}"));
        out.push(format!("{capitalized}{year}"));
    }

    out.push(format!("welcome{company}"));
    out.push(format!("welcome{capitalized}"));
    out.push(format!("Welcome{company}"));
    out.push(format!("Welcome{capitalized}"));

    out.push(format!("admin{company}"));
    out.push(format!("{company}admin"));
}

fn push_username_variants(out: &mut Vec<String>, username: &str, years: &[String]) {
    let username = username.to_lowercase();
    let capitalized = capitalize(&username);

    out.push(username.clone());
    out.push(capitalized.clone());
    for year in last_years(years, 3) {
        out.push(format!("{username}{year}"));
        out.push(format!("{capitalized}{year}"));
    }

    // first.last -> initials
    let parts: Vec<&str> = username.split('.').collect();
    if let [first, last] = parts.as_slice() {
        if let (Some(f), Some(l)) = (first.chars().next(), last.chars().next()) {
            let initials: String = [f, l].iter().collect();
            let upper = initials.to_uppercase();
            out.push(initials.clone());
            out.push(upper.clone());
            for year in last_years(years, 5) {
                out.push(format!("{initials}{year}"));
                out.push(format!("{upper}{year}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_last_years() {
        let years: Vec<String> = (2020..=2026).map(|y| y.to_string()).collect();
        assert_eq!(last_years(&years, 3), &["2024", "2025", "2026"]);
        assert_eq!(last_years(&years, 10).len(), 7);
    }

    #[test]
    fn test_dictionary_comes_first() {
        let out = common_patterns(None, None, &FixedClock(2026));
        assert_eq!(&out[..3], &["password", "pass", "welcome"]);
    }

    #[test]
    fn test_three_part_username_has_no_initials() {
        let out = common_patterns(None, Some("a.b.c"), &FixedClock(2026));
        assert!(!out.iter().any(|p| p.starts_with("ab2")));
    }
}
