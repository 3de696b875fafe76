use std::collections::HashSet;

use credtrial_generate::clock::FixedClock;
use credtrial_generate::combinations::{combinations, DEFAULT_AFFIXES};
use credtrial_generate::enhance::enhance_wordlist;
use credtrial_generate::mutations::mutations;
use credtrial_generate::patterns::common_patterns;
use credtrial_generate::rng::sampling_rng;

fn assert_no_duplicates(items: &[String]) {
    let unique: HashSet<&String> = items.iter().collect();
    assert_eq!(unique.len(), items.len(), "duplicates in {items:?}");
}

/// Values that are `base+year` or `year+base` for a year in the window.
fn is_year_affixed(value: &str, base: &str, year: i32) -> bool {
    ((year - 5)..=(year + 1)).any(|y| value == format!("{base}{y}") || value == format!("{y}{base}"))
}

#[test]
fn test_generators_never_emit_duplicates() {
    let clock = FixedClock(2026);
    assert_no_duplicates(&mutations("Password"));
    assert_no_duplicates(&combinations("letmein", DEFAULT_AFFIXES, &clock));
    assert_no_duplicates(&common_patterns(Some("Acme"), Some("john.doe"), &clock));
}

#[test]
fn test_combinations_known_members() {
    let out = combinations("pass", DEFAULT_AFFIXES, &FixedClock(2040));

    for expected in [
        "pass123", "Pass123", "pass!", "Pass!", "pass2025", "Pass2025", "123pass", "!Pass",
        "2025pass", "p4ss123", "p@ss123", "pa55123", "pa$$123", "pass2035", "2041pass",
    ] {
        assert!(out.contains(&expected.to_string()), "missing {expected}");
    }

    // Substitutions are applied one letter at a time, never combined.
    assert!(!out.contains(&"p4$$123".to_string()));
    // The base itself is not a combination.
    assert!(!out.contains(&"pass".to_string()));
    assert!(!out.contains(&"pass2034".to_string()));
    assert!(!out.contains(&"pass2042".to_string()));
}

#[test]
fn test_combinations_deterministic_for_fixed_year() {
    let a = combinations("pass", DEFAULT_AFFIXES, &FixedClock(2040));
    let b = combinations("pass", DEFAULT_AFFIXES, &FixedClock(2040));
    assert_eq!(a, b);
}

#[test]
fn test_changing_year_only_shifts_year_affixed_values() {
    let a = combinations("pass", DEFAULT_AFFIXES, &FixedClock(2040));
    let b = combinations("pass", DEFAULT_AFFIXES, &FixedClock(2041));

    let rest_a: Vec<&String> = a.iter().filter(|v| !is_year_affixed(v, "pass", 2040)).collect();
    let rest_b: Vec<&String> = b.iter().filter(|v| !is_year_affixed(v, "pass", 2041)).collect();
    assert_eq!(rest_a, rest_b);

    assert!(a.contains(&"pass2035".to_string()));
    assert!(!b.contains(&"pass2035".to_string()));
    assert!(b.contains(&"pass2042".to_string()));
}

#[test]
fn test_common_patterns_dictionary_and_windows() {
    let out = common_patterns(None, None, &FixedClock(2026));

    for expected in [
        "password", "qwerty", "password2026", "2016password", "abc1232027", "summer2027",
        "fall2016", "december2025", "march2027",
    ] {
        assert!(out.contains(&expected.to_string()), "missing {expected}");
    }
    assert!(!out.contains(&"password2015".to_string()));
    assert!(!out.contains(&"december2024".to_string()));
}

#[test]
fn test_common_patterns_company_variants() {
    let out = common_patterns(Some("ACME"), None, &FixedClock(2026));

    for expected in [
        "acme", "Acme", "acme2027", "Acme2023", "welcomeacme", "welcomeAcme", "Welcomeacme",
        "WelcomeAcme", "adminacme", "acmeadmin",
    ] {
        assert!(out.contains(&expected.to_string()), "missing {expected}");
    }
    assert!(!out.contains(&"acme2022".to_string()));
}

#[test]
fn test_common_patterns_username_variants() {
    let out = common_patterns(None, Some("John.Doe"), &FixedClock(2026));

    for expected in ["john.doe", "John.doe", "john.doe2025", "John.doe2027", "jd2023", "JD2027"] {
        assert!(out.contains(&expected.to_string()), "missing {expected}");
    }
    // Initials alone are shorter than four characters.
    assert!(!out.contains(&"jd".to_string()));
    assert!(!out.contains(&"JD".to_string()));
    assert!(!out.contains(&"john.doe2024".to_string()));
    assert!(out.iter().all(|p| p.chars().count() >= 4));
}

#[test]
fn test_enhance_membership_bounds() {
    let clock = FixedClock(2026);
    let input: Vec<String> = (0..250).map(|i| format!("seed{i}")).collect();
    let out = enhance_wordlist(&input, 2_000, &mut sampling_rng(None), &clock);

    assert!(out.len() <= 2_000);
    assert_no_duplicates(&out);

    let mut allowed: HashSet<String> = input.iter().cloned().collect();
    for base in &input {
        allowed.extend(combinations(base, DEFAULT_AFFIXES, &clock));
    }
    assert!(out.iter().all(|v| allowed.contains(v)));
}

#[test]
fn test_enhance_same_seed_same_output() {
    let clock = FixedClock(2026);
    let input: Vec<String> = (0..250).map(|i| format!("seed{i}")).collect();
    let a = enhance_wordlist(&input, 1_000, &mut sampling_rng(Some(5)), &clock);
    let b = enhance_wordlist(&input, 1_000, &mut sampling_rng(Some(5)), &clock);
    assert_eq!(a, b);
}
