//! Password strength policy applied at signup.
//!
//! Rules: between [`PASSWORD_MIN_LENGTH`] and [`PASSWORD_MAX_LENGTH`]
//! characters, not entirely numeric, not on the common-password list and not
//! too similar to the account's username or email.
//!
//! The similarity check is quadratic in the two lengths, so overlong
//! passwords are rejected before any other rule runs and callers must only
//! pass attributes that already passed their own length validation.

/// Minimum number of characters a password must contain.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum number of characters a password may contain.
pub const PASSWORD_MAX_LENGTH: usize = 4096;

/// Similarity ratio at or above which a password is rejected.
const MAX_SIMILARITY: f64 = 0.7;

const COMMON_PASSWORDS: &[&str] = &[
    "000000", "111111", "11111111", "112233", "121212", "123", "123123", "123321", "1234", "12345",
    "123456", "1234567", "12345678", "123456789", "1234567890", "123qwe", "1q2w3e4r", "1qaz2wsx",
    "555555", "654321", "666666", "696969", "7777777", "987654321", "aaaaaa", "abc123",
    "abcd1234", "access", "admin", "admin123", "adobe123", "ashley", "azerty", "bailey",
    "baseball", "batman", "charlie", "computer", "dragon", "football", "freedom", "hello",
    "iloveyou", "jennifer", "jordan", "letmein", "login", "master", "michael", "monkey",
    "mustang", "passw0rd", "password", "password1", "password123", "photoshop", "princess",
    "qazwsx", "qwerty", "qwerty123", "qwertyuiop", "shadow", "starwars", "sunshine", "superman",
    "trustno1", "welcome", "whatever", "zaq12wsx",
];

/// Return every policy violation for `password`; empty when it is acceptable.
///
/// `attributes` are user-facing identifiers (username, email) the password must
/// not resemble.
///
/// # Examples
/// ```
/// use jobboard::domain::validate_password;
///
/// assert!(validate_password("correct-horse-battery", &["ada"]).is_empty());
/// assert_eq!(validate_password("123", &[]).len(), 3);
/// ```
pub fn validate_password(password: &str, attributes: &[&str]) -> Vec<String> {
    if password.chars().count() > PASSWORD_MAX_LENGTH {
        return vec![format!(
            "This password is too long. It must contain at most {PASSWORD_MAX_LENGTH} characters."
        )];
    }
    let mut problems = Vec::new();

    if attributes
        .iter()
        .any(|attribute| is_too_similar(password, attribute))
    {
        problems.push("The password is too similar to the username.".to_owned());
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        problems.push(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
        ));
    }
    if is_common(password) {
        problems.push("This password is too common.".to_owned());
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_owned());
    }

    problems
}

fn is_common(password: &str) -> bool {
    let lowered = password.trim().to_lowercase();
    COMMON_PASSWORDS.contains(&lowered.as_str())
}

fn is_too_similar(password: &str, attribute: &str) -> bool {
    let password = password.to_lowercase();
    let attribute = attribute.to_lowercase();
    let password_len = password.chars().count();
    attribute
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .chain(std::iter::once(attribute.as_str()))
        .filter(|part| part.chars().count() >= 3)
        .filter(|part| can_reach_threshold(password_len, part.chars().count()))
        .any(|part| similarity(&password, part) >= MAX_SIMILARITY)
}

/// Whether two strings of these lengths could score [`MAX_SIMILARITY`] at all;
/// the ratio never exceeds `2 * min / (a + b)`.
fn can_reach_threshold(password_len: usize, value_len: usize) -> bool {
    let total = password_len + value_len;
    if total == 0 {
        return true;
    }
    (2 * password_len.min(value_len)) as f64 / total as f64 >= MAX_SIMILARITY
}

/// Ratio of matched characters to combined length, using the longest common
/// subsequence as the match count.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for left in &a {
        for (j, right) in b.iter().enumerate() {
            current[j + 1] = if left == right {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    let matched = previous[b.len()];

    (2 * matched) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("correct-horse-battery", &["ada", "ada@example.com"])]
    #[case("Tr0ub4dor&3x", &["grace"])]
    fn strong_passwords_pass(#[case] password: &str, #[case] attributes: &[&str]) {
        assert!(validate_password(password, attributes).is_empty());
    }

    #[rstest]
    #[case("short1!", "This password is too short. It must contain at least 8 characters.")]
    #[case("Password", "This password is too common.")]
    #[case("8675309123", "This password is entirely numeric.")]
    fn weak_passwords_report_reason(#[case] password: &str, #[case] expected: &str) {
        let problems = validate_password(password, &[]);
        assert!(
            problems.iter().any(|problem| problem == expected),
            "expected {expected:?} in {problems:?}"
        );
    }

    #[rstest]
    fn numeric_short_password_reports_every_violation() {
        let problems = validate_password("123", &[]);
        assert_eq!(problems.len(), 3, "{problems:?}");
    }

    #[rstest]
    #[case("margaret2024", "margaret")]
    #[case("hamilton!!", "margaret.hamilton@example.com")]
    fn passwords_resembling_identity_are_rejected(#[case] password: &str, #[case] attribute: &str) {
        let problems = validate_password(password, &[attribute]);
        assert!(
            problems
                .iter()
                .any(|problem| problem == "The password is too similar to the username."),
            "{problems:?}"
        );
    }

    #[rstest]
    fn overlong_password_is_rejected_without_comparing() {
        let password = "a".repeat(1_000_000);
        let attribute = "a".repeat(1_000_000);
        let problems = validate_password(&password, &[&attribute]);
        assert_eq!(
            problems,
            vec![format!(
                "This password is too long. It must contain at most {PASSWORD_MAX_LENGTH} characters."
            )]
        );
    }

    #[rstest]
    fn longest_allowed_password_against_long_email_stays_cheap() {
        let password = "b".repeat(PASSWORD_MAX_LENGTH);
        let email = format!("{}@example.com", "b".repeat(200));
        let started = std::time::Instant::now();
        let problems = validate_password(&password, &["bbbbbbbbbb", &email]);
        assert!(problems.is_empty(), "{problems:?}");
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[rstest]
    #[case(100, 100, true)]
    #[case(10, 3, false)]
    #[case(4096, 200, false)]
    #[case(12, 8, true)]
    fn length_bound_skips_hopeless_comparisons(
        #[case] password_len: usize,
        #[case] value_len: usize,
        #[case] reachable: bool,
    ) {
        assert_eq!(can_reach_threshold(password_len, value_len), reachable);
    }

    #[rstest]
    #[case("abc", "abc", 1.0)]
    #[case("abc", "xyz", 0.0)]
    #[case("abcd", "abxx", 0.5)]
    fn similarity_ratio(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert!((similarity(a, b) - expected).abs() < f64::EPSILON);
    }
}
