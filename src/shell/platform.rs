//! Platform environment detection.

/// Environment variables set by common CI providers.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`, where every
/// confirmation falls back to its default answer.
pub fn is_ci() -> bool {
    ci_detected(|name| std::env::var_os(name).is_some())
}

fn ci_detected(is_set: impl Fn(&str) -> bool) -> bool {
    CI_VARS.iter().any(|name| is_set(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_ci_variable_is_enough() {
        assert!(ci_detected(|name| name == "GITHUB_ACTIONS"));
        assert!(ci_detected(|name| name == "JENKINS_URL"));
    }

    #[test]
    fn clean_environment_is_not_ci() {
        assert!(!ci_detected(|_| false));
        assert!(!ci_detected(|name| name == "HOME"));
    }
}
