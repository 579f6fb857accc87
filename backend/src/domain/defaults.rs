//! Defaulting policy for sparse profile data.
//!
//! Registration rows and auth metadata regularly arrive with empty or missing
//! profile fields. The fallbacks live here so every consumer resolves them
//! identically.

/// Display name used when neither a name nor an email is usable.
pub const DEFAULT_DISPLAY_NAME: &str = "Student";

/// Department used when no row in a group carries one.
pub const DEFAULT_DEPARTMENT: &str = "Unknown Department";

/// Returns the trimmed value when it is non-empty.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve a display name: the name itself, else the email, else
/// [`DEFAULT_DISPLAY_NAME`].
pub fn display_name(name: Option<&str>, email: Option<&str>) -> String {
    non_empty(name)
        .or_else(|| non_empty(email))
        .unwrap_or(DEFAULT_DISPLAY_NAME)
        .to_owned()
}

/// Resolve a department, falling back to [`DEFAULT_DEPARTMENT`].
pub fn department(department: Option<&str>) -> String {
    non_empty(department).unwrap_or(DEFAULT_DEPARTMENT).to_owned()
}

/// Resolve a profile name from auth metadata: the metadata name, else the
/// local part of the email, else `"User"`.
pub fn profile_name(metadata_name: Option<&str>, email: &str) -> String {
    if let Some(name) = non_empty(metadata_name) {
        return name.to_owned();
    }
    match non_empty(email.split('@').next()) {
        Some(local) => local.to_owned(),
        None => "User".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Ann"), Some("a@x"), "Ann")]
    #[case(Some("  "), Some("a@x"), "a@x")]
    #[case(None, Some("a@x"), "a@x")]
    #[case(None, None, DEFAULT_DISPLAY_NAME)]
    #[case(Some(""), Some(""), DEFAULT_DISPLAY_NAME)]
    fn display_name_fallback_chain(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(display_name(name, email), expected);
    }

    #[rstest]
    #[case(Some("CSE"), "CSE")]
    #[case(Some("  "), DEFAULT_DEPARTMENT)]
    #[case(None, DEFAULT_DEPARTMENT)]
    fn department_fallback(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(department(input), expected);
    }

    #[rstest]
    #[case(Some("Priya"), "p@jaipur.manipal.edu", "Priya")]
    #[case(None, "priya.patel@jaipur.manipal.edu", "priya.patel")]
    #[case(Some(" "), "rahul@x", "rahul")]
    #[case(None, "", "User")]
    fn profile_name_uses_local_part(
        #[case] metadata: Option<&str>,
        #[case] email: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(profile_name(metadata, email), expected);
    }
}
