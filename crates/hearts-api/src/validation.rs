use thiserror::Error;

use hearts_flames::Flames;
use hearts_types::api::SubmitRequest;

use crate::config::SubmitConfig;

/// Why a submission body was refused. Display text is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: name, crush, result")]
    MissingFields,

    #[error("Name exceeds {0} characters")]
    NameTooLong(usize),

    #[error("Crush name exceeds {0} characters")]
    CrushTooLong(usize),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Crush name cannot be empty")]
    EmptyCrush,

    #[error("Invalid result. Must be one of: {0}")]
    InvalidResult(String),

    #[error("Result does not match the submitted names")]
    ResultMismatch,
}

/// Borrowed view of a body that passed every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidSubmission<'a> {
    /// Trimmed.
    pub name: &'a str,
    /// Trimmed.
    pub crush: &'a str,
    pub result: Flames,
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Pure check of a submission body; no I/O. Rules run in a fixed order and the
/// first failure wins.
pub fn validate_submission<'a>(
    req: &'a SubmitRequest,
    config: &SubmitConfig,
) -> Result<ValidSubmission<'a>, ValidationError> {
    let (Some(name), Some(crush), Some(result)) =
        (required(&req.name), required(&req.crush), required(&req.result))
    else {
        return Err(ValidationError::MissingFields);
    };

    // Counted in chars, not UTF-16 units: astral characters (most emoji)
    // count once here, unlike the browser's `String.length`.
    let max = config.max_name_length;
    if name.chars().count() > max {
        return Err(ValidationError::NameTooLong(max));
    }
    if crush.chars().count() > max {
        return Err(ValidationError::CrushTooLong(max));
    }

    let name = name.trim();
    let crush = crush.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if crush.is_empty() {
        return Err(ValidationError::EmptyCrush);
    }

    let result = result
        .parse::<Flames>()
        .ok()
        .filter(|label| config.allowed_results.contains(label))
        .ok_or_else(|| ValidationError::InvalidResult(allowed_list(&config.allowed_results)))?;

    if config.verify_result && hearts_flames::compute(name, crush) != result {
        return Err(ValidationError::ResultMismatch);
    }

    Ok(ValidSubmission {
        name,
        crush,
        result,
    })
}

fn allowed_list(results: &[Flames]) -> String {
    results
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, crush: &str, result: &str) -> SubmitRequest {
        SubmitRequest {
            name: Some(name.to_string()),
            crush: Some(crush.to_string()),
            result: Some(result.to_string()),
            ..Default::default()
        }
    }

    fn check(req: &SubmitRequest) -> Result<ValidSubmission<'_>, ValidationError> {
        validate_submission(req, &SubmitConfig::default())
    }

    #[test]
    fn accepts_and_trims() {
        let req = body("  Steve ", "Alice\n", "Love");
        let valid = check(&req).unwrap();
        assert_eq!(valid.name, "Steve");
        assert_eq!(valid.crush, "Alice");
        assert_eq!(valid.result, Flames::Love);
    }

    #[test]
    fn missing_or_empty_fields() {
        let mut req = body("Steve", "Alice", "Love");
        req.crush = None;
        assert_eq!(check(&req), Err(ValidationError::MissingFields));

        assert_eq!(check(&body("", "Alice", "Love")), Err(ValidationError::MissingFields));
        assert_eq!(check(&body("Steve", "Alice", "")), Err(ValidationError::MissingFields));
        assert_eq!(check(&SubmitRequest::default()), Err(ValidationError::MissingFields));
    }

    #[test]
    fn whitespace_only_names() {
        assert_eq!(check(&body("   ", "Alice", "Love")), Err(ValidationError::EmptyName));
        assert_eq!(check(&body("Steve", "\t", "Love")), Err(ValidationError::EmptyCrush));
    }

    #[test]
    fn length_limit_is_inclusive() {
        let at_limit = "a".repeat(200);
        assert!(check(&body(&at_limit, "b", "Love")).is_ok());

        let over = "a".repeat(201);
        let err = check(&body(&over, "b", "Love")).unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong(200));
        assert_eq!(err.to_string(), "Name exceeds 200 characters");

        let err = check(&body("a", &over, "Love")).unwrap_err();
        assert_eq!(err.to_string(), "Crush name exceeds 200 characters");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let hearts = "♥".repeat(200);
        assert!(check(&body(&hearts, "b", "Love")).is_ok());

        // 300 UTF-16 units in a browser, 150 chars here
        let faces = "😀".repeat(150);
        assert!(check(&body("a", &faces, "Love")).is_ok());
        let faces = "😀".repeat(201);
        assert_eq!(
            check(&body("a", &faces, "Love")),
            Err(ValidationError::CrushTooLong(200))
        );
    }

    #[test]
    fn unknown_result_lists_the_labels() {
        let err = check(&body("Steve", "Alice", "Hatred")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid result. Must be one of: Friends, Love, Affection, Marriage, Enemies, Siblings"
        );
        assert!(check(&body("Steve", "Alice", "love")).is_err());
    }

    #[test]
    fn restricted_result_list() {
        let config = SubmitConfig {
            allowed_results: vec![Flames::Friends],
            ..Default::default()
        };
        let req = body("Steve", "Alice", "Love");
        assert_eq!(
            validate_submission(&req, &config),
            Err(ValidationError::InvalidResult("Friends".to_string()))
        );
    }

    #[test]
    fn verification_rejects_mismatch() {
        let config = SubmitConfig {
            verify_result: true,
            ..Default::default()
        };
        let honest = body("Steve", "Alice", "Love");
        assert!(validate_submission(&honest, &config).is_ok());

        let forged = body("Steve", "Alice", "Marriage");
        assert_eq!(
            validate_submission(&forged, &config),
            Err(ValidationError::ResultMismatch)
        );
    }
}
