use rusve::{Result, RusveError};

#[test]
fn test_error_display() {
    let err = RusveError::NotFound("user u1".to_string());
    assert!(err.to_string().contains("user u1"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(RusveError::Unauthenticated)
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn contract_errors_are_client_errors() {
    assert!(RusveError::NotFound("x".into()).is_client_error());
    assert!(RusveError::AlreadyExists("x".into()).is_client_error());
    assert!(RusveError::InvalidArgument("x".into()).is_client_error());
    assert!(RusveError::FailedPrecondition("x".into()).is_client_error());
    assert!(RusveError::PermissionDenied("x".into()).is_client_error());
}

#[test]
fn backend_errors_are_not_client_errors() {
    assert!(!RusveError::Storage("disk full".into()).is_client_error());
    assert!(!RusveError::Transport("connection reset".into()).is_client_error());
    assert!(!RusveError::Configuration("bad address".into()).is_client_error());
}

#[test]
fn codes_are_distinct_metric_labels() {
    let errors = [
        RusveError::NotFound(String::new()),
        RusveError::AlreadyExists(String::new()),
        RusveError::InvalidArgument(String::new()),
        RusveError::FailedPrecondition(String::new()),
        RusveError::Unauthenticated,
        RusveError::PermissionDenied(String::new()),
        RusveError::Storage(String::new()),
        RusveError::Configuration(String::new()),
        RusveError::Transport(String::new()),
    ];
    let mut codes: Vec<_> = errors.iter().map(RusveError::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
    assert!(!codes.contains(&"ok"));
}
