//! Unit tests for registry error messages and classes

use crate::errors::{
    ErrorKind, RegistryError, MISSING_PARAMETER_MESSAGE, NOT_REGISTERED_MESSAGE,
    TOKEN_MISMATCH_MESSAGE,
};

#[test]
fn test_backend_error_carries_raw_text() {
    let error = RegistryError::backend("Connection refused (os error 111)");
    assert_eq!(error.to_string(), "Connection refused (os error 111)");
    assert_eq!(error.kind(), ErrorKind::Backend);
}

#[test]
fn test_fixed_messages() {
    let not_found = RegistryError::NotFound {
        username: "ghost".to_string(),
    };
    assert_eq!(not_found.to_string(), NOT_REGISTERED_MESSAGE);
    assert!(!not_found.to_string().contains("ghost"));

    let mismatch = RegistryError::TokenMismatch {
        username: "bob".to_string(),
    };
    assert_eq!(mismatch.to_string(), TOKEN_MISMATCH_MESSAGE);
    assert_eq!(mismatch.kind(), ErrorKind::TokenMismatch);
}

#[test]
fn test_missing_parameter() {
    let error = RegistryError::missing_parameter();
    assert_eq!(error.to_string(), MISSING_PARAMETER_MESSAGE);
    assert_eq!(error.kind(), ErrorKind::InvalidRequest);
}
