#![allow(dead_code)]

use std::collections::HashMap;

use formguard_core::{contact_form, FieldState, FieldStatus, ValidationEngine};

pub fn engine() -> ValidationEngine {
    ValidationEngine::new(contact_form())
}

pub fn check(field: &str, value: &str) -> FieldState {
    engine()
        .validate_field(field, value)
        .unwrap_or_else(|e| panic!("Failed to validate {field}: {e}"))
}

pub fn assert_valid(field: &str, value: &str) {
    let state = check(field, value);
    assert_eq!(
        state.status,
        FieldStatus::Valid,
        "Expected {field}={value:?} to be valid"
    );
}

pub fn assert_invalid(field: &str, value: &str, message: &str) {
    let state = check(field, value);
    assert_eq!(
        state.message(),
        Some(message),
        "Expected {field}={value:?} to fail with {message:?}, got {:?}",
        state.status
    );
}

pub fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
