// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pollboard_error::{PollboardError, Result, ResultExt};
use std::io;

#[test]
fn test_error_display() {
    let err = PollboardError::missing_element("grid-container");
    assert_eq!(err.to_string(), "Element not found: grid-container");

    let err = PollboardError::fetch_error("HTTP 503");
    assert_eq!(err.to_string(), "Fetch failed: HTTP 503");

    let err = PollboardError::invalid_config("polls_per_page must be positive");
    assert_eq!(
        err.to_string(),
        "Invalid configuration: polls_per_page must be positive"
    );
}

#[test]
fn test_error_constructors() {
    assert!(matches!(
        PollboardError::decode_error("bad json"),
        PollboardError::DecodeError { .. }
    ));
    assert!(matches!(
        PollboardError::dom_error("innerHTML"),
        PollboardError::DomError { .. }
    ));
    assert!(matches!(
        PollboardError::user_error(io::Error::other("boom")),
        PollboardError::UserError(_)
    ));
}

#[test]
fn test_is_recoverable() {
    assert!(PollboardError::fetch_error("timeout").is_recoverable());
    assert!(!PollboardError::decode_error("bad json").is_recoverable());
    assert!(!PollboardError::missing_element("count-a").is_recoverable());
}

#[test]
fn test_is_permanent() {
    assert!(PollboardError::missing_element("current-page").is_permanent());
    assert!(PollboardError::invalid_config("zero interval").is_permanent());
    assert!(!PollboardError::fetch_error("HTTP 500").is_permanent());
    assert!(!PollboardError::dom_error("classList").is_permanent());
}

#[test]
fn test_context_is_prepended() {
    let result: Result<()> = Err(PollboardError::fetch_error("HTTP 502"));

    let err = result.context("GET /api/display/data").unwrap_err();

    assert!(matches!(err, PollboardError::FetchError { .. }));
    assert_eq!(
        err.to_string(),
        "Fetch failed: GET /api/display/data: HTTP 502"
    );
}

#[test]
fn test_with_context_is_lazy_and_keeps_structural_errors() {
    let ok: Result<u32> = Ok(7);
    let value = ok
        .with_context(|| panic!("context must not be built for Ok"))
        .unwrap();
    assert_eq!(value, 7);

    let missing: Result<()> = Err(PollboardError::missing_element("count-b"));
    let err = missing
        .with_context(|| "writing counts".to_string())
        .unwrap_err();
    assert!(matches!(err, PollboardError::MissingElement { ref id } if id == "count-b"));
}

#[test]
fn test_user_error_context_keeps_user_error() {
    let result: Result<()> = Err(PollboardError::user_error(io::Error::other("detached")));

    let err = result.context("replacing cards").unwrap_err();

    assert!(matches!(err, PollboardError::UserError(_)));
    assert!(err.to_string().contains("replacing cards: detached"));
    assert!(!err.is_recoverable());
}

#[test]
fn test_user_error_context_keeps_source_chain() {
    use std::error::Error as _;

    let result: Result<()> = Err(PollboardError::user_error(io::Error::other("detached")));

    let err = result
        .with_context(|| "rotating page 2".to_string())
        .unwrap_err();

    let PollboardError::UserError(inner) = &err else {
        panic!("expected UserError, got {err:?}");
    };
    let source = inner.source().expect("context keeps the original error");
    assert_eq!(source.to_string(), "detached");
}
