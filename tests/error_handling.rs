// tests/error_handling.rs

mod common;
use crate::common::config_file;

use simple_analysis::config::configure;
use simple_analysis::errors::AnalysisError;

#[test]
fn test_missing_assignment_returns_structured_error() {
    let file = config_file(
        r#"
out.dat
ntuple
a.dat
hpx = px
hpy py
"#,
    );

    let result = configure(file.path());

    match result {
        Err(AnalysisError::MissingAssignment { file: name, line }) => {
            assert_eq!(name, file.path().display().to_string());
            assert_eq!(line, 6);
        }
        Err(e) => panic!("Expected MissingAssignment error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_duplicate_name_message_names_file_and_line() {
    let file = config_file("out.dat\nh = px\nh = py\n");

    let result = configure(file.path());

    match result {
        Err(e @ AnalysisError::DuplicateName { .. }) => {
            let msg = e.to_string();
            assert!(msg.contains("duplicate projection name 'h'"), "{msg}");
            assert!(msg.ends_with(":3"), "{msg}");
        }
        Err(e) => panic!("Expected DuplicateName error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_engine_errors_keep_their_cause() {
    let err: AnalysisError = anyhow::anyhow!("disk on fire").into();
    assert_eq!(err.to_string(), "disk on fire");
}
