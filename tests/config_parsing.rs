// tests/config_parsing.rs

mod common;
use crate::common::{config_file, init_tracing};

use simple_analysis::config::machine::transition;
use simple_analysis::config::{configure, configure_with, from_arguments, parse_str, LineAction, Section};
use simple_analysis::errors::{AnalysisError, ErrorKind};
use simple_analysis::fs::mock::MockFileSystem;

const SCENARIO: &str = "\
out.dat
data1.dat
data2.dat
hpx=px if px<-3
hpxpy=px:py
";

#[test]
fn scenario_without_dataset_line_keeps_first_file_as_dataset_candidate() {
    init_tracing();

    let cfg = parse_str("scenario.cfg", SCENARIO).unwrap();

    assert_eq!(cfg.input_file_name, "scenario.cfg");
    assert_eq!(cfg.output_artifact_path, "out.dat");
    assert_eq!(cfg.dataset_name, "data1.dat");
    assert_eq!(cfg.input_files, vec!["data2.dat".to_string()]);

    let names: Vec<&str> = cfg.projections.names().collect();
    assert_eq!(names, vec!["hpx", "hpxpy"]);

    let hpx = cfg.projections.get("hpx").unwrap();
    assert_eq!(hpx.expression, "px");
    assert_eq!(hpx.filter, "px<-3");

    let hpxpy = cfg.projections.get("hpxpy").unwrap();
    assert_eq!(hpxpy.expression, "px:py");
    assert!(hpxpy.filter.is_empty());
}

#[test]
fn full_config_with_comments_and_blank_runs() {
    init_tracing();

    let text = "\
# analysis of the hsimple ntuple

   result.dat      # output


ntuple   # the tree

hsimple.root
hsimple2.root   # second chunk


# histograms
hpx = px
hpxpy = px:py if px > 2
";
    let cfg = parse_str("full.cfg", text).unwrap();

    assert_eq!(cfg.output_artifact_path, "result.dat");
    assert_eq!(cfg.dataset_name, "ntuple");
    assert_eq!(
        cfg.input_files,
        vec!["hsimple.root".to_string(), "hsimple2.root".to_string()]
    );
    assert_eq!(cfg.projections.len(), 2);
    assert_eq!(cfg.projections.get("hpxpy").unwrap().filter, "px > 2");
}

#[test]
fn projection_right_after_output_means_no_dataset_and_no_inputs() {
    let cfg = parse_str("t.cfg", "out.dat\nhpx = px\n").unwrap();

    assert_eq!(cfg.output_artifact_path, "out.dat");
    assert!(cfg.dataset_name.is_empty());
    assert!(cfg.input_files.is_empty());
    assert!(cfg.projections.contains("hpx"));
}

#[test]
fn crlf_line_endings_are_accepted() {
    let cfg = parse_str("t.cfg", "out.dat\r\nntuple\r\na.dat\r\nh = px\r\n").unwrap();
    assert_eq!(cfg.dataset_name, "ntuple");
    assert_eq!(cfg.input_files, vec!["a.dat".to_string()]);
    assert_eq!(cfg.projections.get("h").unwrap().expression, "px");
}

#[test]
fn config_without_projections_parses() {
    let cfg = parse_str("t.cfg", "out.dat\nntuple\na.dat\n").unwrap();
    assert!(cfg.projections.is_empty());
}

#[test]
fn empty_config_has_no_output() {
    let err = parse_str("t.cfg", "\n# nothing here\n\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingOutput);
}

#[test]
fn duplicate_name_cites_second_occurrence() {
    let text = "\
out.dat
ntuple
a.dat

hpx = px
# a comment
hpy = py

hpx = px if px > 0
";
    let err = parse_str("dup.cfg", text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
    assert_eq!(err.line(), Some(9));
    let msg = err.to_string();
    assert!(msg.contains("hpx"), "{msg}");
    assert!(msg.contains("dup.cfg:9"), "{msg}");
}

#[test]
fn expression_errors_carry_physical_line_numbers() {
    let cases = [
        ("out.dat\nntuple\na.dat\nh = px\n\n=py\n", ErrorKind::MissingName, 6),
        ("out.dat\n\nntuple\na.dat\nh=\n", ErrorKind::MissingExpression, 5),
        ("out.dat\nh = px if\n", ErrorKind::InvalidFilterSyntax, 2),
    ];

    for (text, kind, line) in cases {
        let err = parse_str("e.cfg", text).unwrap_err();
        assert_eq!(err.kind(), kind, "{text:?}");
        assert_eq!(err.line(), Some(line), "{text:?}");
    }
}

#[test]
fn lines_after_first_projection_must_be_projections() {
    let err = parse_str("e.cfg", "out.dat\nntuple\na.dat\nh = px\nb.dat\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAssignment);
    assert_eq!(err.line(), Some(5));
}

#[test]
fn transition_table() {
    use LineAction::*;
    use Section::*;

    assert_eq!(transition(Output, ""), (Output, Skip));
    assert_eq!(transition(Output, "out.dat"), (TreeName, SetOutput));
    assert_eq!(transition(Output, "weird=name"), (TreeName, SetOutput));
    assert_eq!(transition(TreeName, ""), (TreeName, Skip));
    assert_eq!(transition(TreeName, "ntuple"), (InputFiles, SetDatasetName));
    assert_eq!(transition(TreeName, "h=px"), (Expressions, ParseExpression));
    assert_eq!(transition(InputFiles, "a.dat"), (InputFiles, AddInputFile));
    assert_eq!(transition(InputFiles, "h=px"), (Expressions, ParseExpression));
    assert_eq!(transition(Expressions, "b.dat"), (Expressions, ParseExpression));
    assert_eq!(transition(Done, "anything"), (Done, Skip));
}

#[test]
fn configure_reads_from_disk() {
    init_tracing();

    let file = config_file(SCENARIO);
    let cfg = configure(file.path()).unwrap();
    assert_eq!(cfg.input_file_name, file.path().display().to_string());
    assert_eq!(cfg.projections.len(), 2);
}

#[test]
fn configure_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = configure(dir.path().join("nope.cfg")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert!(err.to_string().contains("nope.cfg"));
}

#[test]
fn from_arguments_uses_the_same_projection_rules() {
    let cfg = from_arguments(
        "out.dat",
        vec!["a.dat".to_string(), "b.dat".to_string()],
        Some("ntuple"),
        ["hpx=px", "hpxpy = px:py if px>2"],
    )
    .unwrap();

    assert_eq!(cfg.input_file_name, "<command line>");
    assert_eq!(cfg.dataset_name, "ntuple");
    assert_eq!(cfg.input_files.len(), 2);
    assert_eq!(cfg.projections.get("hpxpy").unwrap().filter, "px>2");

    let err = from_arguments("out.dat", vec![], None, ["h=px", "g=py", "h=pz"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
    assert_eq!(err.line(), Some(3));

    let err = from_arguments("out.dat", vec![], None, ["h px"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAssignment);
    assert_eq!(err.line(), Some(1));

    let err = from_arguments("  ", vec![], None, ["h=px"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingOutput);
}

#[test]
fn configure_non_utf8_file_keeps_the_cause() {
    let fs = MockFileSystem::new();
    fs.add_file("latin1.cfg", vec![b'o', b'u', b't', 0xff, b'\n']);

    match configure_with(&fs, "latin1.cfg") {
        Err(e @ AnalysisError::FileNotFound { .. }) => {
            let msg = e.to_string();
            assert!(msg.contains("latin1.cfg"), "{msg}");
            assert!(msg.contains("UTF-8"), "{msg}");
        }
        Err(e) => panic!("Expected FileNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}
