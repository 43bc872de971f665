// tests/line_parsing.rs

use simple_analysis::config::{normalize, parse_expression, ExpressionError, Projection};

fn projection(name: &str, expression: &str, filter: &str) -> Projection {
    Projection {
        name: name.to_string(),
        expression: expression.to_string(),
        filter: filter.to_string(),
    }
}

#[test]
fn normalize_strips_trailing_comment_and_whitespace() {
    assert_eq!(normalize("  result.dat\t # where it goes"), "result.dat");
    assert_eq!(normalize("\tntuple"), "ntuple");
    assert_eq!(normalize("hpx = px   "), "hpx = px");
}

#[test]
fn normalize_empty_and_comment_only_lines_become_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   \t  "), "");
    assert_eq!(normalize("# just a comment"), "");
    assert_eq!(normalize("    # indented comment = with equals"), "");
}

#[test]
fn normalize_keeps_escaped_hash() {
    assert_eq!(normalize(r"h\#1 = px # trailing"), "h#1 = px");
    assert_eq!(normalize(r"a\b"), r"a\b");
}

#[test]
fn parse_expression_without_filter() {
    assert_eq!(
        parse_expression("hpxpy=px:py").unwrap(),
        projection("hpxpy", "px:py", "")
    );
    assert!(!parse_expression("hpxpy=px:py").unwrap().has_filter());
}

#[test]
fn parse_expression_with_filter_trims_each_part() {
    assert_eq!(
        parse_expression("  hpx =  px   if   px<-3 ").unwrap(),
        projection("hpx", "px", "px<-3")
    );
}

#[test]
fn parse_expression_passes_expression_text_through() {
    let p = parse_expression("h = sqrt(px*px+py*py) if pz > 0 && px != py").unwrap();
    assert_eq!(p.expression, "sqrt(px*px+py*py)");
    assert_eq!(p.filter, "pz > 0 && px != py");
}

#[test]
fn parse_expression_only_splits_on_first_equals() {
    let p = parse_expression("h = px if px==3").unwrap();
    assert_eq!(p, projection("h", "px", "px==3"));
}

#[test]
fn if_inside_a_word_is_not_a_filter() {
    let p = parse_expression("h = diff_x + ifx").unwrap();
    assert_eq!(p, projection("h", "diff_x + ifx", ""));
}

#[test]
fn parse_expression_reports_missing_parts() {
    assert_eq!(
        parse_expression("hpx px").unwrap_err(),
        ExpressionError::MissingAssignment
    );
    assert_eq!(
        parse_expression("=px").unwrap_err(),
        ExpressionError::MissingName
    );
    assert_eq!(
        parse_expression("   = px").unwrap_err(),
        ExpressionError::MissingName
    );
    assert_eq!(
        parse_expression("hpx=").unwrap_err(),
        ExpressionError::MissingExpression
    );
    assert_eq!(
        parse_expression("hpx= if px>0").unwrap_err(),
        ExpressionError::MissingExpression
    );
    assert_eq!(
        parse_expression("hpx=px if").unwrap_err(),
        ExpressionError::InvalidFilterSyntax
    );
    assert_eq!(
        parse_expression("hpx=px if   ").unwrap_err(),
        ExpressionError::InvalidFilterSyntax
    );
}

#[test]
fn name_is_checked_before_expression() {
    assert_eq!(parse_expression("=").unwrap_err(), ExpressionError::MissingName);
}
