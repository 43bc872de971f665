// tests/config_properties.rs

use proptest::prelude::*;
use simple_analysis::config::parse_str;

/// Lines that normalise to nothing.
const FILLERS: &[&str] = &["", "   ", "\t", "# comment", "   # indented = comment", "#"];

#[derive(Debug, Clone)]
struct ConfigParts {
    output: String,
    dataset: Option<String>,
    inputs: Vec<String>,
    projections: Vec<(String, String, Option<String>)>,
}

impl ConfigParts {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.output.clone()];
        lines.extend(self.dataset.iter().cloned());
        lines.extend(self.inputs.iter().cloned());
        for (name, expr, filter) in &self.projections {
            match filter {
                Some(f) => lines.push(format!("{name} = {expr} if {f}")),
                None => lines.push(format!("{name}={expr}")),
            }
        }
        lines
    }
}

fn config_parts() -> impl Strategy<Value = ConfigParts> {
    (
        "[a-z]{1,8}\\.dat",
        proptest::option::of("[a-z]{1,8}"),
        proptest::collection::vec("[a-z]{1,8}\\.dat", 0..4),
        proptest::collection::vec(
            (
                "[a-z]{1,3}(:[a-z]{1,3})?"
                    .prop_filter("bare 'if' is the filter word", |e| e != "if"),
                proptest::option::of("[a-z]{1,3} ?[<>] ?-?[0-9]{1,2}"),
            ),
            0..5,
        ),
    )
        .prop_map(|(output, dataset, inputs, exprs)| ConfigParts {
            output,
            dataset,
            inputs,
            // Index-derived names keep them unique.
            projections: exprs
                .into_iter()
                .enumerate()
                .map(|(i, (expr, filter))| (format!("h{i}"), expr, filter))
                .collect(),
        })
}

fn render(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

proptest! {
    #[test]
    fn parsing_is_deterministic(parts in config_parts()) {
        let text = render(&parts.lines());
        let first = parse_str("p.cfg", &text).unwrap();
        let second = parse_str("p.cfg", &text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn blank_and_comment_lines_do_not_change_the_result(
        parts in config_parts(),
        inserts in proptest::collection::vec((any::<prop::sample::Index>(), 0..FILLERS.len()), 0..8),
        trailing in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let plain = parts.lines();
        let expected = parse_str("p.cfg", &render(&plain)).unwrap();

        let mut noisy: Vec<String> = plain
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if trailing[i % trailing.len()] {
                    format!("  {line}\t# note")
                } else {
                    line.clone()
                }
            })
            .collect();
        for (at, filler) in inserts {
            let pos = at.index(noisy.len() + 1);
            noisy.insert(pos, FILLERS[filler].to_string());
        }

        let actual = parse_str("p.cfg", &render(&noisy)).unwrap();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn projections_keep_declaration_order(parts in config_parts()) {
        let cfg = parse_str("p.cfg", &render(&parts.lines())).unwrap();
        let names: Vec<String> = cfg.projections.names().map(str::to_string).collect();
        let declared: Vec<String> = parts.projections.iter().map(|(n, _, _)| n.clone()).collect();
        prop_assert_eq!(names, declared);
    }
}
