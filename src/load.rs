//! Build file loading: parses rule lines and constructs the rule graph.

use crate::graph::RuleGraph;
use crate::parse;
use anyhow::{anyhow, Result};

/// Read a build file and construct the graph of its rules.
///
/// A malformed line is reported as a warning and skipped; the rest of
/// the file is still usable.  Duplicate rule names keep the first
/// definition.  Dependency names are not validated here: a name with no
/// rule attached is resolved during evaluation as a plain file.
pub fn read(build_filename: &str) -> Result<RuleGraph> {
    let text = std::fs::read_to_string(build_filename)
        .map_err(|err| anyhow!("cannot open build file {}: {}", build_filename, err))?;
    let mut graph = RuleGraph::default();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse::rule_line(line) {
            Ok(rule) => graph.add_rule(rule),
            Err(err) => println!(
                "rmk: warning: {}:{}: {}: {:?}",
                build_filename,
                i + 1,
                err.msg,
                line
            ),
        }
    }
    Ok(graph)
}
