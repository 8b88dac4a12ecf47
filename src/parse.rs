//! Parser for build files: one rule per line, three ':'-separated fields,
//!   <name>: <dep1> <dep2> ... : <command>

use crate::graph::Rule;

#[derive(Debug)]
pub struct ParseError {
    pub msg: String,
}
pub type ParseResult<T> = Result<T, ParseError>;

fn parse_error<T, S: Into<String>>(msg: S) -> ParseResult<T> {
    Err(ParseError { msg: msg.into() })
}

/// Parse one rule line into a Rule.
///
/// The name field has all whitespace stripped, not just at the ends.
/// Dependencies are split on spaces with empty tokens dropped.  The
/// command is the verbatim remainder of the line, so it may itself
/// contain colons.
pub fn rule_line(line: &str) -> ParseResult<Rule> {
    let mut fields = line.splitn(3, ':');
    let name_field = fields.next().unwrap();
    let (deps_field, command) = match (fields.next(), fields.next()) {
        (Some(deps), Some(command)) => (deps, command),
        _ => return parse_error("expected three ':'-separated fields"),
    };

    let name: String = name_field.chars().filter(|c| !c.is_whitespace()).collect();
    if name.is_empty() {
        return parse_error("empty rule name");
    }

    let dependencies = deps_field
        .split(' ')
        .filter(|d| !d.is_empty())
        .map(str::to_owned)
        .collect();

    Ok(Rule {
        name,
        dependencies,
        command: command.to_owned(),
    })
}
