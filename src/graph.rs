//! The rule graph, a mapping from rule names to rules.

use rustc_hash::FxHashMap;

/// A named buildable unit.  The rule's name doubles as the path of the
/// file its command is expected to produce (its target).
#[derive(Debug)]
pub struct Rule {
    pub name: String,
    /// Dependency names, in declaration order.  Each either names another
    /// rule or is a plain file path with no rule attached.
    pub dependencies: Vec<String>,
    /// Shell command run when the rule is judged stale.
    pub command: String,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}:{}",
            self.name,
            self.dependencies.join(" "),
            self.command
        )
    }
}

/// All rules from one build file, keyed by name.  Immutable for the
/// lifetime of a build invocation.
#[derive(Debug, Default)]
pub struct RuleGraph {
    rules: FxHashMap<String, Rule>,
}

impl RuleGraph {
    /// Add a rule.  If a rule with the same name is already present the
    /// first one wins and this is a no-op.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.entry(rule.name.clone()).or_insert(rule);
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }
}
