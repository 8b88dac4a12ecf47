//! The staleness evaluator: decides, for a rule and everything under it,
//! what must be re-executed, and runs those commands dependency-first.

use crate::fs::{FileSystem, MTime};
use crate::graph::{Rule, RuleGraph};
use crate::process::{CommandRunner, Termination};
use anyhow::bail;
use std::time::SystemTime;

/// The outcome of evaluating one rule.  Transient: statuses live for a
/// single top-level evaluation and are never persisted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Status {
    UpToDate,
    /// The rule's command ran, or its target is known to have changed
    /// since the parent was last built.
    Executed,
}

/// Policy for a dependency that names neither a rule nor an existing
/// file, when the depending rule's own target exists.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MissingDeps {
    /// No signal; the dependency is skipped.
    Ignore,
    /// Counts as changed, forcing the depending rule to run.
    Rebuild,
    /// Fails the evaluation.
    Error,
}

impl std::str::FromStr for MissingDeps {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "ignore" => Ok(MissingDeps::Ignore),
            "rebuild" => Ok(MissingDeps::Rebuild),
            "error" => Ok(MissingDeps::Error),
            _ => bail!("unknown missing-deps policy {:?}, expected ignore|rebuild|error", s),
        }
    }
}

pub struct Evaluator<'a> {
    graph: &'a RuleGraph,
    fs: &'a dyn FileSystem,
    runner: &'a mut dyn CommandRunner,
    missing_deps: MissingDeps,
    /// "Now" as observed once at the start of the top-level evaluation.
    /// A target stamped after this point was produced during the current
    /// run and needs no further justification to count as changed.
    start_time: SystemTime,
    /// Rule names on the active recursion path, for cycle detection.
    visiting: Vec<&'a str>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        graph: &'a RuleGraph,
        fs: &'a dyn FileSystem,
        runner: &'a mut dyn CommandRunner,
        missing_deps: MissingDeps,
    ) -> Self {
        Evaluator {
            graph,
            fs,
            runner,
            missing_deps,
            start_time: SystemTime::now(),
            visiting: Vec::new(),
        }
    }

    /// Evaluate a rule requested at top level, running stale commands as
    /// a side effect.  Nothing is cached between calls; a second call
    /// re-derives every status from fresh stat()s.
    pub fn evaluate(&mut self, rule: &'a Rule) -> anyhow::Result<Status> {
        self.eval_rule(rule, MTime::Missing)
    }

    /// `parent_mtime` is the calling rule's target mtime as observed
    /// before this subtree ran anything; Missing at the root.
    fn eval_rule(&mut self, rule: &'a Rule, parent_mtime: MTime) -> anyhow::Result<Status> {
        if self.visiting.iter().any(|name| *name == rule.name) {
            bail!(
                "dependency cycle: {} -> {}",
                self.visiting.join(" -> "),
                rule.name
            );
        }

        let self_mtime = self.fs.stat(&rule.name)?;

        // The target was rewritten after this run began, e.g. by an
        // earlier visit through another parent.  Fresh by definition;
        // no need to walk the subtree again.
        if self_mtime.is_after(self.start_time) {
            return Ok(Status::Executed);
        }

        self.visiting.push(&rule.name);
        let result = self.eval_dependencies(rule, self_mtime);
        self.visiting.pop();

        let must_run = result? || !self_mtime.exists();
        if must_run {
            println!("executing {}", rule.name);
            if self.runner.run_command(&rule.command)? == Termination::Failure {
                println!(
                    "rmk: warning: command for {} failed: {:?}",
                    rule.name, rule.command
                );
            }
        }

        // Even when the command didn't run, a target stamped after the
        // parent's last build still obliges the parent to rebuild.
        // Compared against the mtime from before this subtree's side
        // effects.
        let newer_than_parent = match parent_mtime {
            MTime::Missing => false,
            MTime::Stamp(parent) => self_mtime.is_after(parent),
        };

        Ok(if must_run || newer_than_parent {
            Status::Executed
        } else {
            Status::UpToDate
        })
    }

    /// Walk a rule's dependencies in declaration order, returning whether
    /// any of them changed.  Dependencies run their commands before the
    /// caller decides about its own.
    fn eval_dependencies(&mut self, rule: &'a Rule, self_mtime: MTime) -> anyhow::Result<bool> {
        let mut any_executed = false;
        for dep in &rule.dependencies {
            let status = match self.graph.get(dep) {
                Some(sub_rule) => self.eval_rule(sub_rule, self_mtime)?,
                None => self.eval_leaf(rule, dep, self_mtime)?,
            };
            if status == Status::Executed {
                any_executed = true;
            }
        }
        Ok(any_executed)
    }

    /// A dependency with no rule attached: a plain file.
    fn eval_leaf(&self, rule: &Rule, dep: &str, self_mtime: MTime) -> anyhow::Result<Status> {
        let parent = match self_mtime {
            // A missing target must be rebuilt no matter what its
            // inputs look like.
            MTime::Missing => return Ok(Status::Executed),
            MTime::Stamp(t) => t,
        };
        Ok(match self.fs.stat(dep)? {
            stamp @ MTime::Stamp(_) if stamp.is_after(parent) => Status::Executed,
            MTime::Stamp(_) => Status::UpToDate,
            MTime::Missing => match self.missing_deps {
                MissingDeps::Ignore => Status::UpToDate,
                MissingDeps::Rebuild => Status::Executed,
                MissingDeps::Error => {
                    bail!("{}: input file {:?} is missing", rule.name, dep)
                }
            },
        })
    }
}
