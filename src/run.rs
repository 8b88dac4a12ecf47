//! Command-line entry point: option handling and per-rule orchestration.

use crate::fs::{FileSystem, RealFileSystem};
use crate::graph::RuleGraph;
use crate::load;
use crate::process::ShellRunner;
use crate::work::{Evaluator, MissingDeps, Status};
use anyhow::anyhow;
use std::path::Path;

/// Resolve one requested rule name and evaluate it, reporting the
/// outcome on stdout.  Returns false if the evaluation itself failed;
/// an unknown name is only a diagnostic.
fn execute_rule(
    graph: &RuleGraph,
    fs: &dyn FileSystem,
    missing_deps: MissingDeps,
    name: &str,
) -> bool {
    let rule = match graph.get(name) {
        None => {
            println!("rmk: unknown rule {:?}", name);
            return true;
        }
        Some(rule) => rule,
    };
    let mut runner = ShellRunner::new();
    let mut eval = Evaluator::new(graph, fs, &mut runner, missing_deps);
    match eval.evaluate(rule) {
        Ok(Status::Executed) => {
            println!("rmk: executed {}", name);
            true
        }
        Ok(Status::UpToDate) => {
            println!("rmk: {} is up to date", name);
            true
        }
        Err(err) => {
            println!("rmk: error: {}", err);
            false
        }
    }
}

fn run_impl() -> anyhow::Result<i32> {
    let args: Vec<_> = std::env::args().collect();

    let mut opts = getopts::Options::new();
    opts.optopt("C", "", "chdir before running", "DIR");
    opts.optopt(
        "f",
        "",
        "specify input build file [default=build.rules]",
        "FILE",
    );
    opts.optopt(
        "",
        "missing-deps",
        "policy for an input file that exists neither as a rule nor on disk \
         (ignore|rebuild|error) [default=ignore]",
        "POLICY",
    );
    opts.optflag("h", "help", "");
    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        println!("{}", opts.usage("usage: rmk [options] [rule...]"));
        return Ok(1);
    }

    let missing_deps = match matches.opt_str("missing-deps") {
        Some(policy) => policy.parse::<MissingDeps>()?,
        None => MissingDeps::Ignore,
    };

    if let Some(dir) = matches.opt_str("C") {
        let dir = Path::new(&dir);
        std::env::set_current_dir(dir).map_err(|err| anyhow!("chdir {:?}: {}", dir, err))?;
    }

    let mut build_filename = "build.rules".to_string();
    if let Some(name) = matches.opt_str("f") {
        build_filename = name;
    }

    let graph = load::read(&build_filename)?;

    if matches.free.is_empty() {
        println!("rmk: no rules requested");
        return Ok(0);
    }

    // Each requested rule gets a full independent evaluation; nothing is
    // shared between them, not even stat results.
    let fs = RealFileSystem::new();
    let mut failed = false;
    for name in &matches.free {
        if !execute_rule(&graph, &fs, missing_deps, name) {
            failed = true;
        }
    }

    Ok(if failed { 1 } else { 0 })
}

pub fn run() -> anyhow::Result<i32> {
    run_impl()
}
