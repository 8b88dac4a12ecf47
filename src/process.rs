//! Running rule commands through the host shell.

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Termination {
    Success,
    Failure,
}

/// Synchronous command execution.  The evaluator only needs "run this
/// and tell me whether it succeeded"; output goes straight to the
/// console and there is no timeout.
pub trait CommandRunner {
    fn run_command(&mut self, cmdline: &str) -> anyhow::Result<Termination>;
}

pub struct ShellRunner {}

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner {}
    }
}

impl CommandRunner for ShellRunner {
    fn run_command(&mut self, cmdline: &str) -> anyhow::Result<Termination> {
        #[cfg(unix)]
        let status = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(cmdline)
            .status()?;
        #[cfg(windows)]
        let status = std::process::Command::new("cmd")
            .arg("/c")
            .arg(cmdline)
            .status()?;
        Ok(if status.success() {
            Termination::Success
        } else {
            Termination::Failure
        })
    }
}
