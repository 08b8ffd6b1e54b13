use anyhow::{Context, Result};
use screenalign_randr::RandrCommand;
use std::process::{Command, Output, Stdio};

pub trait Randr {
    fn query(&self) -> Result<String>;

    fn apply(&self, command: &RandrCommand) -> Result<()>;
}

pub struct XrandrProcess {
    program: String,
    dry_run: bool,
}

impl XrandrProcess {
    pub fn new(program: impl Into<String>, dry_run: bool) -> Self {
        Self {
            program: program.into(),
            dry_run,
        }
    }
}

impl Randr for XrandrProcess {
    fn query(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--query")
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {}", self.program))?;
        check_status(&self.program, &output)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn apply(&self, command: &RandrCommand) -> Result<()> {
        if self.dry_run {
            tracing::info!("Dry run, not executing: {}", command);
            println!("{}", command);
            return Ok(());
        }

        tracing::info!("Running: {}", command);
        let output = Command::new(&command.program)
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {}", command.program))?;
        check_status(&command.program, &output)
    }
}

fn check_status(program: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("{} failed ({}): {}", program, output.status, stderr.trim())
}
