use crate::output::{Position, Resolution};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Auto,
    Resolution { resolution: Resolution },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSetting {
    Off,
    On {
        mode: ModeChoice,
        position: Option<Position>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArgs {
    pub name: String,
    pub setting: OutputSetting,
}

impl OutputArgs {
    pub fn off(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setting: OutputSetting::Off,
        }
    }

    pub fn auto(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setting: OutputSetting::On {
                mode: ModeChoice::Auto,
                position: None,
            },
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        if let OutputSetting::On { position: pos, .. } = &mut self.setting {
            *pos = Some(position);
        }
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        if let OutputSetting::On { mode, .. } = &mut self.setting {
            *mode = ModeChoice::Resolution { resolution };
        }
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--output".to_string(), self.name.clone()];
        match self.setting {
            OutputSetting::Off => args.push("--off".to_string()),
            OutputSetting::On { mode, position } => {
                if let Some(position) = position {
                    args.push("--pos".to_string());
                    args.push(position.to_string());
                }
                match mode {
                    ModeChoice::Auto => args.push("--auto".to_string()),
                    ModeChoice::Resolution { resolution } => {
                        args.push("--mode".to_string());
                        args.push(resolution.to_string());
                    }
                }
            }
        }
        args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandrCommand {
    pub program: String,
    pub outputs: Vec<OutputArgs>,
}

impl RandrCommand {
    pub fn new(program: impl Into<String>, outputs: Vec<OutputArgs>) -> Self {
        Self {
            program: program.into(),
            outputs,
        }
    }

    pub fn args(&self) -> Vec<String> {
        self.outputs.iter().flat_map(OutputArgs::args).collect()
    }
}

impl fmt::Display for RandrCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
