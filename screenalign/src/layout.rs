use anyhow::{bail, Context, Result};
use screenalign_randr::{OutputArgs, Position, RandrCommand, Resolution, Status};
use std::str::FromStr;

use crate::action::Action;

const INTERNAL_PREFIXES: &[&str] = &["eDP", "LVDS", "DSI"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    LeftOf,
    RightOf,
    /// Left edges aligned.
    Start,
    Middle,
    /// Right edges aligned.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Above,
    Below,
    Top,
    Middle,
    Bottom,
}

impl Horizontal {
    pub fn offset(self, internal: Resolution, external: Resolution) -> i64 {
        let a = i64::from(internal.width);
        let b = i64::from(external.width);
        match self {
            Horizontal::LeftOf => -b,
            Horizontal::RightOf => a,
            Horizontal::Start => 0,
            Horizontal::Middle => (a - b).div_euclid(2),
            Horizontal::End => a - b,
        }
    }
}

impl Vertical {
    pub fn offset(self, internal: Resolution, external: Resolution) -> i64 {
        let a = i64::from(internal.height);
        let b = i64::from(external.height);
        match self {
            Vertical::Above => -b,
            Vertical::Below => a,
            Vertical::Top => 0,
            Vertical::Middle => (a - b).div_euclid(2),
            Vertical::Bottom => a - b,
        }
    }
}

impl FromStr for Horizontal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left-of" => Ok(Horizontal::LeftOf),
            "right-of" => Ok(Horizontal::RightOf),
            "left" | "start" => Ok(Horizontal::Start),
            "middle" | "center" => Ok(Horizontal::Middle),
            "right" | "end" => Ok(Horizontal::End),
            _ => bail!(
                "invalid horizontal alignment '{}' (use left, middle, right, left-of or right-of)",
                s
            ),
        }
    }
}

impl FromStr for Vertical {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "above" => Ok(Vertical::Above),
            "below" => Ok(Vertical::Below),
            "top" => Ok(Vertical::Top),
            "middle" | "center" => Ok(Vertical::Middle),
            "bottom" => Ok(Vertical::Bottom),
            _ => bail!(
                "invalid vertical alignment '{}' (use top, middle, bottom, above or below)",
                s
            ),
        }
    }
}

pub fn resolve_internal(status: &Status, configured: Option<&str>) -> Result<String> {
    if let Some(name) = configured {
        return match status.get(name) {
            Some(output) if output.is_connected() => Ok(name.to_string()),
            Some(_) => bail!("Internal output {} is not connected", name),
            None => bail!("Unknown internal output: {}", name),
        };
    }

    let connected: Vec<_> = status.connected().collect();
    connected
        .iter()
        .find(|o| INTERNAL_PREFIXES.iter().any(|p| o.name.starts_with(p)))
        .or_else(|| connected.iter().find(|o| o.primary))
        .or_else(|| connected.first())
        .map(|o| o.name.clone())
        .context("No connected outputs")
}

pub struct LayoutPlanner<'a> {
    status: &'a Status,
    internal: &'a str,
    program: &'a str,
}

impl<'a> LayoutPlanner<'a> {
    pub fn new(status: &'a Status, internal: &'a str, program: &'a str) -> Self {
        Self {
            status,
            internal,
            program,
        }
    }

    pub fn external(&self) -> Result<&'a str> {
        self.status
            .connected()
            .find(|o| o.name != self.internal)
            .map(|o| o.name.as_str())
            .context("No external output connected")
    }

    pub fn preferred_resolution(&self, name: &str) -> Result<Resolution> {
        let output = self
            .status
            .get(name)
            .with_context(|| format!("Unknown output: {}", name))?;
        output
            .preferred_mode()
            .map(|m| m.resolution)
            .with_context(|| format!("Output {} advertises no modes", name))
    }

    pub fn plan(&self, action: Action) -> Result<RandrCommand> {
        match action {
            Action::Extend {
                horizontal,
                vertical,
            } => self.extend(horizontal, vertical),
            Action::Clone => self.clone_all(),
            Action::ExternalOnly => self.external_only(),
            Action::InternalOnly => self.internal_only(),
        }
    }

    pub fn extend(&self, horizontal: Horizontal, vertical: Vertical) -> Result<RandrCommand> {
        let external = self.external()?;
        let internal_res = self.preferred_resolution(self.internal)?;
        let external_res = self.preferred_resolution(external)?;

        let (internal_pos, external_pos) = normalize(
            horizontal.offset(internal_res, external_res),
            vertical.offset(internal_res, external_res),
        )?;

        tracing::debug!(
            "{} {} at {}, {} {} at {}",
            self.internal,
            internal_res,
            internal_pos,
            external,
            external_res,
            external_pos
        );

        Ok(self.command(vec![
            OutputArgs::auto(self.internal).with_position(internal_pos),
            OutputArgs::auto(external).with_position(external_pos),
        ]))
    }

    pub fn clone_all(&self) -> Result<RandrCommand> {
        let names = self.status.connected_names();
        if names.is_empty() {
            bail!("No connected outputs");
        }

        let resolution = self
            .status
            .largest_common_resolution(&names)
            .with_context(|| format!("No resolution shared by {}", names.join(", ")))?;

        tracing::debug!("Cloning {} at {}", names.join(", "), resolution);

        Ok(self.command(
            names
                .into_iter()
                .map(|name| {
                    OutputArgs::auto(name)
                        .with_position(Position::default())
                        .with_resolution(resolution)
                })
                .collect(),
        ))
    }

    pub fn external_only(&self) -> Result<RandrCommand> {
        let external = self.external()?;
        Ok(self.command(vec![
            OutputArgs::off(self.internal),
            OutputArgs::auto(external),
        ]))
    }

    pub fn internal_only(&self) -> Result<RandrCommand> {
        let mut outputs = vec![OutputArgs::auto(self.internal)];
        outputs.extend(
            self.status
                .active()
                .filter(|o| o.name != self.internal)
                .map(|o| OutputArgs::off(o.name.as_str())),
        );
        Ok(self.command(outputs))
    }

    fn command(&self, outputs: Vec<OutputArgs>) -> RandrCommand {
        RandrCommand::new(self.program, outputs)
    }
}

/// Returns (internal, external) positions for an external offset of (x, y),
/// shifted so neither position is negative.
fn normalize(x: i64, y: i64) -> Result<(Position, Position)> {
    let shift_x = x.min(0);
    let shift_y = y.min(0);
    Ok((
        position(-shift_x, -shift_y)?,
        position(x - shift_x, y - shift_y)?,
    ))
}

fn position(x: i64, y: i64) -> Result<Position> {
    Ok(Position::new(
        i32::try_from(x).with_context(|| format!("x position {} out of range", x))?,
        i32::try_from(y).with_context(|| format!("y position {} out of range", y))?,
    ))
}
