mod action;
mod config;
mod layout;
mod randr;

use anyhow::Result;
use argh::FromArgs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use action::Action;
use config::Config;
use layout::{Horizontal, LayoutPlanner, Vertical};
use randr::{Randr, XrandrProcess};
use screenalign_randr::{parse_status, ConnectionState, Output, Status};

#[derive(FromArgs)]
/// Arrange an internal and an external monitor with xrandr.
struct Args {
    /// internal output name (detected when omitted)
    #[argh(option)]
    internal: Option<String>,

    /// xrandr program to run
    #[argh(option)]
    xrandr: Option<String>,

    /// config file (default: ~/.config/screenalign/config.json)
    #[argh(option)]
    config: Option<PathBuf>,

    /// print the xrandr command instead of running it
    #[argh(switch, short = 'n')]
    dry_run: bool,

    #[argh(subcommand)]
    command: SubCommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    List(ListArgs),
    Right(RightArgs),
    Left(LeftArgs),
    Above(AboveArgs),
    Below(BelowArgs),
    Clone(CloneArgs),
    External(ExternalArgs),
    Internal(InternalArgs),
    Toggle(ToggleArgs),
}

#[derive(FromArgs)]
/// List outputs and their resolutions.
#[argh(subcommand, name = "list")]
struct ListArgs {
    /// print the parsed status as JSON
    #[argh(switch)]
    json: bool,
}

#[derive(FromArgs)]
/// Place the external monitor right of the internal one.
#[argh(subcommand, name = "right")]
struct RightArgs {
    /// vertical alignment: top, middle or bottom (default bottom)
    #[argh(option, default = "Vertical::Bottom")]
    align: Vertical,
}

#[derive(FromArgs)]
/// Place the external monitor left of the internal one.
#[argh(subcommand, name = "left")]
struct LeftArgs {
    /// vertical alignment: top, middle or bottom (default bottom)
    #[argh(option, default = "Vertical::Bottom")]
    align: Vertical,
}

#[derive(FromArgs)]
/// Place the external monitor above the internal one.
#[argh(subcommand, name = "above")]
struct AboveArgs {
    /// horizontal alignment: left, middle or right (default middle)
    #[argh(option, default = "Horizontal::Middle")]
    align: Horizontal,
}

#[derive(FromArgs)]
/// Place the external monitor below the internal one.
#[argh(subcommand, name = "below")]
struct BelowArgs {
    /// horizontal alignment: left, middle or right (default middle)
    #[argh(option, default = "Horizontal::Middle")]
    align: Horizontal,
}

#[derive(FromArgs)]
/// Mirror all connected outputs at their largest shared resolution.
#[argh(subcommand, name = "clone")]
struct CloneArgs {}

#[derive(FromArgs)]
/// Use only the external monitor.
#[argh(subcommand, name = "external")]
struct ExternalArgs {}

#[derive(FromArgs)]
/// Use only the internal monitor.
#[argh(subcommand, name = "internal")]
struct InternalArgs {}

#[derive(FromArgs)]
/// Cycle internal only, clone and external only.
#[argh(subcommand, name = "toggle")]
struct ToggleArgs {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config =
        Config::load(args.config.as_deref())?.with_overrides(args.internal, args.xrandr);
    let randr = XrandrProcess::new(config.xrandr.clone(), args.dry_run);

    run(&randr, &config, args.command, &mut io::stdout())
}

fn run(
    randr: &dyn Randr,
    config: &Config,
    command: SubCommand,
    out: &mut dyn Write,
) -> Result<()> {
    let status = parse_status(&randr.query()?);
    for output in &status.outputs {
        tracing::debug!(
            "{} {:?} active={} modes={}",
            output.name,
            output.state,
            output.is_active(),
            output.modes.len()
        );
    }

    // `None` means toggle, which depends on the resolved internal output.
    let requested = match command {
        SubCommand::List(ListArgs { json }) => return list(&status, json, out),
        SubCommand::Right(RightArgs { align }) => Some(Action::Extend {
            horizontal: Horizontal::RightOf,
            vertical: align,
        }),
        SubCommand::Left(LeftArgs { align }) => Some(Action::Extend {
            horizontal: Horizontal::LeftOf,
            vertical: align,
        }),
        SubCommand::Above(AboveArgs { align }) => Some(Action::Extend {
            horizontal: align,
            vertical: Vertical::Above,
        }),
        SubCommand::Below(BelowArgs { align }) => Some(Action::Extend {
            horizontal: align,
            vertical: Vertical::Below,
        }),
        SubCommand::Clone(_) => Some(Action::Clone),
        SubCommand::External(_) => Some(Action::ExternalOnly),
        SubCommand::Internal(_) => Some(Action::InternalOnly),
        SubCommand::Toggle(_) => None,
    };

    let internal = layout::resolve_internal(&status, config.internal.as_deref())?;
    tracing::info!("Internal output: {}", internal);

    let action = requested.unwrap_or_else(|| {
        let action = action::toggle(&status, &internal);
        tracing::info!("Toggle: {:?}", action);
        action
    });

    let planner = LayoutPlanner::new(&status, &internal, &config.xrandr);
    let command = planner.plan(action)?;
    randr.apply(&command)
}

fn list(status: &Status, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, status)?;
        writeln!(out)?;
        return Ok(());
    }

    for output in &status.outputs {
        writeln!(out, "{}", describe(output))?;
    }
    Ok(())
}

fn describe(output: &Output) -> String {
    let mut line = output.name.clone();
    match output.state {
        ConnectionState::Connected => line.push_str(" connected"),
        ConnectionState::Disconnected => line.push_str(" disconnected"),
        ConnectionState::Unknown => line.push_str(" unknown"),
    }
    if output.primary {
        line.push_str(" primary");
    }
    if let Some(geometry) = output.geometry {
        line.push_str(&format!(
            " {}+{}+{}",
            geometry.resolution, geometry.position.x, geometry.position.y
        ));
    }
    if let Some(mode) = output.active_mode() {
        line.push_str(&format!(" active={}", mode.resolution));
    }
    if let Some(mode) = output.preferred_mode() {
        line.push_str(&format!(" preferred={}", mode.resolution));
    }
    line
}
