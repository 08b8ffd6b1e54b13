use crate::output::{
    ConnectionState, Geometry, Mode, Output, Position, RefreshRate, Resolution, Status,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static OUTPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>\S+) (?P<state>connected|disconnected|unknown connection)(?P<primary> primary)?(?: (?P<width>\d+)x(?P<height>\d+)\+(?P<x>-?\d+)\+(?P<y>-?\d+))?",
    )
    .expect("output header pattern is valid")
});

static MODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+(?P<name>(?P<width>\d+)x(?P<height>\d+)\S*)\s+(?P<rates>\d.*)$")
        .expect("mode line pattern is valid")
});

// xrandr prints each rate as "%6.2f" followed by '*' or ' ' and '+' or ' '.
static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<hz>\d+(?:\.\d+)?)(?P<current>\*)?\s?(?P<preferred>\+)?")
        .expect("refresh rate pattern is valid")
});

/// Parse the plain `xrandr` (or `xrandr --query`) listing.
///
/// Lines that are neither an output header nor a mode line are skipped, so
/// unexpected input produces fewer outputs rather than an error.
pub fn parse_status(text: &str) -> Status {
    let mut outputs: Vec<Output> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = OUTPUT_RE.captures(line) {
            outputs.push(parse_output(&caps));
            continue;
        }

        if let Some(caps) = MODE_RE.captures(line) {
            // Mode lines before the first header have no owner.
            if let Some(output) = outputs.last_mut() {
                if let Some(mode) = parse_mode(&caps) {
                    output.modes.push(mode);
                }
            }
        }
    }

    Status { outputs }
}

pub fn connected_output_names(text: &str) -> Vec<String> {
    parse_status(text).connected_names()
}

fn parse_output(caps: &Captures) -> Output {
    let state = match &caps["state"] {
        "connected" => ConnectionState::Connected,
        "disconnected" => ConnectionState::Disconnected,
        _ => ConnectionState::Unknown,
    };

    let mut output = Output::new(&caps["name"], state);
    output.primary = caps.name("primary").is_some();
    output.geometry = parse_geometry(caps);
    output
}

fn parse_geometry(caps: &Captures) -> Option<Geometry> {
    let number = |key: &str| caps.name(key).map(|m| m.as_str());

    let width = dimension(number("width")?)?;
    let height = dimension(number("height")?)?;
    let x = number("x")?.parse().ok()?;
    let y = number("y")?.parse().ok()?;

    Some(Geometry {
        resolution: Resolution::new(width, height),
        position: Position::new(x, y),
    })
}

fn parse_mode(caps: &Captures) -> Option<Mode> {
    let resolution = Resolution::new(dimension(&caps["width"])?, dimension(&caps["height"])?);

    let rates = RATE_RE
        .captures_iter(&caps["rates"])
        .filter_map(|rate| {
            Some(RefreshRate {
                hz: rate["hz"].parse().ok()?,
                current: rate.name("current").is_some(),
                preferred: rate.name("preferred").is_some(),
            })
        })
        .collect();

    Some(Mode {
        name: caps["name"].to_string(),
        resolution,
        rates,
    })
}

// Screen coordinates are signed 32-bit, so larger sizes cannot be placed.
fn dimension(s: &str) -> Option<u32> {
    let value: i32 = s.parse().ok()?;
    u32::try_from(value).ok()
}
