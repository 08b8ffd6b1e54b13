use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (width, height) = s
            .split_once('x')
            .with_context(|| format!("Invalid resolution: {}", s))?;
        Ok(Self {
            width: width
                .parse()
                .with_context(|| format!("Invalid resolution width: {}", s))?,
            height: height
                .parse()
                .with_context(|| format!("Invalid resolution height: {}", s))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefreshRate {
    pub hz: f64,
    pub current: bool,
    pub preferred: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub name: String,
    pub resolution: Resolution,
    pub rates: Vec<RefreshRate>,
}

impl Mode {
    pub fn is_active(&self) -> bool {
        self.rates.iter().any(|r| r.current)
    }

    pub fn is_preferred(&self) -> bool {
        self.rates.iter().any(|r| r.preferred)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub resolution: Resolution,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub state: ConnectionState,
    pub primary: bool,
    pub geometry: Option<Geometry>,
    pub modes: Vec<Mode>,
}

impl Output {
    pub fn new(name: impl Into<String>, state: ConnectionState) -> Self {
        Self {
            name: name.into(),
            state,
            primary: false,
            geometry: None,
            modes: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn is_active(&self) -> bool {
        self.geometry.is_some() || self.modes.iter().any(Mode::is_active)
    }

    pub fn preferred_mode(&self) -> Option<&Mode> {
        self.modes
            .iter()
            .find(|m| m.is_preferred())
            .or_else(|| self.modes.first())
    }

    pub fn active_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|m| m.is_active())
    }

    pub fn resolutions(&self) -> BTreeSet<Resolution> {
        self.modes.iter().map(|m| m.resolution).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub outputs: Vec<Output>,
}

impl Status {
    pub fn get(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    pub fn connected(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter().filter(|o| o.is_connected())
    }

    pub fn connected_names(&self) -> Vec<String> {
        self.connected().map(|o| o.name.clone()).collect()
    }

    pub fn active(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter().filter(|o| o.is_active())
    }

    pub fn largest_common_resolution<S: AsRef<str>>(&self, names: &[S]) -> Option<Resolution> {
        let mut sets = names
            .iter()
            .map(|name| self.get(name.as_ref()).map(Output::resolutions));

        let mut common = sets.next()??;
        for set in sets {
            let set = set?;
            common.retain(|r| set.contains(r));
        }

        common
            .into_iter()
            .max_by_key(|r| (r.area(), r.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(name: &str, current: bool, preferred: bool) -> Mode {
        Mode {
            name: name.to_string(),
            resolution: name.parse().unwrap(),
            rates: vec![RefreshRate {
                hz: 60.0,
                current,
                preferred,
            }],
        }
    }

    fn output(name: &str, modes: Vec<Mode>) -> Output {
        Output {
            modes,
            ..Output::new(name, ConnectionState::Connected)
        }
    }

    #[test]
    fn test_resolution_from_str() {
        let r: Resolution = "1920x1080".parse().unwrap();
        assert_eq!(r, Resolution::new(1920, 1080));
        assert_eq!(r.to_string(), "1920x1080");
        assert!("1920".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_position_display_negative() {
        assert_eq!(Position::new(-1280, 0).to_string(), "-1280x0");
    }

    #[test]
    fn test_preferred_mode_flagged() {
        let out = output(
            "VGA1",
            vec![mode("1600x1200", false, false), mode("1920x1080", true, true)],
        );
        assert_eq!(out.preferred_mode().unwrap().name, "1920x1080");
    }

    #[test]
    fn test_preferred_mode_falls_back_to_first() {
        let out = output(
            "VGA1",
            vec![mode("1280x1024", false, false), mode("1024x768", true, false)],
        );
        assert_eq!(out.preferred_mode().unwrap().name, "1280x1024");
        assert_eq!(out.active_mode().unwrap().name, "1024x768");
    }

    #[test]
    fn test_preferred_mode_none_without_modes() {
        let out = output("HDMI1", vec![]);
        assert!(out.preferred_mode().is_none());
        assert!(!out.is_active());
    }

    #[test]
    fn test_largest_common_resolution() {
        let status = Status {
            outputs: vec![
                output(
                    "LVDS1",
                    vec![
                        mode("1366x768", true, true),
                        mode("1024x768", false, false),
                        mode("800x600", false, false),
                    ],
                ),
                output(
                    "VGA1",
                    vec![
                        mode("1920x1080", false, true),
                        mode("1024x768", false, false),
                        mode("800x600", false, false),
                    ],
                ),
            ],
        };
        assert_eq!(
            status.largest_common_resolution(&["LVDS1", "VGA1"]),
            Some(Resolution::new(1024, 768))
        );
        assert_eq!(status.largest_common_resolution(&["LVDS1", "DP1"]), None);
        assert_eq!(status.largest_common_resolution::<&str>(&[]), None);
    }

    #[test]
    fn test_largest_common_resolution_disjoint() {
        let status = Status {
            outputs: vec![
                output("A", vec![mode("1366x768", true, true)]),
                output("B", vec![mode("1920x1080", true, true)]),
            ],
        };
        assert_eq!(status.largest_common_resolution(&["A", "B"]), None);
    }

    #[test]
    fn test_largest_common_resolution_tie_prefers_width() {
        let status = Status {
            outputs: vec![
                output(
                    "A",
                    vec![mode("1200x1200", true, true), mode("1600x900", false, false)],
                ),
                output(
                    "B",
                    vec![mode("1600x900", true, true), mode("1200x1200", false, false)],
                ),
            ],
        };
        assert_eq!(
            status.largest_common_resolution(&["A", "B"]),
            Some(Resolution::new(1600, 900))
        );
    }
}
