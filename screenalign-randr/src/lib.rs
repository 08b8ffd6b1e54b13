pub mod command;
pub mod output;
pub mod parse;

pub use command::{ModeChoice, OutputArgs, OutputSetting, RandrCommand};
pub use output::{
    ConnectionState, Geometry, Mode, Output, Position, RefreshRate, Resolution, Status,
};
pub use parse::{connected_output_names, parse_status};
