use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use polarnode_frame::{ChecksumKind, Codec, CommandType, ProtocolVersion};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod encode;
pub mod inspect_command;
pub mod mock;
pub mod status;
pub mod version;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one telemetry message given as hex.
    Decode(DecodeArgs),
    /// Decode every telemetry message in a hex capture, dropping rejects.
    Watch(WatchArgs),
    /// Encode a command frame.
    Encode(EncodeArgs),
    /// Decode a command frame given as hex.
    InspectCommand(InspectCommandArgs),
    /// Build a telemetry message as a node would send it.
    Mock(MockArgs),
    /// Compute a checksum over arbitrary bytes.
    Checksum(ChecksumArgs),
    /// Explain a status code.
    Status(StatusArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub codec: Codec,
    pub format: OutputFormat,
}

pub fn run(command: Command, ctx: Context) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, ctx),
        Command::Watch(args) => watch::run(args, ctx),
        Command::Encode(args) => encode::run(args, ctx),
        Command::InspectCommand(args) => inspect_command::run(args, ctx),
        Command::Mock(args) => mock::run(args, ctx),
        Command::Checksum(args) => checksum::run(args, ctx),
        Command::Status(args) => status::run(args, ctx),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    V1,
    V2,
    V3,
}

impl From<ProtocolArg> for ProtocolVersion {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::V1 => ProtocolVersion::V1,
            ProtocolArg::V2 => ProtocolVersion::V2,
            ProtocolArg::V3 => ProtocolVersion::V3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Crc16,
    Xor8,
}

impl From<AlgorithmArg> for ChecksumKind {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Crc16 => ChecksumKind::Crc16,
            AlgorithmArg::Xor8 => ChecksumKind::Xor8,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Telemetry message as hex (e.g. "AB 2A 00 ...").
    pub message: String,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Capture file with one hex message per line. Default: stdin.
    pub file: Option<PathBuf>,
    /// Exit after N accepted messages.
    #[arg(long)]
    pub count: Option<usize>,
    /// Exit with a data error if any message was rejected.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command: fan, heater, or a raw type byte (e.g. 0x03).
    #[arg(value_parser = parse_command_type)]
    pub command: CommandType,
    /// Value: on, off, or a raw byte (e.g. 1).
    #[arg(value_parser = parse_value)]
    pub value: u8,
}

#[derive(Args, Debug)]
pub struct InspectCommandArgs {
    /// Command message as hex (e.g. "BA 01 01 ...").
    pub message: String,
}

#[derive(Args, Debug)]
pub struct MockArgs {
    /// Node id.
    #[arg(long, default_value_t = 1)]
    pub id: u16,
    /// Temperature in degrees Celsius.
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub temperature: f32,
    /// Report the fan as on.
    #[arg(long)]
    pub fan: bool,
    /// Report the heater as on.
    #[arg(long)]
    pub heater: bool,
    /// Battery percentage. Omit to leave it unreported.
    #[arg(long)]
    pub battery: Option<u8>,
    /// Raw status code.
    #[arg(long, default_value_t = 0)]
    pub status: u8,
    /// Print the message as a capture line instead of a record.
    #[arg(long)]
    pub capture: bool,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Bytes as hex.
    pub data: String,
    /// Algorithm. Default: the one paired with --protocol.
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Status code (0-255).
    pub code: u8,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a hex argument given on the command line.
pub fn hex_arg(name: &str, text: &str) -> CliResult<Vec<u8>> {
    polarnode_frame::parse_hex(text)
        .map_err(|err| CliError::new(USAGE, format!("{name} is not valid hex: {err}")))
}

fn parse_byte(input: &str) -> Result<u8, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse::<u8>(),
    };
    parsed.map_err(|err| format!("invalid byte {input:?}: {err}"))
}

fn parse_command_type(input: &str) -> Result<CommandType, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "fan" | "toggle-fan" => Ok(CommandType::ToggleFan),
        "heater" | "toggle-heater" => Ok(CommandType::ToggleHeater),
        _ => parse_byte(input).map(CommandType::from),
    }
}

fn parse_value(input: &str) -> Result<u8, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(1),
        "off" | "false" => Ok(0),
        _ => parse_byte(input),
    }
}
