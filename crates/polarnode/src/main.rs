mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use polarnode_frame::Codec;

use crate::cmd::{Command, Context, ProtocolArg};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "polarnode",
    version,
    about = "Decode and build PolarNode telemetry and command frames"
)]
struct Cli {
    /// Protocol version both ends agree on.
    #[arg(
        long,
        value_enum,
        env = "POLARNODE_PROTOCOL",
        default_value = "v3",
        global = true
    )]
    protocol: ProtocolArg,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let ctx = Context {
        codec: Codec::new(cli.protocol.into()),
        format: cli.format.unwrap_or_else(OutputFormat::default_for_stdout),
    };
    tracing::debug!(protocol = %ctx.codec.version(), "codec configured");

    match cmd::run(cli.command, ctx) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_with_global_protocol() {
        let cli = Cli::try_parse_from(["polarnode", "decode", "AB 2A 00", "--protocol", "v1"])
            .expect("decode args should parse");

        assert_eq!(cli.protocol, ProtocolArg::V1);
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn rejects_unknown_protocol() {
        let err = Cli::try_parse_from(["polarnode", "--protocol", "v9", "status", "0"])
            .expect_err("unknown protocol should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parses_encode_names() {
        let cli = Cli::try_parse_from(["polarnode", "encode", "heater", "off"])
            .expect("encode args should parse");
        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.command, polarnode_frame::CommandType::ToggleHeater);
                assert_eq!(args.value, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn mock_accepts_negative_temperature() {
        let cli = Cli::try_parse_from(["polarnode", "mock", "--temperature", "-12.5"])
            .expect("mock args should parse");
        match cli.command {
            Command::Mock(args) => assert_eq!(args.temperature, -12.5),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
