use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use polarnode_frame::{format_hex, CommandFrame, ProtocolVersion, TelemetryFrame};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A record ready for printing in any [`OutputFormat`].
pub trait Record: Serialize {
    /// Ordered `(field, value)` pairs for table and pretty output.
    fn rows(&self) -> Vec<(&'static str, String)>;

    /// Bytes written verbatim in raw mode; `None` falls back to pretty output.
    fn raw(&self) -> Option<&[u8]> {
        None
    }
}

#[derive(Serialize)]
pub struct TelemetryOutput {
    pub kind: &'static str,
    pub protocol: String,
    /// Capture line the message came from, when read from a capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub id: u16,
    pub temperature: f32,
    pub fan_on: bool,
    pub heater_on: bool,
    pub battery: Option<u8>,
    pub status: u8,
    pub status_label: &'static str,
    pub hex: String,
    #[serde(skip)]
    pub wire: Vec<u8>,
}

impl TelemetryOutput {
    pub fn new(frame: &TelemetryFrame, wire: &[u8], version: ProtocolVersion) -> Self {
        Self {
            kind: "telemetry",
            protocol: version.to_string(),
            line: None,
            id: frame.id,
            temperature: frame.temperature,
            fan_on: frame.fan_on,
            heater_on: frame.heater_on,
            battery: frame.battery,
            status: frame.status,
            status_label: frame.condition().label(),
            hex: format_hex(wire),
            wire: wire.to_vec(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl Record for TelemetryOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::with_capacity(9);
        if let Some(line) = self.line {
            rows.push(("line", line.to_string()));
        }
        rows.extend([
            ("id", self.id.to_string()),
            ("temperature", self.temperature.to_string()),
            ("fan", on_off(self.fan_on).to_string()),
            ("heater", on_off(self.heater_on).to_string()),
            (
                "battery",
                self.battery
                    .map(|b| format!("{b}%"))
                    .unwrap_or_else(|| "not reported".to_string()),
            ),
            ("status", format!("{} ({})", self.status_label, self.status)),
            ("hex", self.hex.clone()),
        ]);
        rows
    }

    fn raw(&self) -> Option<&[u8]> {
        Some(&self.wire)
    }
}

#[derive(Serialize)]
pub struct CommandOutput {
    pub kind: &'static str,
    pub protocol: String,
    pub command: String,
    pub command_type: u8,
    pub value: u8,
    pub hex: String,
    #[serde(skip)]
    pub wire: Vec<u8>,
}

impl CommandOutput {
    pub fn new(frame: &CommandFrame, wire: &[u8], version: ProtocolVersion) -> Self {
        Self {
            kind: "command",
            protocol: version.to_string(),
            command: frame.command.to_string(),
            command_type: frame.command.code(),
            value: frame.value,
            hex: format_hex(wire),
            wire: wire.to_vec(),
        }
    }
}

impl Record for CommandOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("command", self.command.clone()),
            ("type", format!("0x{:02X}", self.command_type)),
            ("value", self.value.to_string()),
            ("hex", self.hex.clone()),
        ]
    }

    fn raw(&self) -> Option<&[u8]> {
        Some(&self.wire)
    }
}

pub fn print_record<R: Record>(record: &R, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in record.rows() {
                table.add_row(vec![field.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => print_pretty(record),
        OutputFormat::Raw => match record.raw() {
            Some(bytes) => print_raw(bytes),
            None => print_pretty(record),
        },
    }
}

fn print_pretty<R: Record>(record: &R) {
    let line = record
        .rows()
        .into_iter()
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
