use polarnode_frame::{format_hex, ChecksumKind};
use serde::Serialize;

use crate::cmd::{hex_arg, ChecksumArgs, Context};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, Record};

#[derive(Serialize)]
struct ChecksumOutput {
    algorithm: String,
    length: usize,
    value: u16,
    trailer: String,
}

impl ChecksumOutput {
    fn compute(kind: ChecksumKind, data: &[u8]) -> Self {
        let value = kind.compute(data);
        let trailer = &value.to_be_bytes()[2 - kind.size()..];
        Self {
            algorithm: kind.to_string(),
            length: data.len(),
            value,
            trailer: format_hex(trailer),
        }
    }
}

impl Record for ChecksumOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("algorithm", self.algorithm.clone()),
            ("length", self.length.to_string()),
            ("value", format!("0x{:04X}", self.value)),
            ("trailer", self.trailer.clone()),
        ]
    }
}

pub fn run(args: ChecksumArgs, ctx: Context) -> CliResult<i32> {
    let data = hex_arg("DATA", &args.data)?;
    let kind = args
        .algorithm
        .map(ChecksumKind::from)
        .unwrap_or_else(|| ctx.codec.version().checksum());

    print_record(&ChecksumOutput::compute(kind, &data), ctx.format);
    Ok(SUCCESS)
}
