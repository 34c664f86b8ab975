use std::fs::File;
use std::io::{BufRead, BufReader};

use polarnode_frame::{CaptureError, CaptureReader, Codec};

use crate::cmd::{Context, WatchArgs};
use crate::exit::{capture_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_record, TelemetryOutput};

#[derive(Debug, Default, PartialEq, Eq)]
struct WatchSummary {
    accepted: usize,
    rejected: usize,
}

pub fn run(args: WatchArgs, ctx: Context) -> CliResult<i32> {
    let summary = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            watch(BufReader::new(file), ctx.codec, args.count, |out| {
                print_record(&out, ctx.format)
            })?
        }
        None => watch(std::io::stdin().lock(), ctx.codec, args.count, |out| {
            print_record(&out, ctx.format)
        })?,
    };

    tracing::info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        protocol = %ctx.codec.version(),
        "capture finished"
    );

    if args.strict && summary.rejected > 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{} message(s) rejected", summary.rejected),
        ));
    }
    Ok(SUCCESS)
}

/// Decode each message independently. A rejected message is logged and
/// dropped; decoding continues with the next line.
fn watch<R, F>(
    input: R,
    codec: Codec,
    count: Option<usize>,
    mut on_frame: F,
) -> CliResult<WatchSummary>
where
    R: BufRead,
    F: FnMut(TelemetryOutput),
{
    let mut reader = CaptureReader::new(input);
    let mut summary = WatchSummary::default();

    loop {
        if count.is_some_and(|limit| summary.accepted >= limit) {
            break;
        }

        let captured = match reader.read_message() {
            Ok(Some(captured)) => captured,
            Ok(None) => break,
            Err(CaptureError::InvalidHex { line, source }) => {
                tracing::warn!(line, error = %source, "dropping unparsable line");
                summary.rejected += 1;
                continue;
            }
            Err(err) => return Err(capture_error("capture read failed", err)),
        };

        match codec.decode_telemetry(&captured.bytes) {
            Ok(frame) => {
                summary.accepted += 1;
                on_frame(
                    TelemetryOutput::new(&frame, &captured.bytes, codec.version())
                        .with_line(captured.line),
                );
            }
            Err(err) => {
                tracing::warn!(line = captured.line, error = %err, "dropping message");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
