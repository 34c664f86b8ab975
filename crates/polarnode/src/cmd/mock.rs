use std::io::Write;

use polarnode_frame::{CaptureError, CaptureWriter, TelemetrySample};

use crate::cmd::{Context, MockArgs};
use crate::exit::{capture_error, frame_error, CliResult, SUCCESS};
use crate::output::{print_record, TelemetryOutput};

pub fn run(args: MockArgs, ctx: Context) -> CliResult<i32> {
    let sample = TelemetrySample {
        id: args.id,
        temperature: args.temperature,
        fan_on: args.fan,
        heater_on: args.heater,
        battery: args.battery,
        status: args.status,
    };
    let wire = ctx.codec.encode_telemetry(&sample);

    if args.capture {
        let comment = format!("node {} protocol {}", args.id, ctx.codec.version());
        write_capture(std::io::stdout().lock(), &comment, &wire)
            .map_err(|err| capture_error("capture write failed", err))?;
        return Ok(SUCCESS);
    }

    // Decode what was built so the printed record reflects what a client sees,
    // e.g. a rounded integer temperature.
    let frame = ctx
        .codec
        .decode_telemetry(&wire)
        .map_err(|err| frame_error("mock message rejected", err))?;
    print_record(
        &TelemetryOutput::new(&frame, &wire, ctx.codec.version()),
        ctx.format,
    );
    Ok(SUCCESS)
}

fn write_capture<W: Write>(out: W, comment: &str, wire: &[u8]) -> Result<(), CaptureError> {
    let mut writer = CaptureWriter::new(out);
    writer.write_comment(comment)?;
    writer.write_message(wire)?;
    writer.flush()
}
