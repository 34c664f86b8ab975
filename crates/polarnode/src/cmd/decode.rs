use crate::cmd::{hex_arg, Context, DecodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_record, TelemetryOutput};

pub fn run(args: DecodeArgs, ctx: Context) -> CliResult<i32> {
    let message = hex_arg("MESSAGE", &args.message)?;
    let frame = ctx
        .codec
        .decode_telemetry(&message)
        .map_err(|err| frame_error("telemetry rejected", err))?;

    print_record(
        &TelemetryOutput::new(&frame, &message, ctx.codec.version()),
        ctx.format,
    );
    Ok(SUCCESS)
}
