use crate::cmd::{hex_arg, Context, InspectCommandArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_record, CommandOutput};

pub fn run(args: InspectCommandArgs, ctx: Context) -> CliResult<i32> {
    let message = hex_arg("MESSAGE", &args.message)?;
    let frame = ctx
        .codec
        .decode_command(&message)
        .map_err(|err| frame_error("command rejected", err))?;

    print_record(
        &CommandOutput::new(&frame, &message, ctx.codec.version()),
        ctx.format,
    );
    Ok(SUCCESS)
}
