use polarnode_frame::CommandFrame;

use crate::cmd::{Context, EncodeArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, CommandOutput};

pub fn run(args: EncodeArgs, ctx: Context) -> CliResult<i32> {
    let frame = CommandFrame::new(args.command, args.value);
    let wire = frame.encode(ctx.codec.version());
    tracing::debug!(command = %frame.command, value = frame.value, len = wire.len(), "encoded command");

    print_record(
        &CommandOutput::new(&frame, &wire, ctx.codec.version()),
        ctx.format,
    );
    Ok(SUCCESS)
}
