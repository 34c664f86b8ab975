use polarnode_frame::Status;
use serde::Serialize;

use crate::cmd::{Context, StatusArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, Record};

#[derive(Serialize)]
struct StatusOutput {
    code: u8,
    label: &'static str,
    known: bool,
}

impl From<Status> for StatusOutput {
    fn from(status: Status) -> Self {
        Self {
            code: status.code(),
            label: status.label(),
            known: !matches!(status, Status::Unknown(_)),
        }
    }
}

impl Record for StatusOutput {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("code", self.code.to_string()),
            ("label", self.label.to_string()),
            ("known", self.known.to_string()),
        ]
    }
}

pub fn run(args: StatusArgs, ctx: Context) -> CliResult<i32> {
    print_record(&StatusOutput::from(Status::from(args.code)), ctx.format);
    Ok(SUCCESS)
}
