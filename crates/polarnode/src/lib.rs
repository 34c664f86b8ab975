//! PolarNode telemetry/command protocol.
//!
//! The codec itself lives in [`frame`]; this crate re-exports it and ships the
//! `polarnode` inspection CLI (behind the `cli` feature).
//!
//! ```
//! use polarnode::frame::{Codec, CommandFrame, ProtocolVersion};
//!
//! let codec = Codec::new(ProtocolVersion::V3);
//! let wire = CommandFrame::toggle_fan(true).encode(codec.version());
//! assert_eq!(wire[0], 0xBA);
//! assert_eq!(codec.decode_command(&wire).unwrap(), CommandFrame::toggle_fan(true));
//! ```

/// Re-export frame codec types.
pub mod frame {
    pub use polarnode_frame::*;
}
