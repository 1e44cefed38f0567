//! `vtctldata.proto`
//!
//! Envelope for running a vtctl command remotely.
//!
//! ```text
//! import "logutil.proto";
//!
//! message ExecuteVtctlCommandRequest {
//!   repeated string args           = 1;
//!   int64           action_timeout = 2;
//! }
//!
//! message ExecuteVtctlCommandResponse {
//!   logutil.Event event = 1;
//! }
//! ```
//!
//! `logutil.Event` is owned by the logging subsystem and must be registered
//! separately before a response carrying an event is encoded or decoded.

use crate::error::Result;
use crate::schema::{FieldDescriptor, FieldKind, FileDescriptor};

pub const FILE_NAME: &str = "vtctldata.proto";
pub const PACKAGE: &str = "vtctldata";
pub const GO_PACKAGE: &str = "github.com/xsec-lab/vitess/go/vt/proto/vtctldata";

/// File the `Event` type is declared in
pub const LOGUTIL_FILE_NAME: &str = "logutil.proto";

/// Fully qualified name of the external event type
pub const LOGUTIL_EVENT: &str = "logutil.Event";

pub const EXECUTE_VTCTL_COMMAND_REQUEST: &str = "vtctldata.ExecuteVtctlCommandRequest";
pub const EXECUTE_VTCTL_COMMAND_RESPONSE: &str = "vtctldata.ExecuteVtctlCommandResponse";

/// Field names of `ExecuteVtctlCommandRequest`
pub mod request {
    pub const ARGS: &str = "args";
    pub const ACTION_TIMEOUT: &str = "action_timeout";
}

/// Field names of `ExecuteVtctlCommandResponse`
pub mod response {
    pub const EVENT: &str = "event";
}

/// Build the file descriptor
pub fn file_descriptor() -> Result<FileDescriptor> {
    FileDescriptor::new(FILE_NAME, PACKAGE)
        .dependency(LOGUTIL_FILE_NAME)
        .go_package(GO_PACKAGE)
        .message(
            "ExecuteVtctlCommandRequest",
            vec![
                FieldDescriptor::repeated(request::ARGS, 1, FieldKind::String),
                FieldDescriptor::singular(request::ACTION_TIMEOUT, 2, FieldKind::Int64),
            ],
        )?
        .message(
            "ExecuteVtctlCommandResponse",
            vec![FieldDescriptor::singular(
                response::EVENT,
                1,
                FieldKind::message(LOGUTIL_EVENT),
            )],
        )
}
