//! `replicationdata.proto`
//!
//! Snapshot of a replica's replication state.
//!
//! ```text
//! message Status {
//!   string position              = 1;
//!   bool   slave_io_running      = 2;
//!   bool   slave_sql_running     = 3;
//!   uint32 seconds_behind_master = 4;
//!   string master_host           = 5;
//!   int32  master_port           = 6;
//!   int32  master_connect_retry  = 7;
//! }
//! ```

use crate::error::Result;
use crate::schema::{FieldDescriptor, FieldKind, FileDescriptor};

pub const FILE_NAME: &str = "replicationdata.proto";
pub const PACKAGE: &str = "replicationdata";
pub const GO_PACKAGE: &str = "github.com/xsec-lab/go/vt/proto/replicationdata";

/// Fully qualified name of `Status`
pub const STATUS: &str = "replicationdata.Status";

/// Field names of `Status`
pub mod status {
    pub const POSITION: &str = "position";
    pub const SLAVE_IO_RUNNING: &str = "slave_io_running";
    pub const SLAVE_SQL_RUNNING: &str = "slave_sql_running";
    pub const SECONDS_BEHIND_MASTER: &str = "seconds_behind_master";
    pub const MASTER_HOST: &str = "master_host";
    pub const MASTER_PORT: &str = "master_port";
    pub const MASTER_CONNECT_RETRY: &str = "master_connect_retry";
}

/// Build the file descriptor
pub fn file_descriptor() -> Result<FileDescriptor> {
    FileDescriptor::new(FILE_NAME, PACKAGE)
        .go_package(GO_PACKAGE)
        .message(
            "Status",
            vec![
                FieldDescriptor::singular(status::POSITION, 1, FieldKind::String),
                FieldDescriptor::singular(status::SLAVE_IO_RUNNING, 2, FieldKind::Bool),
                FieldDescriptor::singular(status::SLAVE_SQL_RUNNING, 3, FieldKind::Bool),
                FieldDescriptor::singular(status::SECONDS_BEHIND_MASTER, 4, FieldKind::Uint32),
                FieldDescriptor::singular(status::MASTER_HOST, 5, FieldKind::String),
                FieldDescriptor::singular(status::MASTER_PORT, 6, FieldKind::Int32),
                FieldDescriptor::singular(status::MASTER_CONNECT_RETRY, 7, FieldKind::Int32),
            ],
        )
}
