pub mod board;
pub mod config;
pub mod control;
pub mod exception;
pub mod page;
pub mod param;
pub mod request;
pub mod response;
pub mod server;
pub mod snapshot;
pub mod util;

pub use board::{Board, HeapStats, HostBoard, StaticInfo};
pub use config::Config;
pub use control::{Device, DeviceState};
pub use exception::Exception;
pub use request::{Directive, Request};
pub use response::Response;
pub use server::{Server, SharedDevice};
pub use snapshot::Snapshot;
