pub mod call;
pub mod config;
pub mod elevator;
pub mod error;
pub mod hr;
pub mod queue;
pub mod request;
pub mod system;

pub use call::{Call, CallType, Sense};
pub use elevator::Elevator;
pub use error::DispatchError;
pub use queue::ElevatorQueue;
pub use request::{RawRequest, Request};
pub use system::ElevatorSystem;
