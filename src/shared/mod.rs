pub mod error;
pub mod macros;
pub mod structs;

pub use error::ConfigError;
pub use error::DispatchError;
pub use structs::CallOrigin;
pub use structs::Direction;
pub use structs::ElevatorState;
pub use structs::HallCall;
pub use structs::Stats;
pub use structs::TrafficMode;
