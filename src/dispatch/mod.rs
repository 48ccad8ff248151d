pub mod priority;
pub mod smartstop;
mod dispatch_tests;

pub use priority::Decision;
pub use priority::DispatchOutcome;
pub use priority::DispatchRule;
pub use priority::Dispatcher;
pub use priority::EmergencyCheck;
pub use smartstop::SmartStop;
pub use smartstop::Verdict;
