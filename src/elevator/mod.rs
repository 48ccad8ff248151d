pub mod fsm;

pub use fsm::board;
pub use fsm::disembark;
pub use fsm::step_floor;
pub use fsm::CarState;
pub use fsm::MovementFsm;
pub use fsm::MovementReport;
