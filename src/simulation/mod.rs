pub mod rng;
pub mod simulation;

pub use rng::SimRng;
pub use simulation::Action;
pub use simulation::DecisionReport;
pub use simulation::Simulation;
pub use simulation::SimulationState;
