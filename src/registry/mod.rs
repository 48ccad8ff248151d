pub mod call_registry;
pub mod overrides;
pub mod traffic;

pub use call_registry::CallRegistry;
pub use overrides::InternalDestinations;
pub use overrides::ManualOverrides;
pub use traffic::age_and_generate;
pub use traffic::estimate_passengers;
