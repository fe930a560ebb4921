// Application layer: turns fleet views into CLI output.

pub mod report;
#[cfg(feature = "cli")]
pub mod runner;

#[cfg(feature = "cli")]
pub use runner::FleetRunner;
