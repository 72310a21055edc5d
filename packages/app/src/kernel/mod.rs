//! Kernel module - application infrastructure and dependencies.

pub mod deps;
pub mod subscription;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AppDeps, GoogleGeocodeAdapter};
pub use subscription::Subscription;
pub use test_dependencies::TestDependencies;
pub use traits::*;
