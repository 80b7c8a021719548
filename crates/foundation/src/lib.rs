pub mod easing;
pub mod geo;

// Foundation crate: small, well-tested primitives only.
pub use easing::*;
pub use geo::*;
