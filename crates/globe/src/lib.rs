pub mod diagnostics;
pub mod session;
pub mod spin;
pub mod surface;

pub use diagnostics::*;
pub use session::*;
pub use spin::*;
pub use surface::*;

#[cfg(test)]
pub(crate) mod testing;
