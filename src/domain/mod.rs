//! Domain types for the redraft engine.
//! Defines the value records shared by the diff pipeline and the
//! session handler.

pub mod change;
pub mod error;
pub mod line_range;
pub mod range;
pub mod session;

pub use change::*;
pub use error::*;
pub use line_range::*;
pub use range::*;
pub use session::*;
