pub mod definition;
pub mod id;
pub mod workflow;

pub use definition::*;
pub use id::*;
