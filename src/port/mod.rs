pub mod definition;
pub mod types;

pub use definition::*;
pub use types::*;
