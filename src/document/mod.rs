pub mod conversion;
pub mod definition;
pub mod file;

pub use conversion::*;
pub use definition::*;
