mod aggregate;
mod field;
mod report;

pub use crate::aggregate::*;
pub use crate::field::*;
pub use crate::report::*;
