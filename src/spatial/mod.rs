pub mod catalog;
pub mod region;
pub mod resolver;

pub use catalog::*;
pub use region::*;
pub use resolver::*;
