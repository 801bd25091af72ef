pub mod matcher;
pub mod record;

pub use matcher::*;
pub use record::*;
