pub mod message;
pub mod normalize;
pub mod payload;

pub use message::*;
pub use normalize::*;
pub use payload::*;
