pub mod reconcile;
pub mod scan;
pub mod view;

pub use reconcile::*;
pub use scan::*;
pub use view::*;

#[cfg(test)]
mod tests;
