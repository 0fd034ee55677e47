pub mod index_source;
pub mod strategies;

pub use index_source::*;
pub use strategies::*;
