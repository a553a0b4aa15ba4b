pub mod analytics;
pub mod error;
pub mod lenient;
pub mod matches;

pub use analytics::*;
pub use error::*;
pub use matches::*;
