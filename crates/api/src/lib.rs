pub mod error;
pub mod operations;
pub mod routes;
pub mod slug;

pub use error::*;
pub use operations::*;
pub use routes::*;
pub use slug::*;
