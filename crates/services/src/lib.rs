pub mod enrichment;
pub mod form;
pub mod matchup;
pub mod provider;

pub use enrichment::*;
pub use form::*;
pub use matchup::*;
pub use provider::*;
