// Domain value objects
pub mod event_type;
pub mod mention;

pub use event_type::*;
pub use mention::*;
