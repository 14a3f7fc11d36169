pub mod donut_handlers;
pub mod ops_handlers;
pub mod slack_handlers;

pub use donut_handlers::*;
pub use ops_handlers::*;
pub use slack_handlers::*;
