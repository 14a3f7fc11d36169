pub mod airtable_store;

pub use airtable_store::*;
