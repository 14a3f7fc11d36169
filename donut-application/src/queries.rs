pub mod debt_queries;
pub mod shame_queries;
