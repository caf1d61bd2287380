pub mod adapter;
pub mod core;
pub mod date_range;
pub mod page;
pub mod port;
pub mod query;
pub mod settings;
