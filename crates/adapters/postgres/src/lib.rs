//! warehouse-adapter-postgres - PostgreSQL 适配器

mod connection;
mod error_mapper;
mod queries;
mod rows;
mod sales_report_repository;
mod schema;

pub use connection::*;
pub use error_mapper::*;
pub use sales_report_repository::*;
pub use schema::*;
