pub mod health_route;
pub mod query;
pub mod root_route;
