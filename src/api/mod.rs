// HTTP API: ingredient matching over the loaded catalogs
pub mod handlers;
pub mod models;
pub mod routes;
