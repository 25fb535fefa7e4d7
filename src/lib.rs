pub mod configuration;
pub mod db;
pub mod forms;
pub mod helpers;
mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod startup;
pub mod telemetry;
pub mod views;
