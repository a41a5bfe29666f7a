// HTTP boundary: multipart intake, conversion service and route wiring.

pub mod routes;
pub mod server;
pub mod service;
pub mod upload;
