pub mod callbacks;
pub mod layout;
pub mod lib;
pub mod models;
pub mod routes;
