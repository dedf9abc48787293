pub mod aggregations;
pub mod charts;
pub mod controller;
