pub mod feed;
pub mod fetch;
pub mod gtfs;
pub mod output;
pub mod route;
pub mod schedule;
