pub mod default_route;
pub mod result_route;
