//! Fleet dashboard client: polls the fleet backend, renders metrics, the
//! vehicle table and charts into a view surface, and re-polls on an interval.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
