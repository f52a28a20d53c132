// Presentation layer - View bindings, chart adapters and the view controller
pub mod bindings;
pub mod charts;
pub mod commands;
pub mod surface;
pub mod view;
