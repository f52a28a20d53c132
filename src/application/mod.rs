// Application layer - Loading and refresh orchestration
pub mod dashboard_api;
pub mod error;
pub mod loaders;
pub mod refresh_service;
