// Domain layer - Dashboard view models and pure UI state
pub mod dashboard;
pub mod filter;
pub mod navigation;
pub mod point_fs;
pub mod vehicle;
