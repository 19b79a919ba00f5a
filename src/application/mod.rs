// Application layer - Use cases over the loaded dataset
pub mod chart_style;
pub mod dashboard_service;
pub mod palette;
pub mod statistics;
