// Infrastructure layer - External formats and adapters
pub mod config;
pub mod csv_dataset;
pub mod http_response;
pub mod page_renderer;
pub mod svg_chart;
pub mod template;
