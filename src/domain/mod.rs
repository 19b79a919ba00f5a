// Domain layer - Passenger data, chart and dashboard models
pub mod chart;
pub mod dashboard;
pub mod passenger;
pub mod passenger_class;
