// Dashboard domain model
use super::chart::Chart;
use super::passenger_class::PassengerClass;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub class: PassengerClass,
    pub survival: Chart,
    pub titles: Chart,
    pub ages: Chart,
}

impl Dashboard {
    pub fn new(class: PassengerClass, survival: Chart, titles: Chart, ages: Chart) -> Self {
        Self {
            class,
            survival,
            titles,
            ages,
        }
    }
}
