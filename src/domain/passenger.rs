// Passenger domain model and the in-memory dataset
use super::passenger_class::PassengerClass;

#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub class: u8,
    pub survived: u8,
    pub name: String,
    pub age: Option<f64>,
    pub title: String,
}

impl Passenger {
    /// Returns `None` when the name carries no comma to locate the title.
    pub fn new(class: u8, survived: u8, name: String, age: Option<f64>) -> Option<Self> {
        let title = Self::extract_title(&name)?;
        Some(Self {
            class,
            survived,
            name,
            age,
            title,
        })
    }

    /// "Braund, Mr. Owen Harris" -> "Mr."
    pub fn extract_title(name: &str) -> Option<String> {
        let (_, rest) = name.split_once(',')?;
        let rest = rest.split(',').next().unwrap_or_default();
        Some(rest.split_whitespace().next().unwrap_or_default().to_string())
    }

    pub fn is_in(&self, class: PassengerClass) -> bool {
        self.class == class.number()
    }
}

/// Passenger table loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    passengers: Vec<Passenger>,
    mean_age: f64,
}

impl Dataset {
    pub fn new(passengers: Vec<Passenger>) -> Self {
        let mean_age = Self::compute_mean_age(&passengers);
        Self {
            passengers,
            mean_age,
        }
    }

    fn compute_mean_age(passengers: &[Passenger]) -> f64 {
        let ages: Vec<f64> = passengers.iter().filter_map(|p| p.age).collect();
        if ages.is_empty() {
            return 0.0;
        }
        ages.iter().sum::<f64>() / ages.len() as f64
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Mean of every known age, across all classes.
    pub fn mean_age(&self) -> f64 {
        self.mean_age
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn in_class(&self, class: PassengerClass) -> impl Iterator<Item = &Passenger> + '_ {
        self.passengers.iter().filter(move |p| p.is_in(class))
    }
}
