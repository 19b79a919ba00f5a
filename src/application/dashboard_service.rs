// Dashboard service - Use case for building the per-class charts
use crate::application::chart_style::apply_chart_style;
use crate::application::palette::cycle_palette;
use crate::application::statistics::{age_histogram, survival_counts, title_counts};
use crate::domain::chart::{Chart, HoverMode, Mark, Tick};
use crate::domain::dashboard::Dashboard;
use crate::domain::passenger::Dataset;
use crate::domain::passenger_class::PassengerClass;
use crate::infrastructure::config::ChartSettings;
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

const BAR_WIDTH: f64 = 0.9;
const HISTOGRAM_LINE_COLOR: &str = "black";
const COUNT_AXIS_LABEL: &str = "Passengers";

pub const SURVIVED_CHART_ID: &str = "survived-chart";
pub const TITLE_CHART_ID: &str = "title-chart";
pub const AGE_CHART_ID: &str = "hist-age";

pub fn survival_label(code: u8) -> String {
    match code {
        0 => "Did not Survive".to_string(),
        1 => "Survived".to_string(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    dataset: Arc<Dataset>,
    settings: ChartSettings,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>, settings: ChartSettings) -> Self {
        Self { dataset, settings }
    }

    pub fn build_dashboard(&self, class: PassengerClass) -> Dashboard {
        Dashboard::new(
            class,
            self.survival_chart(class),
            self.title_chart(class),
            self.age_chart(class),
        )
    }

    pub fn survival_chart(&self, class: PassengerClass) -> Chart {
        let counts = survival_counts(&self.dataset, class);
        let colors = cycle_palette(2, self.palette_from(1));

        let marks = counts
            .iter()
            .map(|&(code, count)| {
                let fill = colors.get(code as usize).cloned().unwrap_or_default();
                Mark::bar(code as f64, BAR_WIDTH, count as f64, fill).with_tooltip(vec![
                    ("Survived?".to_string(), survival_label(code)),
                    ("Count".to_string(), count.to_string()),
                ])
            })
            .collect();
        let ticks = counts
            .iter()
            .map(|&(code, _)| Tick::new(code as f64, survival_label(code)))
            .collect();

        self.styled(
            Chart::new(SURVIVED_CHART_ID, "Did/Did not Survive for Current Class", 400)
                .with_marks(marks)
                .with_x_ticks(ticks)
                .with_axis_labels("Outcome", COUNT_AXIS_LABEL),
        )
    }

    pub fn title_chart(&self, class: PassengerClass) -> Chart {
        let counts = title_counts(&self.dataset, class);
        let colors = cycle_palette(counts.len(), &self.settings.palette);

        let marks = counts
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, ((title, count), fill))| {
                Mark::bar(i as f64, BAR_WIDTH, *count as f64, fill).with_tooltip(vec![
                    ("Title".to_string(), title.clone()),
                    ("Count".to_string(), count.to_string()),
                ])
            })
            .collect();
        let ticks = counts
            .iter()
            .enumerate()
            .map(|(i, (title, _))| Tick::new(i as f64, title.clone()))
            .collect();

        let mut chart = Chart::new(TITLE_CHART_ID, "Titles for Current Class", 300)
            .with_marks(marks)
            .with_x_ticks(ticks)
            .with_axis_labels("Title", COUNT_AXIS_LABEL);
        chart.x_axis.label_orientation = FRAC_PI_4;
        self.styled(chart)
    }

    pub fn age_chart(&self, class: PassengerClass) -> Chart {
        let fill = self.palette_from(1).first().cloned().unwrap_or_default();

        let marks = age_histogram(&self.dataset, class)
            .into_iter()
            .map(|bin| {
                Mark::quad(bin.left, bin.right, bin.count as f64, fill.clone())
                    .with_line(HISTOGRAM_LINE_COLOR)
                    .with_tooltip(vec![
                        ("From".to_string(), format!("{:.2}", bin.left)),
                        ("Thru".to_string(), format!("{:.2}", bin.right)),
                        ("Count".to_string(), bin.count.to_string()),
                    ])
            })
            .collect();

        self.styled(
            Chart::new(AGE_CHART_ID, "Age Histogram", 400)
                .with_marks(marks)
                .with_axis_labels("Age", COUNT_AXIS_LABEL)
                .with_hover(HoverMode::VLine),
        )
    }

    fn palette_from(&self, start: usize) -> &[String] {
        self.settings.palette.get(start..).unwrap_or_default()
    }

    fn styled(&self, mut chart: Chart) -> Chart {
        apply_chart_style(&mut chart, &self.settings);
        chart
    }
}
