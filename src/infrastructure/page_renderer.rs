// Maps a dashboard onto the index page template
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::svg_chart::{RenderError, render_chart};
use crate::infrastructure::template::{TemplateError, render_template};
use std::collections::HashMap;

pub const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Chart(#[from] RenderError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

pub fn render_dashboard_page(dashboard: &Dashboard, template: &str) -> Result<String, PageError> {
    let survived_chart = render_chart(&dashboard.survival)?;
    let title_chart = render_chart(&dashboard.titles)?;
    let hist_age = render_chart(&dashboard.ages)?;

    let mut vars = HashMap::new();
    vars.insert("div_survived_chart", survived_chart.div);
    vars.insert("script_survived_chart", survived_chart.script);
    vars.insert("div_title_chart", title_chart.div);
    vars.insert("script_title_chart", title_chart.script);
    vars.insert("div_hist_age", hist_age.div);
    vars.insert("script_hist_age", hist_age.script);
    vars.insert("selected_class", dashboard.class.to_string());

    Ok(render_template(template, &vars)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{Chart, Mark};
    use crate::domain::passenger_class::PassengerClass;

    fn dashboard(class: PassengerClass) -> Dashboard {
        Dashboard::new(
            class,
            Chart::new("survived-chart", "Survival", 400).with_marks(vec![Mark::bar(1.0, 0.9, 2.0, "red")]),
            Chart::new("title-chart", "Titles", 300),
            Chart::new("hist-age", "Ages", 400),
        )
    }

    #[test]
    fn test_index_template_embeds_every_fragment() {
        let page = render_dashboard_page(&dashboard(PassengerClass::Third), INDEX_TEMPLATE).unwrap();

        assert!(page.contains("id=\"survived-chart\""));
        assert!(page.contains("id=\"title-chart\""));
        assert!(page.contains("id=\"hist-age\""));
        assert_eq!(page.matches("document.getElementById(\"").count(), 3);
        assert!(page.contains("data-selected-class=\"3\""));
        assert!(!page.contains("${"));
    }

    #[test]
    fn test_template_missing_a_slot_is_an_error() {
        let err = render_dashboard_page(&dashboard(PassengerClass::First), "${div_unknown}").unwrap_err();
        assert!(matches!(err, PageError::Template(TemplateError::MissingVariable(_))));
    }
}
