// Uniform visual formatting shared by every dashboard chart
use crate::domain::chart::{Axis, Chart, TextAlign};
use crate::infrastructure::config::ChartSettings;

pub fn apply_chart_style(chart: &mut Chart, settings: &ChartSettings) {
    chart.font = settings.font.clone();
    chart.title_style.font_size = settings.title_font_size.clone();
    chart.title_style.align = TextAlign::from_name(&settings.title_alignment);
    chart.title_style.font_style = settings.title_font_style.clone();

    // Counts are never negative.
    chart.y_range.start = Some(0.0);
    chart.x_range.padding = settings.inner_padding;

    style_axis(&mut chart.x_axis, settings);
    style_axis(&mut chart.y_axis, settings);

    chart.responsive = true;
}

fn style_axis(axis: &mut Axis, settings: &ChartSettings) {
    axis.label_font_size = settings.axis_label_size.clone();
    axis.tick_font_size = settings.axis_ticks_size.clone();
    axis.label_standoff = settings.default_padding;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_chart_style() {
        let settings = ChartSettings::default();
        let mut chart = Chart::new("c", "Title", 400);
        chart.x_axis.label_orientation = 1.0;

        apply_chart_style(&mut chart, &settings);

        assert_eq!(chart.font, "Helvetica");
        assert_eq!(chart.title_style.font_size, "16pt");
        assert_eq!(chart.title_style.align, TextAlign::Center);
        assert_eq!(chart.title_style.font_style, "bold italic");
        assert_eq!(chart.y_range.start, Some(0.0));
        assert_eq!(chart.y_range.end, None);
        assert_eq!(chart.x_range.padding, 0.015);
        assert_eq!(chart.x_axis.label_font_size, "14pt");
        assert_eq!(chart.y_axis.tick_font_size, "12pt");
        assert_eq!(chart.y_axis.label_standoff, 30);
        assert!(chart.responsive);
        // Data-specific settings are left alone.
        assert_eq!(chart.x_axis.label_orientation, 1.0);
        assert_eq!(chart.height, 400);
    }
}
