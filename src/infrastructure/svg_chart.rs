// SVG renderer turning a chart model into an embeddable (script, div) fragment
use crate::domain::chart::{Axis, Chart, HoverMode, Mark, Range, TextAlign};

const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 10.0;
const TICK_LENGTH: f64 = 6.0;
// Rough glyph advance relative to the font size, used to reserve room for labels.
const GLYPH_WIDTH: f64 = 0.6;
const TARGET_TICKS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFragment {
    pub script: String,
    pub div: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize tooltips for chart {id}: {source}")]
    Tooltips {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn render_chart(chart: &Chart) -> Result<ChartFragment, RenderError> {
    let layout = Layout::new(chart);

    let mut div = format!(
        "<div class=\"chart\" id=\"{}\" style=\"position: relative;\">",
        escape_markup(&chart.id)
    );
    div.push_str(&render_svg(chart, &layout));
    div.push_str(
        "<div class=\"chart-tooltip\" hidden style=\"position: absolute; pointer-events: none;\"></div>",
    );
    div.push_str("</div>");

    let script = render_script(chart)?;
    Ok(ChartFragment { script, div })
}

/// Pixel geometry of the plot frame plus resolved data ranges.
#[derive(Debug, Clone, PartialEq)]
struct Layout {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x: (f64, f64),
    y: (f64, f64),
    x_ticks: Vec<(f64, String)>,
    y_ticks: Vec<(f64, String)>,
}

impl Layout {
    fn new(chart: &Chart) -> Self {
        let width = chart.width as f64;
        let height = chart.height as f64;

        let x_extent = extent(chart.marks.iter().flat_map(|m| [m.left, m.right]));
        let y_extent = extent(chart.marks.iter().flat_map(|m| [m.bottom, m.top]));
        let x = resolve_range(&chart.x_range, x_extent);
        let y = resolve_range(&chart.y_range, y_extent);

        let x_ticks = axis_ticks(&chart.x_axis, x);
        let y_ticks = axis_ticks(&chart.y_axis, y);

        let title_height = if chart.title.is_empty() {
            0.0
        } else {
            font_px(&chart.title_style.font_size) + 10.0
        };

        let y_tick_px = font_px(&chart.y_axis.tick_font_size);
        let widest_y_label = y_ticks.iter().map(|(_, l)| l.chars().count()).max().unwrap_or(0);
        let mut left = widest_y_label as f64 * y_tick_px * GLYPH_WIDTH + TICK_LENGTH + 8.0;
        if chart.y_axis.label.is_some() {
            left += font_px(&chart.y_axis.label_font_size) + chart.y_axis.label_standoff as f64;
        }

        let x_tick_px = font_px(&chart.x_axis.tick_font_size);
        let widest_x_label = x_ticks.iter().map(|(_, l)| l.chars().count()).max().unwrap_or(0);
        let angle = chart.x_axis.label_orientation;
        let label_extent = widest_x_label as f64 * x_tick_px * GLYPH_WIDTH * angle.sin().abs()
            + x_tick_px * angle.cos().abs();
        let mut bottom = label_extent + TICK_LENGTH + 8.0;
        if chart.x_axis.label.is_some() {
            bottom += font_px(&chart.x_axis.label_font_size) + chart.x_axis.label_standoff as f64;
        }

        Self {
            width,
            height,
            left,
            right: (width - MARGIN_RIGHT).max(left + 1.0),
            top: MARGIN_TOP + title_height,
            bottom: (height - bottom).max(MARGIN_TOP + title_height + 1.0),
            x,
            y,
            x_ticks,
            y_ticks,
        }
    }

    fn sx(&self, value: f64) -> f64 {
        self.left + (value - self.x.0) / (self.x.1 - self.x.0) * (self.right - self.left)
    }

    fn sy(&self, value: f64) -> f64 {
        self.bottom - (value - self.y.0) / (self.y.1 - self.y.0) * (self.bottom - self.top)
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        None => Some((v, v)),
    })
}

fn resolve_range(range: &Range, data: Option<(f64, f64)>) -> (f64, f64) {
    let (low, high) = data.unwrap_or((0.0, 1.0));
    let pad = (high - low) * range.padding / 2.0;

    let start = range.start.unwrap_or(low - pad);
    let mut end = range.end.unwrap_or(high + pad);
    if end <= start {
        end = start + 1.0;
    }
    (start, end)
}

fn axis_ticks(axis: &Axis, range: (f64, f64)) -> Vec<(f64, String)> {
    match &axis.ticks {
        Some(ticks) => ticks
            .iter()
            .filter(|t| t.position >= range.0 && t.position <= range.1)
            .map(|t| (t.position, t.label.clone()))
            .collect(),
        None => nice_ticks(range.0, range.1, TARGET_TICKS)
            .into_iter()
            .map(|v| (v, format_number(v)))
            .collect(),
    }
}

/// Ticks on a 1/2/5 x 10^n grid covering `[start, end]`.
fn nice_ticks(start: f64, end: f64, target: usize) -> Vec<f64> {
    let span = end - start;
    if !(span > 0.0) || target == 0 {
        return vec![start];
    }

    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (start / step).ceil();
    let last = (end / step + 1e-9).floor();
    (first as i64..=last as i64).map(|i| i as f64 * step).collect()
}

fn format_number(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// CSS font size ("16pt", "12px", "14") to pixels.
fn font_px(size: &str) -> f64 {
    let size = size.trim();
    if let Some(pt) = size.strip_suffix("pt") {
        pt.trim().parse::<f64>().map(|v| v * 4.0 / 3.0).unwrap_or(12.0)
    } else if let Some(px) = size.strip_suffix("px") {
        px.trim().parse().unwrap_or(12.0)
    } else {
        size.parse().unwrap_or(12.0)
    }
}

fn font_attributes(style: &str) -> String {
    let mut attributes = String::new();
    if style.contains("bold") {
        attributes.push_str(" font-weight=\"bold\"");
    }
    if style.contains("italic") {
        attributes.push_str(" font-style=\"italic\"");
    }
    attributes
}

fn render_svg(chart: &Chart, layout: &Layout) -> String {
    let mut svg = String::new();

    let size = if chart.responsive {
        "width=\"100%\" preserveAspectRatio=\"xMidYMid meet\"".to_string()
    } else {
        format!("width=\"{}\" height=\"{}\"", layout.width, layout.height)
    };
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" {} font-family=\"{}\">",
        layout.width,
        layout.height,
        size,
        escape_markup(&chart.font)
    ));

    let clip_id = format!("{}-clip", chart.id);
    svg.push_str(&format!(
        "<defs><clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath></defs>",
        escape_markup(&clip_id),
        layout.left,
        layout.top,
        layout.right - layout.left,
        layout.bottom - layout.top
    ));

    if !chart.title.is_empty() {
        let (x, anchor) = match chart.title_style.align {
            TextAlign::Left => (layout.left, "start"),
            TextAlign::Center => ((layout.left + layout.right) / 2.0, "middle"),
            TextAlign::Right => (layout.right, "end"),
        };
        svg.push_str(&format!(
            "<text class=\"chart-title\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" font-size=\"{}\"{}>{}</text>",
            x,
            layout.top - 10.0,
            anchor,
            escape_markup(&chart.title_style.font_size),
            font_attributes(&chart.title_style.font_style),
            escape_markup(&chart.title)
        ));
    }

    svg.push_str("<g class=\"grid\" stroke=\"#e5e5e5\">");
    for (value, _) in &layout.y_ticks {
        let y = layout.sy(*value);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            layout.left, y, layout.right, y
        ));
    }
    svg.push_str("</g>");

    svg.push_str(&format!(
        "<g class=\"marks\" clip-path=\"url(#{})\">",
        escape_markup(&clip_id)
    ));
    for (index, mark) in chart.marks.iter().enumerate() {
        svg.push_str(&render_mark(mark, index, layout, chart.hover));
    }
    svg.push_str("</g>");

    svg.push_str(&render_x_axis(&chart.x_axis, layout));
    svg.push_str(&render_y_axis(&chart.y_axis, layout));
    svg.push_str("</svg>");
    svg
}

fn render_mark(mark: &Mark, index: usize, layout: &Layout, hover: HoverMode) -> String {
    let x0 = layout.sx(mark.left.min(mark.right));
    let x1 = layout.sx(mark.left.max(mark.right));
    let y0 = layout.sy(mark.top.max(mark.bottom));
    let y1 = layout.sy(mark.top.min(mark.bottom));

    let fill = if mark.fill.is_empty() { "none" } else { mark.fill.as_str() };
    let stroke = match &mark.line {
        Some(color) => format!(" stroke=\"{}\"", escape_markup(color)),
        None => String::new(),
    };
    let target = match hover {
        HoverMode::Mouse => format!(" data-index=\"{}\"", index),
        HoverMode::VLine => String::new(),
    };

    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"{}{}/>",
        x0,
        y0,
        x1 - x0,
        y1 - y0,
        escape_markup(fill),
        stroke,
        target
    );
    if hover == HoverMode::VLine {
        out.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"transparent\" data-index=\"{}\"/>",
            x0,
            layout.top,
            x1 - x0,
            layout.bottom - layout.top,
            index
        ));
    }
    out
}

fn render_x_axis(axis: &Axis, layout: &Layout) -> String {
    let size = escape_markup(&axis.tick_font_size);
    let rotation = -axis.label_orientation.to_degrees();
    let label_y = layout.bottom + TICK_LENGTH + font_px(&axis.tick_font_size);

    let mut out = format!(
        "<g class=\"axis x-axis\" stroke=\"black\"><line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
        layout.left, layout.bottom, layout.right, layout.bottom
    );
    for (value, label) in &layout.x_ticks {
        let x = layout.sx(*value);
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            x,
            layout.bottom,
            x,
            layout.bottom + TICK_LENGTH
        ));
        if rotation == 0.0 {
            out.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\" stroke=\"none\">{}</text>",
                x,
                label_y,
                size,
                escape_markup(label)
            ));
        } else {
            out.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"{}\" stroke=\"none\" transform=\"rotate({:.1} {:.2} {:.2})\">{}</text>",
                x,
                label_y,
                size,
                rotation,
                x,
                label_y,
                escape_markup(label)
            ));
        }
    }
    if let Some(label) = &axis.label {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\" stroke=\"none\">{}</text>",
            (layout.left + layout.right) / 2.0,
            layout.height - 5.0,
            escape_markup(&axis.label_font_size),
            escape_markup(label)
        ));
    }
    out.push_str("</g>");
    out
}

fn render_y_axis(axis: &Axis, layout: &Layout) -> String {
    let size = escape_markup(&axis.tick_font_size);

    let mut out = format!(
        "<g class=\"axis y-axis\" stroke=\"black\"><line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
        layout.left, layout.top, layout.left, layout.bottom
    );
    for (value, label) in &layout.y_ticks {
        let y = layout.sy(*value);
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            layout.left - TICK_LENGTH,
            y,
            layout.left,
            y
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" dominant-baseline=\"middle\" font-size=\"{}\" stroke=\"none\">{}</text>",
            layout.left - TICK_LENGTH - 2.0,
            y,
            size,
            escape_markup(label)
        ));
    }
    if let Some(label) = &axis.label {
        let x = font_px(&axis.label_font_size);
        let y = (layout.top + layout.bottom) / 2.0;
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}\" stroke=\"none\" transform=\"rotate(-90 {:.2} {:.2})\">{}</text>",
            x,
            y,
            escape_markup(&axis.label_font_size),
            x,
            y,
            escape_markup(label)
        ));
    }
    out.push_str("</g>");
    out
}

const TOOLTIP_SCRIPT: &str = r#"<script type="text/javascript">
(function () {
  var root = document.getElementById(__CHART_ID__);
  if (!root) { return; }
  var tips = __TOOLTIPS__;
  var tooltip = root.querySelector(".chart-tooltip");
  root.querySelectorAll("[data-index]").forEach(function (el) {
    el.addEventListener("mousemove", function (ev) {
      var rows = tips[Number(el.getAttribute("data-index"))] || [];
      tooltip.textContent = "";
      rows.forEach(function (row) {
        var line = document.createElement("div");
        var key = document.createElement("span");
        key.className = "key";
        key.textContent = row[0] + ": ";
        var value = document.createElement("span");
        value.textContent = row[1];
        line.appendChild(key);
        line.appendChild(value);
        tooltip.appendChild(line);
      });
      var box = root.getBoundingClientRect();
      tooltip.style.left = (ev.clientX - box.left + 12) + "px";
      tooltip.style.top = (ev.clientY - box.top + 12) + "px";
      tooltip.hidden = false;
    });
    el.addEventListener("mouseleave", function () { tooltip.hidden = true; });
  });
})();
</script>"#;

fn render_script(chart: &Chart) -> Result<String, RenderError> {
    let tooltips: Vec<&Vec<(String, String)>> = chart.marks.iter().map(|m| &m.tooltip).collect();
    let tooltips = serde_json::to_string(&tooltips).map_err(|source| RenderError::Tooltips {
        id: chart.id.clone(),
        source,
    })?;
    let id = serde_json::to_string(&chart.id).map_err(|source| RenderError::Tooltips {
        id: chart.id.clone(),
        source,
    })?;

    Ok(TOOLTIP_SCRIPT
        .replace("__CHART_ID__", &escape_script(&id))
        .replace("__TOOLTIPS__", &escape_script(&tooltips)))
}

/// Keep JSON embedded in a `<script>` from closing the element early.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
