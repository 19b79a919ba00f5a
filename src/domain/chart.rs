// Chart domain model - renderer-agnostic description of a bar/quad chart

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => TextAlign::Left,
            "right" => TextAlign::Right,
            _ => TextAlign::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverMode {
    /// Tooltip shows while the pointer is over the mark itself.
    #[default]
    Mouse,
    /// Tooltip shows while the pointer is anywhere in the mark's x span.
    VLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    pub font_size: String,
    pub align: TextAlign,
    pub font_style: String,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font_size: "13px".to_string(),
            align: TextAlign::Left,
            font_style: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: Option<String>,
    /// Explicit ticks; `None` lets the renderer pick evenly spaced ones.
    pub ticks: Option<Vec<Tick>>,
    /// Tick label rotation in radians, counter-clockwise.
    pub label_orientation: f64,
    pub label_standoff: u32,
    pub label_font_size: String,
    pub tick_font_size: String,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            label: None,
            ticks: None,
            label_orientation: 0.0,
            label_standoff: 5,
            label_font_size: "13px".to_string(),
            tick_font_size: "11px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Fraction of the data span added around it, split between both sides.
    pub padding: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            padding: 0.1,
        }
    }
}

/// Axis-aligned rectangle in data coordinates. Bars and histogram quads both map onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub fill: String,
    pub line: Option<String>,
    pub tooltip: Vec<(String, String)>,
}

impl Mark {
    pub fn bar(x: f64, width: f64, top: f64, fill: impl Into<String>) -> Self {
        Self {
            left: x - width / 2.0,
            right: x + width / 2.0,
            bottom: 0.0,
            top,
            fill: fill.into(),
            line: None,
            tooltip: Vec::new(),
        }
    }

    pub fn quad(left: f64, right: f64, top: f64, fill: impl Into<String>) -> Self {
        Self {
            left,
            right,
            bottom: 0.0,
            top,
            fill: fill.into(),
            line: None,
            tooltip: Vec::new(),
        }
    }

    pub fn with_line(mut self, color: impl Into<String>) -> Self {
        self.line = Some(color.into());
        self
    }

    pub fn with_tooltip(mut self, rows: Vec<(String, String)>) -> Self {
        self.tooltip = rows;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub title_style: TitleStyle,
    pub font: String,
    pub width: u32,
    pub height: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub x_range: Range,
    pub y_range: Range,
    pub marks: Vec<Mark>,
    pub hover: HoverMode,
    /// Scale to the container width, keeping the aspect ratio.
    pub responsive: bool,
}

impl Chart {
    pub fn new(id: impl Into<String>, title: impl Into<String>, height: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            title_style: TitleStyle::default(),
            font: "helvetica".to_string(),
            width: 600,
            height,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            x_range: Range::default(),
            y_range: Range::default(),
            marks: Vec::new(),
            hover: HoverMode::default(),
            responsive: false,
        }
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    pub fn with_x_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.x_axis.ticks = Some(ticks);
        self
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis.label = Some(x.into());
        self.y_axis.label = Some(y.into());
        self
    }

    pub fn with_hover(mut self, hover: HoverMode) -> Self {
        self.hover = hover;
        self
    }
}
