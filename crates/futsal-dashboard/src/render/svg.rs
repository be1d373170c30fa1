//! Minimal SVG drawing for charts: a data frame mapping values to pixels
//! and a canvas that collects elements.

use futsal_core::colors::is_light_color;

use super::escape;

const FONT_SIZE: f64 = 11.0;
const TICK_FONT_SIZE: f64 = 9.0;
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e6e6e6";

/// Format a tick or value label without a trailing `.0`
pub fn format_number(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.1}", v)
    }
}

/// Roughly `count` evenly spaced round values covering `min..=max`
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || count == 0 {
        return vec![min];
    }
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => magnitude,
        n if n <= 2.0 => 2.0 * magnitude,
        n if n <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };
    let mut ticks = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max + step * 1e-6 {
        // Avoid -0 labels
        ticks.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
        v += step;
    }
    ticks
}

/// Plot geometry: canvas size, margins and the data ranges of both axes
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 44.0,
            right: 14.0,
            top: 30.0,
            bottom: 36.0,
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }

    pub fn margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self
    }

    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_min = min;
        self.x_max = if max > min { max } else { min + 1.0 };
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_min = min;
        self.y_max = if max > min { max } else { min + 1.0 };
        self
    }

    pub fn plot_left(&self) -> f64 {
        self.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.right
    }

    pub fn plot_top(&self) -> f64 {
        self.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn x(&self, v: f64) -> f64 {
        self.plot_left() + (v - self.x_min) / (self.x_max - self.x_min) * (self.plot_right() - self.plot_left())
    }

    pub fn y(&self, v: f64) -> f64 {
        self.plot_top() + (self.y_max - v) / (self.y_max - self.y_min) * (self.plot_bottom() - self.plot_top())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Stroke attributes for lines
#[derive(Debug, Clone, Copy)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dashed: bool,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self { color, width, dashed: false }
    }

    pub fn dashed(color: &'a str, width: f64) -> Self {
        Self { color, width, dashed: true }
    }

    fn attrs(&self) -> String {
        let dash = if self.dashed { " stroke-dasharray=\"4 3\"" } else { "" };
        format!(
            "stroke=\"{}\" stroke-width=\"{:.1}\"{}",
            escape(self.color),
            self.width,
            dash
        )
    }
}

/// An SVG document under construction
pub struct Canvas {
    frame: Frame,
    title: String,
    body: String,
}

impl Canvas {
    pub fn new(frame: Frame, title: &str) -> Self {
        let mut canvas = Self {
            frame,
            title: title.to_string(),
            body: String::new(),
        };
        canvas.text(frame.width / 2.0, 18.0, title, Anchor::Middle, FONT_SIZE + 1.0);
        canvas
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Filled rectangle between two corners, in pixels. Light fills get a
    /// dark outline.
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, fill: &str) {
        let (x, w) = (x1.min(x2), (x2 - x1).abs());
        let (y, h) = (y1.min(y2), (y2 - y1).abs());
        let outline = if is_light_color(fill) {
            " stroke=\"#000000\" stroke-width=\"0.8\""
        } else {
            ""
        };
        self.body.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"{}/>\n",
            x,
            y,
            w,
            h,
            escape(fill),
            outline
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
        self.body.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" {}/>\n",
            x1,
            y1,
            x2,
            y2,
            stroke.attrs()
        ));
    }

    /// Polyline through data points. Light colours are drawn over a dark
    /// halo so they stay visible on white.
    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: Stroke<'_>) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|&(x, y)| format!("{:.1},{:.1}", self.frame.x(x), self.frame.y(y)))
            .collect();
        let coords = coords.join(" ");
        if is_light_color(stroke.color) {
            let halo = Stroke {
                color: "#000000",
                width: stroke.width + 1.6,
                dashed: stroke.dashed,
            };
            self.body.push_str(&format!(
                "<polyline fill=\"none\" points=\"{}\" {}/>\n",
                coords,
                halo.attrs()
            ));
        }
        self.body.push_str(&format!(
            "<polyline fill=\"none\" points=\"{}\" {}/>\n",
            coords,
            stroke.attrs()
        ));
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str, anchor: Anchor, size: f64) {
        self.body.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" font-size=\"{:.1}\">{}</text>\n",
            x,
            y,
            anchor.as_str(),
            size,
            escape(text)
        ));
    }

    /// Horizontal line at data value `y` across the plot
    pub fn hline(&mut self, y: f64, stroke: Stroke<'_>) {
        let py = self.frame.y(y);
        let (l, r) = (self.frame.plot_left(), self.frame.plot_right());
        self.line(l, py, r, py, stroke);
    }

    /// Vertical line at data value `x` across the plot
    pub fn vline(&mut self, x: f64, stroke: Stroke<'_>) {
        let px = self.frame.x(x);
        let (t, b) = (self.frame.plot_top(), self.frame.plot_bottom());
        self.line(px, t, px, b, stroke);
    }

    pub fn x_axis(&mut self, ticks: &[f64], label: &str) {
        let bottom = self.frame.plot_bottom();
        let (l, r) = (self.frame.plot_left(), self.frame.plot_right());
        self.line(l, bottom, r, bottom, Stroke::solid(AXIS_COLOR, 1.0));
        for &t in ticks {
            let px = self.frame.x(t);
            self.line(px, bottom, px, bottom + 4.0, Stroke::solid(AXIS_COLOR, 1.0));
            self.text(px, bottom + 14.0, &format_number(t), Anchor::Middle, TICK_FONT_SIZE);
        }
        let center = (l + r) / 2.0;
        self.text(center, self.frame.height - 4.0, label, Anchor::Middle, FONT_SIZE);
    }

    pub fn y_axis(&mut self, ticks: &[f64], label: &str) {
        let left = self.frame.plot_left();
        let (t, b) = (self.frame.plot_top(), self.frame.plot_bottom());
        self.line(left, t, left, b, Stroke::solid(AXIS_COLOR, 1.0));
        for &tick in ticks {
            let py = self.frame.y(tick);
            self.line(left, py, self.frame.plot_right(), py, Stroke::solid(GRID_COLOR, 0.6));
            self.text(left - 6.0, py + 3.0, &format_number(tick), Anchor::End, TICK_FONT_SIZE);
        }
        if !label.is_empty() {
            let (x, y) = (12.0, (t + b) / 2.0);
            self.body.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"{FONT_SIZE:.1}\" \
                 transform=\"rotate(-90 {x:.1} {y:.1})\">{}</text>\n",
                escape(label)
            ));
        }
    }

    /// Colour swatches with labels along the top right of the plot
    pub fn legend(&mut self, entries: &[(&str, &str)]) {
        let mut x = self.frame.plot_right();
        let y = self.frame.plot_top() + 4.0;
        for (label, color) in entries.iter().rev() {
            let text_width = label.chars().count() as f64 * TICK_FONT_SIZE * 0.6;
            x -= text_width;
            self.text(x, y + 8.0, label, Anchor::Start, TICK_FONT_SIZE);
            x -= 14.0;
            self.rect(x, y, x + 10.0, y + 10.0, color);
            x -= 10.0;
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w:.0} {h:.0}\" \
             width=\"{w:.0}\" height=\"{h:.0}\" role=\"img\" aria-label=\"{title}\">\n\
             <title>{title}</title>\n{body}</svg>",
            w = self.frame.width,
            h = self.frame.height,
            title = escape(&self.title),
            body = self.body,
        )
    }
}
