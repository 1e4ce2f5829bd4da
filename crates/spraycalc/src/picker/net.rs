use super::VisualPicker;
use crate::colour::{to_hex, DEFAULT_PAINT_COLOUR};
use crate::face::{Face, FaceSet};
use crate::form::Dimensions;
use anyhow::{Context, Result};
use kurbo::{Point, Rect};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Side length of the square SVG view box.
pub const VIEW_SIZE: f64 = 400.0;
const MARGIN: f64 = 10.0;
const BARE_FILL: &str = "#D9C3A0";
const STROKE: &str = "#333333";

/// Flat 2D proxy: the panel unfolded into a net.
///
/// ```text
///          [ top  ]
/// [l][   front   ][r][   back   ]
///          [bottom]
/// ```
#[derive(Debug, Clone)]
pub struct NetPicker {
    rects: Vec<(Face, Rect)>,
    faces: FaceSet,
    paint_colour: u32,
}

impl Default for NetPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl NetPicker {
    pub fn new() -> Self {
        let mut picker = Self {
            rects: Vec::new(),
            faces: FaceSet::new(),
            paint_colour: DEFAULT_PAINT_COLOUR,
        };
        picker.update(&Dimensions::default(), &FaceSet::new());
        picker
    }

    /// Rectangle of `face` in view-box coordinates.
    pub fn rect(&self, face: Face) -> Option<Rect> {
        self.rects
            .iter()
            .find(|(candidate, _)| *candidate == face)
            .map(|(_, rect)| *rect)
    }

    /// Render the net as an SVG document, painted faces filled with the paint colour.
    pub fn to_svg(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        let view_box = format!("0 0 {VIEW_SIZE} {VIEW_SIZE}");
        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("viewBox", view_box.as_str()));
        writer
            .write_event(Event::Start(svg))
            .context("write svg root")?;

        let painted_fill = to_hex(self.paint_colour);
        for (face, rect) in &self.rects {
            let selected = self.faces.is_selected(*face);
            let fill = if selected {
                painted_fill.as_str()
            } else {
                BARE_FILL
            };
            let (x, y) = (format!("{:.2}", rect.x0), format!("{:.2}", rect.y0));
            let (w, h) = (
                format!("{:.2}", rect.width()),
                format!("{:.2}", rect.height()),
            );

            let mut el = BytesStart::new("rect");
            el.push_attribute(("data-face", face.token()));
            el.push_attribute(("x", x.as_str()));
            el.push_attribute(("y", y.as_str()));
            el.push_attribute(("width", w.as_str()));
            el.push_attribute(("height", h.as_str()));
            el.push_attribute(("fill", fill));
            el.push_attribute(("stroke", STROKE));
            el.push_attribute(("stroke-width", if selected { "2" } else { "1" }));
            writer
                .write_event(Event::Empty(el))
                .with_context(|| format!("write {face} rect"))?;
        }

        for (face, rect) in &self.rects {
            let centre = rect.center();
            let (cx, cy) = (format!("{:.2}", centre.x), format!("{:.2}", centre.y));
            let mut label = BytesStart::new("text");
            label.push_attribute(("x", cx.as_str()));
            label.push_attribute(("y", cy.as_str()));
            label.push_attribute(("text-anchor", "middle"));
            label.push_attribute(("dominant-baseline", "middle"));
            label.push_attribute(("font-size", "10"));
            label.push_attribute(("pointer-events", "none"));
            writer
                .write_event(Event::Start(label))
                .context("write label")?;
            let initial = face.initial().to_string();
            writer
                .write_event(Event::Text(BytesText::new(&initial)))
                .context("write label text")?;
            writer
                .write_event(Event::End(BytesEnd::new("text")))
                .context("close label")?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .context("close svg root")?;
        String::from_utf8(writer.into_inner()).context("svg is not utf-8")
    }
}

/// Lay the six faces out as a net scaled to fit the view box.
fn layout(dims: &Dimensions) -> Vec<(Face, Rect)> {
    let Dimensions {
        width: w,
        height: h,
        thickness: t,
    } = dims.or_display_defaults();

    let total_w = 2.0 * w + 2.0 * t;
    let total_h = h + 2.0 * t;
    let usable = VIEW_SIZE - 2.0 * MARGIN;
    let scale = (usable / total_w).min(usable / total_h);
    let offset_x = (VIEW_SIZE - total_w * scale) / 2.0;
    let offset_y = (VIEW_SIZE - total_h * scale) / 2.0;

    let place = |x: f64, y: f64, width: f64, height: f64| {
        Rect::new(
            offset_x + x * scale,
            offset_y + y * scale,
            offset_x + (x + width) * scale,
            offset_y + (y + height) * scale,
        )
    };

    vec![
        (Face::Front, place(t, t, w, h)),
        (Face::Back, place(2.0 * t + w, t, w, h)),
        (Face::Top, place(t, 0.0, w, t)),
        (Face::Bottom, place(t, t + h, w, t)),
        (Face::Left, place(0.0, t, t, h)),
        (Face::Right, place(t + w, t, t, h)),
    ]
}

impl VisualPicker for NetPicker {
    type Event = Point;

    fn update(&mut self, dims: &Dimensions, faces: &FaceSet) {
        self.rects = layout(dims);
        self.faces = *faces;
    }

    fn resolve(&self, point: &Point) -> Option<Face> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(*point))
            .map(|(face, _)| *face)
    }

    fn set_paint_colour(&mut self, colour: u32) {
        self.paint_colour = colour;
    }
}
