use anyhow::Result;
use std::fmt::Write;

use crate::{ChordCurve, RenderOptions, Vec2, escape_xml};

/// Drawing primitives the diagram core emits. Coordinates are normalized
/// `[-0.5, 0.5]²` with the origin at the centre and y pointing up; the
/// implementation owns the transform into its output space.
pub trait Canvas {
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32) -> Result<()>;
    fn stroke_curve(&mut self, curve: &ChordCurve, line_width: f32) -> Result<()>;
    fn fill_disk(&mut self, center: Vec2, radius: f32) -> Result<()>;
}

/// Canvas that accumulates an SVG document string.
pub struct SvgCanvas {
    svg: String,
    width: u32,
    height: u32,
}

impl SvgCanvas {
    /// Open a document of the configured pixel size. A `background` of
    /// "transparent" or "none" leaves the canvas unfilled; any other value is
    /// written as a full-size background rect.
    pub fn new(options: &RenderOptions, background: &str) -> Result<Self> {
        let mut svg = String::new();
        write!(
            svg,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            options.width, options.height, options.width, options.height,
        )?;

        if !background.eq_ignore_ascii_case("transparent") && !background.eq_ignore_ascii_case("none")
        {
            write!(
                svg,
                "  <rect width=\"100%\" height=\"100%\" fill=\"{}\" />\n",
                escape_xml(background)
            )?;
        }

        Ok(Self {
            svg,
            width: options.width,
            height: options.height,
        })
    }

    // Scale by (width, -height), then shift the origin to the canvas centre.
    fn to_pixel(&self, point: Vec2) -> (f32, f32) {
        (
            (point.x + 0.5) * self.width as f32,
            (0.5 - point.y) * self.height as f32,
        )
    }

    fn to_pixel_len(&self, length: f32) -> f32 {
        length * self.width as f32
    }

    pub fn finish(mut self) -> String {
        self.svg.push_str("</svg>\n");
        self.svg
    }
}

impl Canvas for SvgCanvas {
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32) -> Result<()> {
        let (cx, cy) = self.to_pixel(center);
        write!(
            self.svg,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"{:.2}\" />\n",
            cx,
            cy,
            self.to_pixel_len(radius),
            self.to_pixel_len(line_width),
        )?;
        Ok(())
    }

    fn stroke_curve(&mut self, curve: &ChordCurve, line_width: f32) -> Result<()> {
        let (x0, y0) = self.to_pixel(curve.start);
        let (x1, y1) = self.to_pixel(curve.start_ctrl);
        let (x2, y2) = self.to_pixel(curve.end_ctrl);
        let (x3, y3) = self.to_pixel(curve.end);
        write!(
            self.svg,
            "  <path d=\"M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"{:.2}\" />\n",
            x0,
            y0,
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
            self.to_pixel_len(line_width),
        )?;
        Ok(())
    }

    fn fill_disk(&mut self, center: Vec2, radius: f32) -> Result<()> {
        let (cx, cy) = self.to_pixel(center);
        write!(
            self.svg,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"black\" />\n",
            cx,
            cy,
            self.to_pixel_len(radius),
        )?;
        Ok(())
    }
}
