use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f32::consts::PI;
use std::ops::{Add, Div, Mul, Sub};
use tiny_skia::{Pixmap, Transform};

use crate::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the origin.
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn component(self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => bail!("vector component index {index} out of range"),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        self + rhs * -1.0
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(rhs * self.x, rhs * self.y)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    // The divisor must be nonzero; callers guard.
    fn div(self, rhs: f32) -> Vec2 {
        self * (1.0 / rhs)
    }
}

/// A double-occurrence word: every distinct symbol appears exactly twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordWord {
    symbols: Vec<String>,
    n: usize,
}

impl ChordWord {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if tokens.len() < 2 {
            bail!(
                "a chord word needs at least two symbols, got {}",
                tokens.len()
            );
        }

        let mut appearances: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *appearances.entry(token.as_ref()).or_insert(0) += 1;
        }

        if let Some(symbol) = tokens
            .iter()
            .map(|token| token.as_ref())
            .find(|symbol| appearances[symbol] != 2)
        {
            bail!(
                "'{symbol}' appears {} time(s); every symbol of a chord word must appear exactly twice",
                appearances[symbol]
            );
        }

        let symbols: Vec<String> = tokens
            .iter()
            .map(|token| token.as_ref().to_string())
            .collect();
        let n = symbols.len() / 2;

        Ok(Self { symbols, n })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of chords, half the word length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Pair up the two occurrences of each symbol, in first-occurrence order.
    pub fn pairing(&self) -> Vec<Chord> {
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let mut chords: Vec<Chord> = Vec::new();

        for (position, symbol) in self.symbols.iter().enumerate() {
            match slot_of.entry(symbol.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(chords.len());
                    chords.push(Chord {
                        symbol: symbol.clone(),
                        ends: [position, position],
                    });
                }
                Entry::Occupied(slot) => chords[*slot.get()].ends[1] = position,
            }
        }

        chords
    }
}

/// One chord: a symbol and the two word positions where it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub symbol: String,
    pub ends: [usize; 2],
}

/// Cubic Bezier for one chord, from `start` through the two interior control
/// points to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordCurve {
    pub start: Vec2,
    pub start_ctrl: Vec2,
    pub end_ctrl: Vec2,
    pub end: Vec2,
}

/// Position on the skeleton circle for word index `index`, with the word of
/// half-length `n` spread over the full turn at angular step pi/n.
pub fn circle_position(index: usize, n: usize, radius: f32) -> Vec2 {
    let angle = PI * index as f32 / n as f32;
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Bowing weight for a chord between angles `s` and `t`: maximal (= rigidity)
/// when the span is a multiple of pi, zero at odd multiples of pi/2.
pub fn curvature_weight(s: f32, t: f32, rigidity: f32) -> f32 {
    rigidity * (1.0 + (2.0 * (t - s)).cos()) / 2.0
}

fn weighted_midpoint(a: Vec2, b: Vec2, weight: f32) -> Vec2 {
    a * weight + b * (1.0 - weight)
}

/// Control geometry for the chord joining word indices `s_idx` and `t_idx`.
pub fn place_chord(s_idx: usize, t_idx: usize, n: usize, options: &RenderOptions) -> ChordCurve {
    let s = PI * s_idx as f32 / n as f32;
    let t = PI * t_idx as f32 / n as f32;

    let p = Vec2::new(options.radius * s.cos(), options.radius * s.sin());
    let q = Vec2::new(options.radius * t.cos(), options.radius * t.sin());
    let o = Vec2::ZERO;

    // Not clamped to [0, 1]: for rigidity > 1 the midpoints land past the
    // endpoints, which is what bows near-diameter chords outward.
    let weight = curvature_weight(s, t, options.rigidity);

    let p_mid = weighted_midpoint(o, p, weight);
    let q_mid = weighted_midpoint(o, q, weight);

    let span = (p - q).magnitude();
    let (p_q_ctrl, q_p_ctrl) = if span > 0.0 {
        (
            p + (q - p) * ((p - p_mid).magnitude() / span),
            q + (p - q) * ((q - q_mid).magnitude() / span),
        )
    } else {
        // Coincident endpoints cannot come out of a validated word; keep the
        // arithmetic finite anyway.
        (p, q)
    };

    ChordCurve {
        start: p,
        start_ctrl: (p_mid + p_q_ctrl) / 2.0,
        end_ctrl: (q_mid + q_p_ctrl) / 2.0,
        end: q,
    }
}

/// A validated chord word together with its derived pairing.
#[derive(Debug, Clone)]
pub struct ChordDiagram {
    word: ChordWord,
    chords: Vec<Chord>,
}

impl ChordDiagram {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let word = ChordWord::parse(tokens)?;
        let chords = word.pairing();
        Ok(Self { word, chords })
    }

    pub fn word(&self) -> &ChordWord {
        &self.word
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// One curve per chord, in pairing order.
    pub fn layout(&self, options: &RenderOptions) -> Vec<ChordCurve> {
        self.chords
            .iter()
            .map(|chord| place_chord(chord.ends[0], chord.ends[1], self.word.n(), options))
            .collect()
    }

    /// Draw the skeleton circle, then every chord curve with its two endpoint
    /// markers, onto the given canvas.
    pub fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions) -> Result<()> {
        canvas.stroke_circle(Vec2::ZERO, options.radius, options.skeleton_width)?;

        for curve in self.layout(options) {
            canvas.stroke_curve(&curve, options.chord_width)?;
            canvas.fill_disk(curve.start, options.node_radius)?;
            canvas.fill_disk(curve.end, options.node_radius)?;
        }

        Ok(())
    }

    pub fn render_svg(&self, options: &RenderOptions, background: &str) -> Result<String> {
        let mut canvas = SvgCanvas::new(options, background)?;
        self.draw(&mut canvas, options)?;
        Ok(canvas.finish())
    }

    pub fn render_png(
        &self,
        options: &RenderOptions,
        background: &str,
        scale: f32,
    ) -> Result<Vec<u8>> {
        if scale <= 0.0 {
            bail!("scale must be greater than zero when rendering PNG output");
        }

        let svg = self.render_svg(options, background)?;

        let usvg_options = resvg::usvg::Options::default();
        let tree = resvg::usvg::Tree::from_str(&svg, &usvg_options)
            .map_err(|err| anyhow!("failed to parse generated SVG for PNG export: {err}"))?;

        let size = tree.size().to_int_size();
        let scaled_width = ((size.width() as f32) * scale).ceil();
        let scaled_height = ((size.height() as f32) * scale).ceil();

        if !scaled_width.is_finite() || !scaled_height.is_finite() {
            bail!("scaled dimensions are not finite; try a smaller scale factor");
        }

        if scaled_width < 1.0 || scaled_height < 1.0 {
            bail!("scaled dimensions collapsed below 1px; try a larger scale factor");
        }

        if scaled_width > u32::MAX as f32 || scaled_height > u32::MAX as f32 {
            bail!("scaled dimensions exceed supported limits; try a smaller scale factor");
        }

        let scaled_width = scaled_width as u32;
        let scaled_height = scaled_height as u32;

        let mut pixmap = Pixmap::new(scaled_width, scaled_height).ok_or_else(|| {
            anyhow!("failed to allocate {scaled_width}x{scaled_height} surface for PNG export")
        })?;

        let transform = Transform::from_scale(scale, scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let png_data = pixmap
            .encode_png()
            .map_err(|err| anyhow!("failed to encode PNG output: {err}"))?;

        Ok(png_data)
    }
}
