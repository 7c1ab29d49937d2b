use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use crate::engine::Color;
use crate::error::AssetError;

use super::pipeline::QuadVertex;

// ── Vec2 ─────────────────────────────────────────────────────────────────────

/// Screen-space 2D position `[x, y]` in pixels.
pub type Vec2 = [f32; 2];

// ── generate_text_mesh ────────────────────────────────────────────────────────

/// Convert `text` into a flat vertex + index buffer in screen pixels.
///
/// # Layout
/// Each renderable character produces **4 vertices** and **6 indices**
/// (two counter-clockwise triangles, Y-axis pointing down):
///
/// ```text
/// 0──1
/// │ /│
/// 2──3
/// triangles: (0,1,2) and (1,3,2)
/// ```
///
/// Glyphs are drawn at their native atlas size. The quad for a glyph sits at
/// `(cursor + x_offset, start.y + y_offset)` and the cursor then moves right
/// by `x_advance`.
///
/// # Skipping rules
/// - `'\n'` resets the cursor to `start[0]` and moves down one line height,
///   unless the font has a glyph for it, which is then drawn like any other.
/// - A character absent from the font advances the cursor by the space
///   glyph's advance, or not at all if the font has no space.
/// - Returns empty buffers when the font is not [drawable](Font::is_drawable).
pub fn generate_text_mesh(
    text: &str,
    font: &Font,
    start: Vec2,
    color: Color,
) -> (Vec<QuadVertex>, Vec<u32>) {
    if !font.is_drawable() {
        return (Vec::new(), Vec::new());
    }

    let tw = font.metrics.texture_width;
    let th = font.metrics.texture_height;
    let space_advance = font.glyphs.get(&(' ' as u32)).map_or(0.0, |g| g.x_advance);

    let mut vertices: Vec<QuadVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let mut cursor_x = start[0];
    let mut cursor_y = start[1];

    for ch in text.chars() {
        if ch == '\n' && font.glyph(ch).is_none() {
            cursor_x = start[0];
            cursor_y += font.metrics.line_height;
            continue;
        }

        let Some(glyph) = font.glyph(ch) else {
            cursor_x += space_advance;
            continue;
        };

        let x0 = cursor_x + glyph.x_offset;
        let y0 = cursor_y + glyph.y_offset;
        let x1 = x0 + glyph.width;
        let y1 = y0 + glyph.height;

        let u0 = glyph.x / tw;
        let v0 = glyph.y / th;
        let u1 = (glyph.x + glyph.width) / tw;
        let v1 = (glyph.y + glyph.height) / th;

        let base = vertices.len() as u32;
        let c = color.0;

        // Four corners in reading order: top-left, top-right, bottom-left, bottom-right.
        vertices.push(QuadVertex { position: [x0, y0, 0.0], uv: [u0, v0], color: c });
        vertices.push(QuadVertex { position: [x1, y0, 0.0], uv: [u1, v0], color: c });
        vertices.push(QuadVertex { position: [x0, y1, 0.0], uv: [u0, v1], color: c });
        vertices.push(QuadVertex { position: [x1, y1, 0.0], uv: [u1, v1], color: c });

        indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);

        cursor_x += glyph.x_advance;
    }

    (vertices, indices)
}

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas, in atlas pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    /// Character code. Never zero.
    pub id: u32,
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: f32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal offset applied when rendering (may be negative).
    pub x_offset: f32,
    /// Vertical offset applied when rendering (may be negative).
    pub y_offset: f32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: f32,
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// Values from the `common` record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub base: f32,
    /// Vertical distance between successive baselines in pixels.
    pub line_height: f32,
    /// Width of the backing texture atlas in pixels (`scaleW`).
    pub texture_width: f32,
    /// Height of the backing texture atlas in pixels (`scaleH`).
    pub texture_height: f32,
}

/// Font metadata loaded but unusable for drawing. Text draws become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FontWarning {
    #[error("font atlas width or height is zero")]
    MissingAtlasSize,
    #[error("font defines no glyphs")]
    NoGlyphs,
}

/// A bitmap font parsed from a BMFont text description (`.fnt`).
///
/// ```text
/// common lineHeight=32 base=26 scaleW=256 scaleH=256 pages=1
/// char id=65 x=10 y=20 width=14 height=18 xoffset=1 yoffset=6 xadvance=15
/// ```
#[derive(Debug, Clone, Default)]
pub struct Font {
    /// All glyphs in this font, keyed by character code.
    pub glyphs: HashMap<u32, Glyph>,
    pub metrics: FontMetrics,
}

impl Font {
    /// Read and parse a `.fnt` file.
    ///
    /// Only a file that cannot be opened is an error. Incomplete metadata is
    /// reported through [`Font::warnings`].
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let source = std::fs::read_to_string(path).map_err(|source| AssetError::FontNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source))
    }

    /// Parse a `.fnt` description line by line.
    ///
    /// The first token of a line selects the record kind; `common` and `char`
    /// are understood and every other kind is ignored. The remaining tokens are
    /// `key=value` pairs in any order. A value that does not parse as a number
    /// leaves that field at its default and parsing carries on. `char` records
    /// without a non-zero `id` are discarded.
    pub fn parse(source: &str) -> Self {
        let mut font = Self::default();

        for (line_no, line) in source.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("common") => {
                    for (key, raw) in fields(tokens) {
                        let slot = match key {
                            "base" => &mut font.metrics.base,
                            "lineHeight" => &mut font.metrics.line_height,
                            "scaleW" => &mut font.metrics.texture_width,
                            "scaleH" => &mut font.metrics.texture_height,
                            _ => continue,
                        };
                        if let Some(value) = number(key, raw, line_no) {
                            *slot = value;
                        }
                    }
                }
                Some("char") => {
                    let mut glyph = Glyph::default();
                    for (key, raw) in fields(tokens) {
                        let slot = match key {
                            "id" => {
                                if let Some(id) = number(key, raw, line_no) {
                                    glyph.id = id;
                                }
                                continue;
                            }
                            "x" => &mut glyph.x,
                            "y" => &mut glyph.y,
                            "width" => &mut glyph.width,
                            "height" => &mut glyph.height,
                            "xoffset" => &mut glyph.x_offset,
                            "yoffset" => &mut glyph.y_offset,
                            "xadvance" => &mut glyph.x_advance,
                            _ => continue,
                        };
                        if let Some(value) = number(key, raw, line_no) {
                            *slot = value;
                        }
                    }
                    if glyph.id != 0 {
                        font.glyphs.insert(glyph.id, glyph);
                    }
                }
                _ => {}
            }
        }

        font
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&(ch as u32))
    }

    /// Reasons this font cannot draw. Empty when it can.
    pub fn warnings(&self) -> Vec<FontWarning> {
        let mut out = Vec::new();
        if self.metrics.texture_width <= 0.0 || self.metrics.texture_height <= 0.0 {
            out.push(FontWarning::MissingAtlasSize);
        }
        if self.glyphs.is_empty() {
            out.push(FontWarning::NoGlyphs);
        }
        out
    }

    pub fn is_drawable(&self) -> bool {
        self.warnings().is_empty()
    }
}

/// Split `key=value` tokens. Tokens without `=` are skipped.
fn fields<'a>(tokens: impl Iterator<Item = &'a str>) -> impl Iterator<Item = (&'a str, &'a str)> {
    tokens.filter_map(|token| token.split_once('='))
}

/// Parse one field value. Failures are logged and yield `None`, so the caller
/// keeps its default for that key.
fn number<T: FromStr>(key: &str, raw: &str, line_no: usize) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            // Quoted strings such as `face="Arial"` are expected to fail.
            if raw.starts_with('"') {
                debug!("font line {}: ignoring text field {key}", line_no + 1);
            } else {
                warn!("font line {}: {key}={raw} is not a number, skipped", line_no + 1);
            }
            None
        }
    }
}
