use crate::foundation::error::{GlyphError, GlyphResult};

/// Non-empty ordered sequence of glyph strings.
///
/// Index 0 is selected for the darkest pixels and the last index for the brightest; whether
/// that reads dark-on-light or light-on-dark depends on the glyphs the caller supplies.
///
/// Glyphs may be multi-character strings but must be non-empty and must not contain line
/// terminators, so every encoded row stays a single non-blank line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PaletteRepr", into = "Vec<String>")]
pub struct Palette {
    glyphs: Vec<String>,
}

/// Accepted JSON shapes: `"@%#*"` (one glyph per character) or `["@", "%", ...]`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    Chars(String),
    Glyphs(Vec<String>),
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = GlyphError;

    fn try_from(repr: PaletteRepr) -> GlyphResult<Self> {
        match repr {
            PaletteRepr::Chars(s) => Palette::from_chars(&s),
            PaletteRepr::Glyphs(v) => Palette::new(v),
        }
    }
}

impl From<Palette> for Vec<String> {
    fn from(p: Palette) -> Self {
        p.glyphs
    }
}

impl Palette {
    /// Create a validated palette from glyph strings.
    pub fn new<I, S>(glyphs: I) -> GlyphResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<String> = glyphs.into_iter().map(Into::into).collect();
        if glyphs.is_empty() {
            return Err(GlyphError::config("palette must contain at least one glyph"));
        }
        for (i, g) in glyphs.iter().enumerate() {
            if g.is_empty() {
                return Err(GlyphError::config(format!("palette glyph {i} is empty")));
            }
            if g.contains(['\r', '\n']) {
                return Err(GlyphError::config(format!(
                    "palette glyph {i} contains a line terminator"
                )));
            }
        }
        Ok(Self { glyphs })
    }

    /// Split a string into one glyph per character.
    pub fn from_chars(s: &str) -> GlyphResult<Self> {
        Self::new(s.chars().map(String::from))
    }

    /// Block shading, "█▓▒░. ". The default.
    pub fn blocks() -> Self {
        Self::preset("█▓▒░. ")
    }

    /// Block shading for light-on-dark terminals, " .░▒▓█".
    pub fn blocks_reverse() -> Self {
        Self::preset(" .░▒▓█")
    }

    /// ASCII ramp, "@%#*+=-:. ".
    pub fn ascii() -> Self {
        Self::preset("@%#*+=-:. ")
    }

    /// ASCII ramp for light-on-dark terminals, " .:-=+*#%@".
    pub fn ascii_reverse() -> Self {
        Self::preset(" .:-=+*#%@")
    }

    fn preset(s: &str) -> Self {
        Self {
            glyphs: s.chars().map(String::from).collect(),
        }
    }

    /// Number of glyphs, always at least 1.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `idx`, clamped to the last glyph.
    pub fn glyph(&self, idx: usize) -> &str {
        &self.glyphs[idx.min(self.glyphs.len() - 1)]
    }

    /// Borrow all glyphs in order.
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Same glyphs in the opposite order.
    pub fn reversed(&self) -> Self {
        let mut glyphs = self.glyphs.clone();
        glyphs.reverse();
        Self { glyphs }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::blocks()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/palette.rs"]
mod tests;
