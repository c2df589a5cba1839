/// One frame of glyph text with its display delay.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TextFrame {
    /// Display time in units of 10 ms.
    pub delay: u32,
    /// Glyph rows, each including its line terminator.
    pub text: String,
}

impl TextFrame {
    /// Create a frame from a delay and terminated rows.
    pub fn new(delay: u32, text: impl Into<String>) -> Self {
        Self {
            delay,
            text: text.into(),
        }
    }

    /// Rows without their line terminators.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Display time in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        u64::from(self.delay) * 10
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/frame.rs"]
mod tests;
