//! Output Emitter
//!
//! Sink for the whitespace produced by path reconstruction. Each gap between
//! two tokens is rendered through an [`Emitter`] so callers can stream it
//! wherever the final text goes.

/// Trait for emitting rendered whitespace.
pub trait Emitter {
    /// Emit a text fragment verbatim.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation as the given number of spaces.
    fn emit_indent(&mut self, spaces: u32);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Take the buffered text, leaving the emitter empty for the next gap.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Get the emitted output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, spaces: u32) {
        for _ in 0..spaces {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
