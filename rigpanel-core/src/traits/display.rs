//! Text display trait

use core::fmt::Debug;

/// Line-oriented character display
///
/// Implementations are expected to skip writes of unchanged lines unless
/// `force` is set.
pub trait TextDisplay {
    /// Error type for display operations
    type Error: Debug;

    /// Number of character rows
    fn rows(&self) -> u8;

    /// Number of character cells per row
    fn columns(&self) -> u8;

    /// Clear the display and forget any cached line content
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Show `text` on `row`, left-justified and padded to the row width
    ///
    /// - `row`: Row number (0-based)
    /// - `text`: Text to display, truncated to the row width
    /// - `force`: Write even if the row already shows this text
    fn put_line(&mut self, row: u8, text: &str, force: bool) -> Result<(), Self::Error>;
}
