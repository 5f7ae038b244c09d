//! ACM1602NI character LCD driver
//!
//! Driver for 16x2 ACM1602NI-compatible LCD modules on I2C.
//!
//! # I2C Protocol
//!
//! Every byte sent to the controller is preceded by a control byte:
//! - `0x00`: the next byte is an instruction
//! - `0x80`: the next byte is data for DDRAM/CGRAM
//!
//! Instructions need 53 µs to settle, clear needs 2.16 ms. The controller
//! is never read, so the driver only needs the write half of the bus.
//!
//! # Line Cache
//!
//! The driver remembers the last frame written to each row and skips the
//! bus entirely when asked to write the same frame again. The cache is
//! only updated after a successful write and is invalidated by `clear()`.

use embedded_hal::delay::DelayNs;
use rigpanel_core::traits::TextDisplay;
use rigpanel_hal::{DeviceAddress, I2cBus};

use super::charset;
use crate::error::{Error, ValidationError};

/// ACM1602NI I2C address
pub const ACM1602_ADDR: DeviceAddress = DeviceAddress::from_u7(0x50);

/// Display dimensions
pub const ROWS: usize = 2;
pub const COLUMNS: usize = 16;

/// Custom glyph geometry
pub const GLYPH_SLOTS: u8 = 8;
pub const GLYPH_ROWS: usize = 8;
pub const GLYPH_COLUMNS: usize = 5;
pub const GLYPH_BITS: usize = GLYPH_ROWS * GLYPH_COLUMNS;

/// One row of device bytes, exactly as written to DDRAM
pub type Frame = [u8; COLUMNS];

/// ACM1602 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Display on, cursor off, blink off
    pub const DISPLAY_CONTROL: u8 = 0x0C;
    /// 8-bit bus, 2 lines, extended font
    pub const FUNCTION_SET: u8 = 0x3C;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM offset between rows
    pub const ROW_STRIDE: u8 = 0x40;
}

/// Control byte preceding an instruction
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte preceding each data byte
const CONTROL_DATA: u8 = 0x80;

/// Settle time after an instruction or data write
const SETTLE_US: u32 = 53;

/// Settle time after clear (2.16 ms)
const CLEAR_SETTLE_US: u32 = 2160;

/// Pad or truncate translated text to one display row
///
/// Text is left-justified; missing cells are spaces.
pub fn frame(text: &str) -> Frame {
    let mut frame = [b' '; COLUMNS];
    for (cell, byte) in frame.iter_mut().zip(charset::translate(text)) {
        *cell = byte;
    }
    frame
}

/// Pack a row-major 8x5 bitmap into CGRAM bytes, leftmost column in bit 4
fn pack_glyph(bitmap: &[bool]) -> [u8; GLYPH_ROWS] {
    let mut rows = [0u8; GLYPH_ROWS];
    for (row, bits) in rows.iter_mut().zip(bitmap.chunks(GLYPH_COLUMNS)) {
        *row = bits.iter().fold(0, |acc, &on| (acc << 1) | on as u8);
    }
    rows
}

/// ACM1602 LCD driver
///
/// A value of this type only exists after the controller has been
/// initialized, so every method can assume the display is ready.
pub struct Acm1602<B, D> {
    bus: B,
    delay: D,
    address: DeviceAddress,
    /// Last frame successfully written to each row
    lines: [Option<Frame>; ROWS],
}

impl<B, D> Acm1602<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Initialize the display at the default address
    pub fn new(bus: B, delay: D) -> Result<Self, Error<B::Error>> {
        Self::with_address(bus, delay, ACM1602_ADDR)
    }

    /// Initialize the display at `address`
    ///
    /// Runs function set, display control and clear before returning.
    pub fn with_address(bus: B, delay: D, address: DeviceAddress) -> Result<Self, Error<B::Error>> {
        let mut lcd = Self {
            bus,
            delay,
            address,
            lines: [None; ROWS],
        };
        lcd.init()?;
        log::info!("ACM1602 ready at {}", address);
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), Error<B::Error>> {
        self.command(cmd::FUNCTION_SET)?;
        self.delay.delay_us(SETTLE_US);
        self.command(cmd::DISPLAY_CONTROL)?;
        self.delay.delay_us(SETTLE_US);
        self.clear()
    }

    /// Send an instruction
    fn command(&mut self, instruction: u8) -> Result<(), Error<B::Error>> {
        self.bus
            .write(self.address, &[CONTROL_COMMAND, instruction])
            .map_err(Error::Io)
    }

    /// Send data bytes in one transaction, each with the data control byte
    fn data(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        let mut buf = [0u8; COLUMNS * 2];
        let len = bytes.len().min(COLUMNS) * 2;
        for (pair, &byte) in buf.chunks_exact_mut(2).zip(bytes) {
            pair[0] = CONTROL_DATA;
            pair[1] = byte;
        }
        self.bus.write(self.address, &buf[..len]).map_err(Error::Io)
    }

    /// Clear the display and forget every cached row
    pub fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.lines = [None; ROWS];
        self.command(cmd::CLEAR)?;
        self.delay.delay_us(CLEAR_SETTLE_US);
        Ok(())
    }

    /// Show `text` on `row`
    ///
    /// The text is translated, left-justified and padded or truncated to
    /// 16 cells. Unless `force` is set, nothing is sent if the row already
    /// shows exactly this frame.
    pub fn put_line(&mut self, row: u8, text: &str, force: bool) -> Result<(), Error<B::Error>> {
        let index = row as usize;
        if index >= ROWS {
            return Err(ValidationError::Row(row).into());
        }

        let frame = frame(text);
        if !force && self.lines[index] == Some(frame) {
            log::trace!("row {} unchanged", row);
            return Ok(());
        }

        self.command(cmd::SET_DDRAM_ADDR + cmd::ROW_STRIDE * row)?;
        self.delay.delay_us(SETTLE_US);
        self.data(&frame)?;
        self.delay.delay_us(SETTLE_US);

        self.lines[index] = Some(frame);
        log::debug!("row {} written", row);
        Ok(())
    }

    /// Program custom glyph `slot` (0-7) from a row-major 8x5 bitmap
    ///
    /// The glyph shows wherever device code `slot` is written. Rows already
    /// on screen are not refreshed; rewrite them with `force` if needed.
    pub fn define_character(&mut self, slot: u8, bitmap: &[bool]) -> Result<(), Error<B::Error>> {
        if slot >= GLYPH_SLOTS {
            return Err(ValidationError::GlyphSlot(slot).into());
        }
        if bitmap.len() != GLYPH_BITS {
            return Err(ValidationError::GlyphLength(bitmap.len()).into());
        }

        let rows = pack_glyph(bitmap);

        self.command(cmd::SET_CGRAM_ADDR + GLYPH_ROWS as u8 * slot)?;
        self.delay.delay_us(SETTLE_US);
        self.data(&rows)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    /// Frame last written to `row`, if any
    pub fn cached_line(&self, row: u8) -> Option<&Frame> {
        self.lines.get(row as usize).and_then(Option::as_ref)
    }

    /// Device address
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Destroy the driver and return the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> TextDisplay for Acm1602<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    type Error = Error<B::Error>;

    fn rows(&self) -> u8 {
        ROWS as u8
    }

    fn columns(&self) -> u8 {
        COLUMNS as u8
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Acm1602::clear(self)
    }

    fn put_line(&mut self, row: u8, text: &str, force: bool) -> Result<(), Self::Error> {
        Acm1602::put_line(self, row, text, force)
    }
}
