//! ACM1602NI character set
//!
//! The controller's ROM places half-width katakana and Japanese
//! punctuation at 0xA1-0xDF, in Unicode order. Everything below 0x80 is
//! ASCII.
//!
//! Characters outside the table are passed through as their raw UTF-8
//! bytes. For ASCII that is exactly right; for anything else it produces
//! one display cell per byte, so callers must not rely on such characters
//! rendering as anything meaningful.

/// Device code of the first table entry
pub const FIRST_CODE: u8 = 0xA1;

/// Device code of the last table entry
pub const LAST_CODE: u8 = 0xDF;

/// Symbols in device-code order starting at [`FIRST_CODE`]
///
/// Entry 4 (0xA5) is U+30FB KATAKANA MIDDLE DOT rather than the half-width
/// U+FF65, matching the table the panel has always shipped with.
pub const TABLE: [char; 63] = [
    '\u{FF61}', '\u{FF62}', '\u{FF63}', '\u{FF64}', '\u{30FB}', '\u{FF66}', '\u{FF67}', '\u{FF68}',
    '\u{FF69}', '\u{FF6A}', '\u{FF6B}', '\u{FF6C}', '\u{FF6D}', '\u{FF6E}', '\u{FF6F}', '\u{FF70}',
    '\u{FF71}', '\u{FF72}', '\u{FF73}', '\u{FF74}', '\u{FF75}', '\u{FF76}', '\u{FF77}', '\u{FF78}',
    '\u{FF79}', '\u{FF7A}', '\u{FF7B}', '\u{FF7C}', '\u{FF7D}', '\u{FF7E}', '\u{FF7F}', '\u{FF80}',
    '\u{FF81}', '\u{FF82}', '\u{FF83}', '\u{FF84}', '\u{FF85}', '\u{FF86}', '\u{FF87}', '\u{FF88}',
    '\u{FF89}', '\u{FF8A}', '\u{FF8B}', '\u{FF8C}', '\u{FF8D}', '\u{FF8E}', '\u{FF8F}', '\u{FF90}',
    '\u{FF91}', '\u{FF92}', '\u{FF93}', '\u{FF94}', '\u{FF95}', '\u{FF96}', '\u{FF97}', '\u{FF98}',
    '\u{FF99}', '\u{FF9A}', '\u{FF9B}', '\u{FF9C}', '\u{FF9D}', '\u{FF9E}', '\u{FF9F}',
];

/// Device code for a table symbol
pub fn device_code(c: char) -> Option<u8> {
    TABLE
        .iter()
        .position(|&symbol| symbol == c)
        .map(|index| FIRST_CODE + index as u8)
}

/// Table symbol for a device code in 0xA1-0xDF
pub fn device_char(code: u8) -> Option<char> {
    if (FIRST_CODE..=LAST_CODE).contains(&code) {
        Some(TABLE[(code - FIRST_CODE) as usize])
    } else {
        None
    }
}

/// Translate text into device bytes
///
/// Single pass over the characters: table symbols become their one-byte
/// code, everything else is emitted as its UTF-8 encoding.
pub fn translate(text: &str) -> Translate<'_> {
    Translate {
        chars: text.chars(),
        pending: [0; 4],
        pos: 0,
        len: 0,
    }
}

/// Iterator returned by [`translate`]
#[derive(Debug, Clone)]
pub struct Translate<'a> {
    chars: core::str::Chars<'a>,
    /// UTF-8 bytes of a pass-through character not yet emitted
    pending: [u8; 4],
    pos: u8,
    len: u8,
}

impl Iterator for Translate<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos < self.len {
            let byte = self.pending[self.pos as usize];
            self.pos += 1;
            return Some(byte);
        }

        let c = self.chars.next()?;
        if let Some(code) = device_code(c) {
            return Some(code);
        }

        self.len = c.encode_utf8(&mut self.pending).len() as u8;
        self.pos = 1;
        Some(self.pending[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::string::String;
    use std::vec::Vec;

    fn bytes(text: &str) -> Vec<u8> {
        translate(text).collect()
    }

    #[test]
    fn test_table_is_bijective() {
        let codes: BTreeSet<u8> = TABLE.iter().filter_map(|&c| device_code(c)).collect();
        assert_eq!(codes.len(), TABLE.len());
        assert_eq!(codes.iter().next(), Some(&FIRST_CODE));
        assert_eq!(codes.iter().last(), Some(&LAST_CODE));

        let symbols: BTreeSet<char> = TABLE.iter().copied().collect();
        assert_eq!(symbols.len(), TABLE.len());
    }

    #[test]
    fn test_each_symbol_is_one_byte() {
        for &symbol in TABLE.iter() {
            let mut buf = [0u8; 4];
            let out = bytes(symbol.encode_utf8(&mut buf));
            assert_eq!(out.len(), 1);
            assert!((FIRST_CODE..=LAST_CODE).contains(&out[0]));
            assert_eq!(device_char(out[0]), Some(symbol));
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(device_code('\u{FF61}'), Some(0xA1)); // ｡
        assert_eq!(device_code('\u{30FB}'), Some(0xA5)); // ・
        assert_eq!(device_code('\u{FF71}'), Some(0xB1)); // ｱ
        assert_eq!(device_code('\u{FF9F}'), Some(0xDF)); // ﾟ
        assert_eq!(device_code('\u{FF65}'), None);
        assert_eq!(device_char(0xA0), None);
        assert_eq!(device_char(0xE0), None);
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(bytes("FM 5W144"), b"FM 5W144".to_vec());
        assert_eq!(bytes(""), Vec::<u8>::new());
    }

    #[test]
    fn test_mixed_text() {
        // "ｱﾝﾃﾅ:1"
        let out = bytes("\u{FF71}\u{FF9D}\u{FF83}\u{FF85}:1");
        assert_eq!(out, [0xB1, 0xDD, 0xC3, 0xC5, b':', b'1'].to_vec());
    }

    #[test]
    fn test_unmapped_multibyte_passes_through_raw() {
        // Full-width katakana is not in the table: raw UTF-8 bytes come out
        assert_eq!(bytes("\u{30A2}"), "\u{30A2}".as_bytes().to_vec());
        assert_eq!(bytes("a\u{00B0}b"), "a\u{00B0}b".as_bytes().to_vec());
    }

    proptest! {
        #[test]
        fn prop_ascii_is_identity(text in "[ -~]{0,40}") {
            prop_assert_eq!(bytes(&text), text.as_bytes().to_vec());
        }

        #[test]
        fn prop_table_text_is_one_byte_per_char(indices in prop::collection::vec(0usize..63, 0..32)) {
            let text: String = indices.iter().map(|&i| TABLE[i]).collect();
            let out = bytes(&text);
            prop_assert_eq!(out.len(), indices.len());
            for (byte, index) in out.iter().zip(indices.iter()) {
                prop_assert_eq!(*byte, FIRST_CODE + *index as u8);
            }
        }
    }
}
