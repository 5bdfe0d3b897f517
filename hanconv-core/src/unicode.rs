//! Composite-unit segmentation
//!
//! Dictionary keys and input text are matched per *unit* rather than per
//! `char`. A unit is a single character together with any trailing combining
//! marks or variation selectors, or an ideographic description sequence
//! (IDS) treated as one atom. Truncated sequences stay in one piece so a
//! partial IDS never matches through its components.

/// Arity of an IDS operator, or of the ideographic variation indicator 〾.
///
/// Returns `None` for anything that does not open an expression.
fn ids_arity(c: char) -> Option<u32> {
    match c {
        '\u{2FF2}' | '\u{2FF3}' => Some(3),
        '\u{2FF0}'..='\u{2FFB}' => Some(2),
        '\u{303E}' => Some(1),
        _ => None,
    }
}

/// Characters that may fill an operand slot of an IDS expression.
fn is_ids_operand(c: char) -> bool {
    matches!(c,
        // CJK unified ideographs and extensions
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{2A700}'..='\u{2B73F}'
        | '\u{2B740}'..='\u{2B81F}'
        | '\u{2B820}'..='\u{2CEAF}'
        | '\u{2CEB0}'..='\u{2EBEF}'
        | '\u{30000}'..='\u{3134F}'
        // compatibility ideographs
        | '\u{F900}'..='\u{FAFF}'
        | '\u{2F800}'..='\u{2FA1F}'
        // radicals and strokes
        | '\u{2E80}'..='\u{2EFF}'
        | '\u{2F00}'..='\u{2FDF}'
        | '\u{31C0}'..='\u{31EF}'
        // private use
        | '\u{E000}'..='\u{F8FF}'
        | '\u{F0000}'..='\u{FFFFD}'
        | '\u{100000}'..='\u{10FFFD}'
        // fullwidth question mark wildcard
        | '\u{FF1F}'
        // nested operators and the variation indicator
        | '\u{2FF0}'..='\u{2FFB}'
        | '\u{303E}'
    )
}

/// Marks absorbed into the preceding unit.
fn is_trailing_mark(c: char) -> bool {
    matches!(c,
        // combining diacritical marks
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}'
        // variation selectors
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{E0100}'..='\u{E01EF}'
        // Mongolian free variation selectors
        | '\u{180B}'..='\u{180D}'
    )
}

/// Iterator over the composite units of a string.
///
/// Yields subslices of the input; concatenating them restores the input
/// exactly.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    /// Creates a segmenter over `text`.
    pub fn new(text: &'a str) -> Self {
        Segments { text, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let mut iter = rest.char_indices().peekable();
        let (_, first) = iter.next()?;
        let mut end = first.len_utf8();

        if let Some(arity) = ids_arity(first) {
            // The expression starts with one pending slot; the opener fills
            // it and opens `arity` more. An invalid character or the end of
            // the text truncates the expression but the consumed prefix
            // remains one unit.
            let mut need = arity;
            while need > 0 {
                let Some(&(i, c)) = iter.peek() else { break };
                if is_trailing_mark(c) {
                    // Marks attach to the previous operand without filling
                    // a slot.
                    iter.next();
                    end = i + c.len_utf8();
                    continue;
                }
                if !is_ids_operand(c) {
                    break;
                }
                iter.next();
                end = i + c.len_utf8();
                need -= 1;
                if let Some(a) = ids_arity(c) {
                    need += a;
                }
            }
        }

        while let Some(&(i, c)) = iter.peek() {
            if !is_trailing_mark(c) {
                break;
            }
            iter.next();
            end = i + c.len_utf8();
        }

        let unit = &rest[..end];
        self.pos += end;
        Some(unit)
    }
}

/// Splits `text` into composite units.
pub fn segment(text: &str) -> Vec<&str> {
    Segments::new(text).collect()
}

/// Number of composite units in `text`.
pub fn unit_count(text: &str) -> usize {
    Segments::new(text).count()
}
