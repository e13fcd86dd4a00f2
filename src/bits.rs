use serde::{Deserialize, Serialize};

use crate::engine::Engine;

const WORD_BITS: u32 = 32;

/// Boolean stream that spends one 32-bit draw on every 32 bits.
///
/// Bits are taken least-significant first. A returned `true` marks a zero
/// bit in the underlying word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitStream {
    word: u32,
    remaining: u32,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_bit(&mut self, engine: &mut Engine) -> bool {
        if self.remaining == 0 {
            self.remaining = WORD_BITS;
            self.word = engine.next_word();
        }
        self.remaining -= 1;
        let bit = self.word & 1 == 0;
        self.word >>= 1;
        bit
    }

    /// Bits left before the next refill.
    pub fn buffered(&self) -> u32 {
        self.remaining
    }
}

/// Endless iterator of bits borrowing an [`Engine`].
pub struct Bits<'r> {
    engine: &'r mut Engine,
    stream: BitStream,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.stream.next_bit(self.engine))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl Engine {
    pub fn bits(&mut self) -> Bits<'_> {
        Bits {
            engine: self,
            stream: BitStream::new(),
        }
    }
}
