//! Half-infinite tapes and the symbol types that annotate them with
//! provenance (history) or a coarsened equivalence class (color), plus the
//! small `Word` and `PerDirection` helpers the rest of the pipeline is built
//! from.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::machine::{BaseSymbol, Direction, HeadConfig};

/// A value stored in a [`HalfTape`] cell: always projectable to a base
/// symbol, and carrying either provenance (during context discovery) or a
/// color class (once colored for repeater/wall extraction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapeSymbol {
    Base(BaseSymbol),
    History(HistorySymbol),
    Color(ColorSymbol),
}

/// A symbol tagged with the sequence of head configurations that produced
/// it, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySymbol {
    pub history: Vec<HeadConfig>,
    pub base: BaseSymbol,
}

/// A symbol tagged with a color: an integer naming the equivalence class its
/// surrounding history window falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSymbol {
    pub color: i64,
    pub base: BaseSymbol,
}

impl TapeSymbol {
    pub fn base(&self) -> BaseSymbol {
        match self {
            TapeSymbol::Base(b) => *b,
            TapeSymbol::History(h) => h.base,
            TapeSymbol::Color(c) => c.base,
        }
    }

    /// The history attached to this symbol, or an empty slice if it has none.
    pub fn history(&self) -> &[HeadConfig] {
        match self {
            TapeSymbol::History(h) => &h.history,
            _ => &[],
        }
    }
}

/// A half-infinite, head-adjacent stack of tape cells. The head-adjacent end
/// is the vector's tail, so `push`/`pop` both operate there in O(1)
/// amortized time, mirroring the "push new symbol toward the head, pop the
/// next one off" access pattern every algorithm in this pipeline uses. Cells
/// beyond what has been pushed are implicitly blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalfTape {
    cells: Vec<TapeSymbol>,
}

impl HalfTape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn push(&mut self, symbol: TapeSymbol) {
        self.cells.push(symbol);
    }

    pub fn pop(&mut self) -> Option<TapeSymbol> {
        self.cells.pop()
    }
}

/// A word: an ordered run of base symbols. Buffers, repeaters, walls and
/// stubs are all `Word`s; which role a given one plays is determined by its
/// position in a `Vec<Word>`, not by its type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word(pub Vec<BaseSymbol>);

impl Word {
    pub fn new() -> Self {
        Word(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<BaseSymbol>> for Word {
    fn from(v: Vec<BaseSymbol>) -> Self {
        Word(v)
    }
}

impl From<&[BaseSymbol]> for Word {
    fn from(v: &[BaseSymbol]) -> Self {
        Word(v.to_vec())
    }
}

/// Serialized as a plain digit string, e.g. `Word(vec![0,1,1,0])` -> `"0110"`,
/// matching the wire format the original Go program's `MarshalText` produces.
impl Serialize for Word {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let text: String = self.0.iter().map(|b| (b + b'0') as char).collect();
        s.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        let mut digits = Vec::with_capacity(text.len());
        for c in text.bytes() {
            if !c.is_ascii_digit() {
                return Err(serde::de::Error::custom(format!(
                    "invalid word digit {:?} in {:?}",
                    c as char, text
                )));
            }
            digits.push(c - b'0');
        }
        Ok(Word(digits))
    }
}

/// A value keyed by [`Direction`], used wherever the key space is exactly
/// `{L, R}` (growth policies, the two half-tapes during context discovery, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct PerDirection<T> {
    pub l: T,
    pub r: T,
}

impl<T> PerDirection<T> {
    pub fn new(l: T, r: T) -> Self {
        Self { l, r }
    }

    pub fn get(&self, d: Direction) -> &T {
        match d {
            Direction::L => &self.l,
            Direction::R => &self.r,
        }
    }

    pub fn get_mut(&mut self, d: Direction) -> &mut T {
        match d {
            Direction::L => &mut self.l,
            Direction::R => &mut self.r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_tape_push_pop_is_lifo() {
        let mut tape = HalfTape::new();
        tape.push(TapeSymbol::Base(1));
        tape.push(TapeSymbol::Base(0));
        assert_eq!(tape.pop().map(|s| s.base()), Some(0));
        assert_eq!(tape.pop().map(|s| s.base()), Some(1));
        assert_eq!(tape.pop(), None);
    }

    #[test]
    fn word_serializes_as_digit_string() {
        let word = Word(vec![0, 1, 1, 0]);
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, "\"0110\"");
        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back, word);
    }

    #[test]
    fn per_direction_get_mut() {
        let mut pd = PerDirection::new(1, 2);
        *pd.get_mut(Direction::L) += 10;
        assert_eq!(*pd.get(Direction::L), 11);
        assert_eq!(*pd.get(Direction::R), 2);
    }
}
