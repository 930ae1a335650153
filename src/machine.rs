//! The Turing machine model used throughout the pipeline: states, symbols,
//! directions, transitions, and the Standard TM Text Format
//! (<https://www.sligocki.com/2022/10/09/standard-tm-format.html>) used to
//! parse and print them.

use std::fmt::{self, Display};

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A tape alphabet symbol. Machines in this pipeline never need more than a
/// handful of them, so a single byte is plenty.
pub type BaseSymbol = u8;

/// A machine state, stored zero-based (`A` = 0) and rendered as a letter. \
/// There is no explicit halt state: a missing transition *is* the halt signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct State(pub u8);

impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'A' + self.0) as char)
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        let bytes = text.as_bytes();
        if bytes.len() != 1 || !bytes[0].is_ascii_uppercase() {
            return Err(serde::de::Error::custom(format!(
                "invalid state {text:?}, expected a single uppercase letter"
            )));
        }
        Ok(State(bytes[0] - b'A'))
    }
}

/// Tape head movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    L,
    R,
}

impl std::ops::Not for Direction {
    type Output = Direction;

    fn not(self) -> Direction {
        match self {
            Direction::L => Direction::R,
            Direction::R => Direction::L,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if *self == Direction::L { "L" } else { "R" })
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *self == Direction::L { "L" } else { "R" })
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        match text.as_str() {
            "L" => Ok(Direction::L),
            "R" => Ok(Direction::R),
            _ => Err(serde::de::Error::custom(format!(
                "invalid direction {text:?}, expected \"L\" or \"R\""
            ))),
        }
    }
}

/// `(state, symbol)` pair identifying one cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeadConfig {
    pub state: State,
    pub symbol: BaseSymbol,
}

/// One transition table entry: the symbol to write, the direction to move,
/// and the state to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub symbol: BaseSymbol,
    pub direction: Direction,
    pub state: State,
}

impl Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.symbol, self.direction, self.state)
    }
}

/// A Turing machine: its dimensions plus a partial transition function. \
/// Transitions absent from the map are undefined, i.e. halting.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    pub num_states: usize,
    pub num_symbols: usize,
    pub transitions: HashMap<HeadConfig, Transition>,
}

impl TuringMachine {
    /// Looks up the transition for a head configuration, if any is defined.
    pub fn transition(&self, head_config: HeadConfig) -> Option<Transition> {
        self.transitions.get(&head_config).copied()
    }

    /// Parses the Standard TM Text Format, e.g. `1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let state_strings: Vec<&str> = text.split('_').collect();
        let num_states = state_strings.len();
        if num_states < 2 {
            return Err(ParseError::new("a machine must have at least two states"));
        }
        let first_len = state_strings[0].len();
        if first_len == 0 || first_len % 3 != 0 {
            return Err(ParseError::new(
                "each state's transition block must be a multiple of 3 characters",
            ));
        }
        let num_symbols = first_len / 3;

        let mut transitions = HashMap::new();
        for (state_index, state_string) in state_strings.iter().enumerate() {
            let bytes = state_string.as_bytes();
            if bytes.len() != first_len {
                return Err(ParseError::new(
                    "all states must define the same number of symbols",
                ));
            }
            for symbol in 0..num_symbols {
                let triple = &bytes[symbol * 3..symbol * 3 + 3];
                let new_state_byte = triple[2];
                if !new_state_byte.is_ascii_uppercase() {
                    continue;
                }
                let new_state = State(new_state_byte - b'A');
                if new_state.0 as usize >= num_states {
                    continue;
                }
                if !triple[0].is_ascii_digit() {
                    return Err(ParseError::new(format!(
                        "invalid symbol {:?} in transition {:?}",
                        triple[0] as char, state_string
                    )));
                }
                let new_symbol = triple[0] - b'0';
                if new_symbol as usize >= num_symbols {
                    return Err(ParseError::new(format!(
                        "symbol {new_symbol} exceeds the table's symbol count {num_symbols}"
                    )));
                }
                let new_direction = if triple[1] == b'R' {
                    Direction::R
                } else {
                    Direction::L
                };
                transitions.insert(
                    HeadConfig {
                        state: State(state_index as u8),
                        symbol: symbol as BaseSymbol,
                    },
                    Transition {
                        symbol: new_symbol,
                        direction: new_direction,
                        state: new_state,
                    },
                );
            }
        }

        Ok(TuringMachine {
            num_states,
            num_symbols,
            transitions,
        })
    }

    /// Returns a machine with every transition's direction flipped: the
    /// left-bouncer search runs this against the reversed machine instead of
    /// duplicating every algorithm for the mirrored case.
    pub fn mirror(&self) -> Self {
        let transitions = self
            .transitions
            .iter()
            .map(|(head_config, transition)| {
                (
                    *head_config,
                    Transition {
                        symbol: transition.symbol,
                        direction: !transition.direction,
                        state: transition.state,
                    },
                )
            })
            .collect();
        TuringMachine {
            num_states: self.num_states,
            num_symbols: self.num_symbols,
            transitions,
        }
    }
}

impl Display for TuringMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state_strings = Vec::with_capacity(self.num_states);
        for state_index in 0..self.num_states {
            let mut s = String::with_capacity(self.num_symbols * 3);
            for symbol in 0..self.num_symbols {
                let head_config = HeadConfig {
                    state: State(state_index as u8),
                    symbol: symbol as BaseSymbol,
                };
                match self.transition(head_config) {
                    Some(transition) => s.push_str(&transition.to_string()),
                    None => s.push_str("---"),
                }
            }
            state_strings.push(s);
        }
        write!(f, "{}", state_strings.join("_"))
    }
}

impl Serialize for TuringMachine {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TuringMachine {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        TuringMachine::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let text = "1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RA0LA";
        let tm = TuringMachine::parse(text).unwrap();
        assert_eq!(tm.num_states, 5);
        assert_eq!(tm.num_symbols, 2);
        assert_eq!(tm.to_string(), text);
    }

    #[test]
    fn undefined_transition_is_halt() {
        let tm = TuringMachine::parse("1RB---_1LB0RA").unwrap();
        assert_eq!(
            tm.transition(HeadConfig {
                state: State(0),
                symbol: 1
            }),
            None
        );
    }

    #[test]
    fn mirror_flips_directions_only() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let mirrored = tm.mirror();
        let original = tm
            .transition(HeadConfig {
                state: State(0),
                symbol: 0,
            })
            .unwrap();
        let flipped = mirrored
            .transition(HeadConfig {
                state: State(0),
                symbol: 0,
            })
            .unwrap();
        assert_eq!(original.symbol, flipped.symbol);
        assert_eq!(original.state, flipped.state);
        assert_eq!(original.direction, !flipped.direction);
    }

    #[test]
    fn rejects_too_few_states() {
        assert!(TuringMachine::parse("1RA").is_err());
    }
}
