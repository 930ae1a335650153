//! Wire-format certificate types: the structures a successful discovery run
//! produces and a certificate verification run consumes, serialized to match
//! the standard format's `encoding/json` marshaling of exported struct
//! fields (hence the `PascalCase` rename on every field in this module).

use serde::{Deserialize, Serialize};

use crate::machine::{Direction, State, TuringMachine};
use crate::tape::Word;

/// The claimed tape layout and step count a certificate's induction starts
/// from: `words[0] · buffer · state⟩ · words[1] · words[2] · … · words[k-1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitialConditions {
    pub steps: u64,
    pub words: Vec<Word>,
    pub state: State,
    pub buffer: Word,
}

/// One "bounce": running the machine `steps` steps from `start_*` (in
/// `start_dir`, permitting growth only when `growing`) produces `end_*`.
/// `stub` is non-empty only on the final rule of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransitionRule {
    pub start_word: Word,
    pub start_dir: Direction,
    pub start_state: State,
    pub start_buffer: Word,
    pub steps: u64,
    pub growing: bool,
    pub end_word: Word,
    pub end_dir: Direction,
    pub end_state: State,
    pub end_buffer: Word,
    pub stub: Word,
}

/// A complete, self-contained non-halting certificate: the machine, whether
/// it was discovered via the left-right mirror, the starting layout, and the
/// chain of rules whose repeated application proves non-termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FullCert {
    pub tm: TuringMachine,
    pub mirror: bool,
    pub start: InitialConditions,
    pub rules: Vec<TransitionRule>,
}

/// The same certificate with `rules` elided in favor of a single step count;
/// [`crate::rules::find_rules`] can re-synthesize the rule chain from
/// `start` + `cycle_steps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShortCert {
    pub tm: TuringMachine,
    pub mirror: bool,
    pub start: InitialConditions,
    pub cycle_steps: u64,
}

impl FullCert {
    /// Collapses to a [`ShortCert`] by summing the rules' step counts.
    pub fn to_short(&self) -> ShortCert {
        ShortCert {
            tm: self.tm.clone(),
            mirror: self.mirror,
            start: self.start.clone(),
            cycle_steps: self.rules.iter().map(|r| r.steps).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::State;

    #[test]
    fn full_cert_round_trips_through_json_with_pascal_case_fields() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let cert = FullCert {
            tm,
            mirror: false,
            start: InitialConditions {
                steps: 3,
                words: vec![Word(vec![0]), Word(vec![1]), Word(vec![0])],
                state: State(0),
                buffer: Word(vec![1, 0]),
            },
            rules: vec![],
        };
        let json = serde_json::to_string(&cert).unwrap();
        assert!(json.contains("\"Tm\""));
        assert!(json.contains("\"Mirror\""));
        assert!(json.contains("\"Start\""));
        let back: FullCert = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mirror, cert.mirror);
        assert_eq!(back.start, cert.start);
    }

    #[test]
    fn to_short_sums_rule_steps() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let start = InitialConditions {
            steps: 1,
            words: vec![Word::new(), Word(vec![0]), Word::new()],
            state: State(0),
            buffer: Word::new(),
        };
        let rule = TransitionRule {
            start_word: Word(vec![0]),
            start_dir: Direction::R,
            start_state: State(0),
            start_buffer: Word::new(),
            steps: 5,
            growing: false,
            end_word: Word(vec![0]),
            end_dir: Direction::R,
            end_state: State(0),
            end_buffer: Word::new(),
            stub: Word::new(),
        };
        let cert = FullCert {
            tm,
            mirror: false,
            start,
            rules: vec![rule.clone(), rule],
        };
        assert_eq!(cert.to_short().cycle_steps, 10);
    }
}
