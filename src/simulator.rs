//! The shared Turing machine simulator every discovery and verification step
//! runs on top of.

use crate::machine::{BaseSymbol, Direction, HeadConfig, State, TuringMachine};
use crate::tape::PerDirection;

/// The configuration a simulation run ends in, plus how many steps it ran.
#[derive(Debug, Clone)]
pub struct SimResult {
    pub state: State,
    pub pos: i64,
    pub tape: Vec<BaseSymbol>,
    pub steps: u64,
}

/// Runs `tm` starting in `start_state` at `start_pos` on `start_tape`, for at
/// most `step_limit` steps. `growth` says, per direction, whether the tape
/// may be extended with a blank cell when the head walks off that edge; if
/// growth is disallowed on the edge the head reaches, the run stops
/// immediately, reporting a position of `-1` (left) or `tape.len()` (right)
/// as a sentinel rather than a valid index.
///
/// The step count returned includes the step on which an undefined
/// transition is found, matching the conventional Busy Beaver step count
/// (the halting transition itself counts as a step).
pub fn run_tm(
    tm: &TuringMachine,
    start_state: State,
    start_pos: i64,
    start_tape: &[BaseSymbol],
    step_limit: u64,
    growth: PerDirection<bool>,
) -> SimResult {
    let mut tape = start_tape.to_vec();
    let mut pos = start_pos;
    let mut state = start_state;

    if pos < 0 || pos as usize >= tape.len() {
        return SimResult {
            state,
            pos,
            tape,
            steps: 0,
        };
    }

    let mut steps: u64 = 1;
    while steps <= step_limit {
        let symbol = tape[pos as usize];
        let head_config = HeadConfig { state, symbol };
        let Some(transition) = tm.transition(head_config) else {
            return SimResult {
                state,
                pos,
                tape,
                steps,
            };
        };
        tape[pos as usize] = transition.symbol;
        state = transition.state;
        match transition.direction {
            Direction::L => pos -= 1,
            Direction::R => pos += 1,
        }

        if pos == -1 {
            if !*growth.get(Direction::L) {
                return SimResult {
                    state,
                    pos,
                    tape,
                    steps,
                };
            }
            tape.insert(0, 0);
            pos = 0;
        } else if pos as usize == tape.len() {
            if !*growth.get(Direction::R) {
                return SimResult {
                    state,
                    pos,
                    tape,
                    steps,
                };
            }
            tape.push(0);
        }

        steps += 1;
    }
    steps -= 1;

    SimResult {
        state,
        pos,
        tape,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::State;

    #[test]
    fn halts_on_undefined_transition() {
        let tm = TuringMachine::parse("1RB---_1LB0RA").unwrap();
        let result = run_tm(
            &tm,
            State(0),
            0,
            &[0],
            1_000,
            PerDirection::new(true, true),
        );
        assert_eq!(result.state, State(0));
        assert!(result.steps > 0);
    }

    #[test]
    fn respects_step_limit() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let result = run_tm(&tm, State(0), 0, &[0, 0], 5, PerDirection::new(true, true));
        assert_eq!(result.steps, 5);
    }

    #[test]
    fn stops_at_disallowed_growth_edge() {
        let tm = TuringMachine::parse("1RA1RA_1RA1RA").unwrap();
        let result = run_tm(
            &tm,
            State(0),
            0,
            &[0],
            1_000,
            PerDirection::new(false, false),
        );
        assert_eq!(result.pos, 1);
        assert_eq!(result.tape.len(), 1);
    }
}
