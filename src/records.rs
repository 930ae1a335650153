//! Left-edge record detection: the first pass over a candidate machine,
//! looking for step counts at which the head falls off the left edge of
//! everything it has visited so far.

use crate::machine::{Direction, HeadConfig, State, TuringMachine};
use crate::tape::{HalfTape, PerDirection, TapeSymbol};

/// A left-edge record: the state the machine was in, the step count at which
/// it happened, and everything currently to the right of the head at that
/// moment (tagged with the history of head configurations that wrote it).
#[derive(Debug, Clone)]
pub struct Record {
    pub state: State,
    pub steps: u64,
    pub right_tape: HalfTape,
}

/// Simulates `tm` for up to `step_limit` steps (or until it halts), tracking
/// both half-tapes as history-tagged symbols, and recording a [`Record`]
/// every time the head steps left off the edge of what it has visited.
pub fn find_records(tm: &TuringMachine, step_limit: u64) -> Vec<Record> {
    let mut records = Vec::new();
    let mut half_tapes = PerDirection::new(HalfTape::new(), HalfTape::new());
    let mut head_config = HeadConfig::default();

    let mut steps: u64 = 1;
    while steps <= step_limit {
        let Some(transition) = tm.transition(head_config) else {
            break;
        };
        half_tapes.get_mut(!transition.direction).push(TapeSymbol::History(
            crate::tape::HistorySymbol {
                history: vec![head_config],
                base: transition.symbol,
            },
        ));
        head_config.state = transition.state;
        match half_tapes.get_mut(transition.direction).pop() {
            Some(symbol) => head_config.symbol = symbol.base(),
            None => {
                head_config.symbol = 0;
                if transition.direction == Direction::L {
                    records.push(Record {
                        state: head_config.state,
                        steps,
                        right_tape: half_tapes.r.clone(),
                    });
                }
            }
        }
        steps += 1;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bouncing_machine_produces_growing_records() {
        // A small left-bouncer-shaped machine: records should accumulate and
        // their step counts should strictly increase.
        let tm = TuringMachine::parse("1RB1LA_0LA1RB").unwrap();
        let records = find_records(&tm, 500);
        assert!(records.len() >= 2);
        for pair in records.windows(2) {
            assert!(pair[1].steps > pair[0].steps);
        }
    }

    #[test]
    fn halting_machine_eventually_stops_recording() {
        let tm = TuringMachine::parse("1RB---_1LB0RA").unwrap();
        let records = find_records(&tm, 1_000);
        assert!(records.len() < 1_000);
    }
}
