//! Context discovery: replay the machine from a record, tracking the
//! left/right alternation pattern and the richer (still history-tagged)
//! right half-tape needed for buffer-size and coloring analysis.

use crate::machine::{Direction, HeadConfig, TuringMachine};
use crate::records::Record;
use crate::tape::{HalfTape, HistorySymbol, PerDirection, TapeSymbol};

/// Replays `tm` from `start_record`'s state for `step_limit` steps, starting
/// with the right half-tape the record captured. Returns the direction-run
/// lengths (how many consecutive steps were taken in the same direction,
/// alternating) and the resulting right half-tape.
pub fn find_context(
    tm: &TuringMachine,
    start_record: &Record,
    step_limit: u64,
) -> (Vec<i64>, HalfTape) {
    let mut directions: Vec<i64> = vec![0];
    let mut half_tapes = PerDirection::new(HalfTape::new(), start_record.right_tape.clone());
    let mut head_config = HeadConfig {
        state: start_record.state,
        symbol: 0,
    };
    let mut last_dir = Direction::L;
    let mut last_col: Vec<HeadConfig> = Vec::new();

    let mut steps: u64 = 1;
    while steps <= step_limit {
        let Some(transition) = tm.transition(head_config) else {
            break;
        };
        let mut history = last_col.clone();
        history.push(head_config);
        half_tapes.get_mut(!transition.direction).push(TapeSymbol::History(
            HistorySymbol {
                history,
                base: transition.symbol,
            },
        ));
        head_config.state = transition.state;
        match half_tapes.get_mut(transition.direction).pop() {
            Some(symbol) => {
                head_config.symbol = symbol.base();
                last_col = symbol.history().to_vec();
            }
            None => {
                head_config.symbol = 0;
                last_col = Vec::new();
            }
        }

        if last_dir == transition.direction {
            *directions.last_mut().unwrap() += 1;
        } else {
            directions.push(1);
        }
        last_dir = transition.direction;

        steps += 1;
    }

    (directions, half_tapes.r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::find_records;

    #[test]
    fn direction_sequence_starts_with_sentinel_zero() {
        let tm = TuringMachine::parse("1RB1LA_0LA1RB").unwrap();
        let records = find_records(&tm, 500);
        assert!(records.len() >= 2);
        let (dirs, _tape) = find_context(&tm, &records[0], records[1].steps - records[0].steps);
        assert_eq!(dirs[0], 0);
        assert!(dirs.len() >= 2);
    }
}
