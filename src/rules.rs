//! Rule synthesis (C7): given a starting layout, simulate one "bounce" at a
//! time against the repeater/wall word list, recording each bounce as a
//! [`TransitionRule`], until the induction closes.

use crate::cert::{InitialConditions, TransitionRule};
use crate::machine::{Direction, TuringMachine};
use crate::records::Record;
use crate::simulator::run_tm;
use crate::tape::{PerDirection, Word};
use crate::verifier::check_induction;

/// Reconstructs the starting layout from `record`: runs the machine forward
/// (growing only on the left) until the right edge settles into
/// `buf_size + len(words[0])` cells, then peels the trailing `buf_size`
/// cells off as the buffer, leaving the rest as the new left wall
/// (`words[0]`).
pub fn find_start(
    tm: &TuringMachine,
    record: &Record,
    buf_size: usize,
    mut words: Vec<Word>,
    step_limit: u64,
) -> InitialConditions {
    let start_state = record.state;
    let start_pos = 0i64;
    let tape_len = buf_size + words[0].len() + 1;
    let mut start_tape = vec![0u8; tape_len];
    let mut right_tape = record.right_tape.clone();
    for cell in start_tape.iter_mut().skip(1) {
        if let Some(symbol) = right_tape.pop() {
            *cell = symbol.base();
        }
    }

    let growth = PerDirection::new(true, false);
    let result = run_tm(tm, start_state, start_pos, &start_tape, step_limit, growth);

    let split_at = result.tape.len() - buf_size;
    let buffer = Word(result.tape[split_at..].to_vec());
    words[0] = Word(result.tape[..split_at].to_vec());

    InitialConditions {
        steps: result.steps + record.steps,
        words,
        state: result.state,
        buffer,
    }
}

/// Synthesizes the chain of [`TransitionRule`]s that carries `start` forward
/// for at least `step_limit` steps and closes the induction (one cycle of
/// rules restoring the start layout, modulo one extra repeater copy).
/// Returns `None` at the first sign the candidate doesn't hold up: an
/// even-indexed rule that isn't a chain rule, a right-moving bounce landing
/// inside the buffer region, a word-list position that runs off either end,
/// or a failed induction check.
pub fn find_rules(
    tm: &TuringMachine,
    start: &InitialConditions,
    step_limit: u64,
) -> Option<Vec<TransitionRule>> {
    if start.words.len() < 3 {
        return None;
    }

    let mut cur_state = start.state;
    let mut cur_dir = Direction::R;
    let mut cur_global_pos: i64 = 1;
    let mut cur_buffer = start.buffer.clone();
    let mut cur_words = start.words.clone();
    let mut rules: Vec<TransitionRule> = Vec::new();
    let mut step_limit = step_limit as i64;
    let buf_size = start.buffer.len();

    while step_limit > 0 {
        let last_index = cur_words.len() as i64 - 1;
        let cur_word = cur_words[cur_global_pos as usize].clone();
        let growing = cur_global_pos == 0 || cur_global_pos == last_index;

        let mut start_tape = Vec::with_capacity(cur_buffer.len() + cur_word.len());
        let start_inner_pos: i64;
        match cur_dir {
            Direction::L => {
                start_tape.extend_from_slice(&cur_word.0);
                start_tape.extend_from_slice(&cur_buffer.0);
                start_inner_pos = cur_word.len() as i64 - 1;
            }
            Direction::R => {
                start_tape.extend_from_slice(&cur_buffer.0);
                start_tape.extend_from_slice(&cur_word.0);
                start_inner_pos = cur_buffer.len() as i64;
            }
        }
        let growth = PerDirection::new(cur_global_pos == 0, cur_global_pos == last_index);
        let result = run_tm(
            tm,
            cur_state,
            start_inner_pos,
            &start_tape,
            step_limit.max(0) as u64,
            growth,
        );

        let end_dir;
        let end_word;
        let end_buffer;
        let end_stub;
        if result.pos == -1 {
            end_dir = Direction::L;
            end_buffer = Word(result.tape[..buf_size].to_vec());
            end_word = Word(result.tape[buf_size..].to_vec());
            end_stub = Word::new();
        } else {
            if result.pos - (buf_size as i64) < 0 {
                return None;
            }
            let end_pos = result.pos as usize;
            let split = end_pos - buf_size;
            end_word = Word(result.tape[..split].to_vec());
            end_buffer = Word(result.tape[split..end_pos].to_vec());
            end_stub = Word(result.tape[end_pos..].to_vec());
            end_dir = Direction::R;
        }

        let rule = TransitionRule {
            start_word: cur_word,
            start_dir: cur_dir,
            start_state: cur_state,
            start_buffer: cur_buffer.clone(),
            steps: result.steps,
            growing,
            end_word,
            end_dir,
            end_state: result.state,
            end_buffer,
            stub: end_stub,
        };
        if rules.len() % 2 == 0 && !is_chain_rule(&rule) {
            return None;
        }

        step_limit -= rule.steps as i64;
        cur_state = rule.end_state;
        cur_buffer = rule.end_buffer.clone();
        cur_words[cur_global_pos as usize] = rule.end_word.clone();
        cur_dir = rule.end_dir;
        rules.push(rule);

        match cur_dir {
            Direction::L => cur_global_pos -= 1,
            Direction::R => cur_global_pos += 1,
        }
        if cur_global_pos < 0 || cur_global_pos >= cur_words.len() as i64 {
            return None;
        }
    }

    let actual_stub = rules.last().unwrap().stub.clone();
    if !check_induction(
        cur_state,
        cur_dir,
        cur_global_pos as usize,
        &cur_buffer,
        &cur_words,
        &actual_stub,
        start,
    ) {
        return None;
    }
    Some(rules)
}

/// A chain rule traverses a repeater without changing it: same state and
/// direction in and out, no tape growth, a non-empty repeater, no stub, and
/// an unchanged buffer.
pub fn is_chain_rule(rule: &TransitionRule) -> bool {
    rule.start_state == rule.end_state
        && rule.start_dir == rule.end_dir
        && !rule.growing
        && !rule.start_word.is_empty()
        && rule.stub.is_empty()
        && rule.start_buffer == rule.end_buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::State;

    #[test]
    fn find_rules_rejects_fewer_than_three_words() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let start = InitialConditions {
            steps: 0,
            words: vec![Word::new(), Word::new()],
            state: State(0),
            buffer: Word::new(),
        };
        assert!(find_rules(&tm, &start, 100).is_none());
    }

    #[test]
    fn is_chain_rule_requires_non_empty_repeater() {
        let rule = TransitionRule {
            start_word: Word::new(),
            start_dir: Direction::R,
            start_state: State(0),
            start_buffer: Word::new(),
            steps: 1,
            growing: false,
            end_word: Word::new(),
            end_dir: Direction::R,
            end_state: State(0),
            end_buffer: Word::new(),
            stub: Word::new(),
        };
        assert!(!is_chain_rule(&rule));
    }
}
