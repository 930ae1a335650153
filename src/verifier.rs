//! The certificate verifier (C8): an independent re-check of a discovered
//! certificate that never trusts the discovery pipeline's bookkeeping,
//! rebuilding every claimed tape from scratch and re-running the machine.

use crate::cert::{FullCert, InitialConditions, TransitionRule};
use crate::machine::{Direction, State, TuringMachine};
use crate::rules::is_chain_rule;
use crate::simulator::run_tm;
use crate::tape::{PerDirection, Word};

/// Re-checks a certificate end to end: the claimed starting layout is
/// reachable from the blank tape in exactly `start.steps` steps, every rule
/// independently holds up under simulation, and applying the rules in order
/// closes the induction.
pub fn verify_bouncer(cert: &FullCert) -> bool {
    let tm = if cert.mirror {
        cert.tm.mirror()
    } else {
        cert.tm.clone()
    };
    check_initial_conditions(&tm, &cert.start)
        && check_rules(&tm, &cert.rules)
        && check_application(&cert.start, &cert.rules)
}

/// Confirms that running `tm` from the canonical blank-tape start for
/// `start.steps` steps lands exactly on the configuration `start` claims.
pub fn check_initial_conditions(tm: &TuringMachine, start: &InitialConditions) -> bool {
    if start.words.len() < 3 || start.words.len() % 2 != 1 {
        return false;
    }

    let growth = PerDirection::new(true, true);
    let result = run_tm(tm, State(0), 0, &[0], start.steps, growth);

    let claimed_pos = (start.words[0].len() + start.buffer.len()) as i64;
    let mut claimed_tape = Vec::new();
    claimed_tape.extend_from_slice(&start.words[0].0);
    claimed_tape.extend_from_slice(&start.buffer.0);
    let mut i = 2;
    while i < start.words.len() {
        claimed_tape.extend_from_slice(&start.words[i].0);
        i += 2;
    }

    start.state == result.state
        && claimed_pos == result.pos
        && start.steps == result.steps
        && claimed_tape == result.tape
}

/// Every rule must independently simulate correctly, and every even-indexed
/// rule (0-based) must be a chain rule.
pub fn check_rules(tm: &TuringMachine, rules: &[TransitionRule]) -> bool {
    if rules.len() < 2 || rules.len() % 2 != 0 {
        return false;
    }
    for (i, rule) in rules.iter().enumerate() {
        if !check_rule(tm, rule) {
            return false;
        }
        if i % 2 == 0 && !is_chain_rule(rule) {
            return false;
        }
    }
    true
}

/// Simulates a rule's own claimed start configuration forward for exactly
/// `rule.steps` steps and checks it lands on the rule's claimed end
/// configuration.
pub fn check_rule(tm: &TuringMachine, rule: &TransitionRule) -> bool {
    if rule.start_buffer.len() != rule.end_buffer.len() {
        return false;
    }

    let mut start_tape = Vec::with_capacity(rule.start_buffer.len() + rule.start_word.len());
    let start_pos;
    match rule.start_dir {
        Direction::L => {
            start_tape.extend_from_slice(&rule.start_word.0);
            start_tape.extend_from_slice(&rule.start_buffer.0);
            start_pos = rule.start_word.len() as i64 - 1;
        }
        Direction::R => {
            start_tape.extend_from_slice(&rule.start_buffer.0);
            start_tape.extend_from_slice(&rule.start_word.0);
            start_pos = rule.start_buffer.len() as i64;
        }
    }
    let growth = match rule.start_dir {
        Direction::L => PerDirection::new(rule.growing, false),
        Direction::R => PerDirection::new(false, rule.growing),
    };

    let mut claimed_tape =
        Vec::with_capacity(rule.end_buffer.len() + rule.end_word.len() + rule.stub.len());
    let claimed_pos;
    match rule.end_dir {
        Direction::L => {
            claimed_tape.extend_from_slice(&rule.stub.0);
            claimed_tape.extend_from_slice(&rule.end_buffer.0);
            claimed_tape.extend_from_slice(&rule.end_word.0);
            claimed_pos = rule.stub.len() as i64 - 1;
        }
        Direction::R => {
            claimed_tape.extend_from_slice(&rule.end_word.0);
            claimed_tape.extend_from_slice(&rule.end_buffer.0);
            claimed_tape.extend_from_slice(&rule.stub.0);
            claimed_pos = (rule.end_word.len() + rule.end_buffer.len()) as i64;
        }
    }

    let result = run_tm(tm, rule.start_state, start_pos, &start_tape, rule.steps, growth);

    rule.end_state == result.state
        && claimed_pos == result.pos
        && rule.steps == result.steps
        && claimed_tape == result.tape
}

/// Applies `rules` in order against the layout `start` describes, checking
/// at each step that the rule's claimed start matches the layout actually
/// reached, then checks the final layout closes the induction.
pub fn check_application(start: &InitialConditions, rules: &[TransitionRule]) -> bool {
    let mut actual_state = start.state;
    let mut actual_dir = Direction::R;
    let mut actual_pos: i64 = 1;
    let mut actual_buffer = start.buffer.clone();
    let mut actual_words = start.words.clone();

    for (i, rule) in rules.iter().enumerate() {
        if !check_rule_context(
            actual_state,
            actual_dir,
            actual_pos,
            &actual_buffer,
            &actual_words,
            rule,
            i == rules.len() - 1,
        ) {
            return false;
        }
        actual_state = rule.end_state;
        actual_buffer = rule.end_buffer.clone();
        actual_words[actual_pos as usize] = rule.end_word.clone();
        actual_dir = rule.end_dir;
        match actual_dir {
            Direction::L => actual_pos -= 1,
            Direction::R => actual_pos += 1,
        }
        if actual_pos < 0 || actual_pos as usize >= actual_words.len() {
            return false;
        }
    }

    let actual_stub = rules.last().unwrap().stub.clone();
    check_induction(
        actual_state,
        actual_dir,
        actual_pos as usize,
        &actual_buffer,
        &actual_words,
        &actual_stub,
        start,
    )
}

#[allow(clippy::too_many_arguments)]
fn check_rule_context(
    cur_state: State,
    cur_dir: Direction,
    cur_pos: i64,
    cur_buffer: &Word,
    cur_words: &[Word],
    rule: &TransitionRule,
    last_rule: bool,
) -> bool {
    rule.start_state == cur_state
        && rule.start_dir == cur_dir
        && rule.growing == (cur_pos == 0 || cur_pos as usize == cur_words.len() - 1)
        && (rule.stub.is_empty() || last_rule)
        && rule.start_buffer == *cur_buffer
        && rule.start_word == cur_words[cur_pos as usize]
}

/// The induction closure (§4.14): after all rules apply, the layout must be
/// back in `start.state`, facing right, at position 1, with an unchanged
/// buffer and left wall, and the *right-aligned* remaining word lists must
/// agree — i.e. the only difference allowed is which copy of a boundary
/// symbol got attributed to which repeater, which [`right_align`] cancels
/// out before the final comparison.
#[allow(clippy::too_many_arguments)]
pub fn check_induction(
    actual_state: State,
    actual_dir: Direction,
    actual_pos: usize,
    actual_buffer: &Word,
    actual_words: &[Word],
    actual_stub: &Word,
    start: &InitialConditions,
) -> bool {
    if actual_state != start.state
        || actual_dir != Direction::R
        || actual_pos != 1
        || *actual_buffer != start.buffer
        || actual_words[0] != start.words[0]
    {
        return false;
    }

    let mut actual_right_words = actual_words.to_vec();
    actual_right_words[0] = actual_stub.clone();

    let mut claimed_right_words = start.words.clone();
    claimed_right_words[0] = Word::new();
    let mut i = 1;
    while i < claimed_right_words.len() {
        let tail = claimed_right_words[i].clone();
        claimed_right_words[i - 1].0.extend(tail.0);
        i += 2;
    }

    right_align(&mut actual_right_words);
    right_align(&mut claimed_right_words);
    actual_right_words == claimed_right_words
}

/// Canonicalizes the boundary ambiguity between a wall and the repeater to
/// its right: whenever the repeater's first symbol matches the wall's first
/// symbol, rotate that symbol out of the repeater's head, through the wall
/// (dropping the wall's old first symbol, appending the rotated one at its
/// tail), and into the tail of the wall two slots to the left. Applied
/// right to left so earlier walls see the fully-settled result of later
/// ones.
pub fn right_align(words: &mut [Word]) {
    let mut i = words.len() as isize - 1;
    while i > 1 {
        let idx = i as usize;
        while !words[idx].is_empty() && words[idx].0[0] == words[idx - 1].0[0] {
            let symbol = words[idx].0.remove(0);
            words[idx - 1].0.remove(0);
            words[idx - 1].0.push(symbol);
            words[idx - 2].0.push(symbol);
        }
        i -= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::State;

    #[test]
    fn right_align_is_idempotent() {
        let mut words = vec![
            Word(vec![9]),
            Word(vec![1, 0, 1]),
            Word(vec![0]),
            Word(vec![1, 0, 1, 0]),
            Word(vec![9]),
        ];
        right_align(&mut words);
        let once = words.clone();
        right_align(&mut words);
        assert_eq!(once, words);
    }

    #[test]
    fn right_align_rotates_shared_boundary_symbol() {
        // words[2] == [0]; words[3] starts with 0 too, so one 0 rotates
        // through the wall into words[1].
        let mut words = vec![Word(vec![9]), Word(vec![1]), Word(vec![0]), Word(vec![0, 1])];
        right_align(&mut words);
        assert_eq!(words[3], Word(vec![1]));
    }

    #[test]
    fn check_initial_conditions_rejects_even_word_count() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let start = InitialConditions {
            steps: 0,
            words: vec![Word::new(), Word::new()],
            state: State(0),
            buffer: Word::new(),
        };
        assert!(!check_initial_conditions(&tm, &start));
    }

    #[test]
    fn check_rules_rejects_odd_length() {
        let tm = TuringMachine::parse("1RB1LA_1LA1RB").unwrap();
        let rule = TransitionRule {
            start_word: Word(vec![0]),
            start_dir: Direction::R,
            start_state: State(0),
            start_buffer: Word::new(),
            steps: 1,
            growing: false,
            end_word: Word(vec![0]),
            end_dir: Direction::R,
            end_state: State(0),
            end_buffer: Word::new(),
            stub: Word::new(),
        };
        assert!(!check_rules(&tm, &[rule]));
    }
}
