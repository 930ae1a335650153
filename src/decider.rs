//! The decider driver (C9): orchestrates record-finding, candidate gating
//! and certificate synthesis/verification across a machine and its mirror,
//! and across a schedule of step limits for the CLI's scan mode.

use crate::buffer::{find_buffer_size, find_colors};
use crate::cert::FullCert;
use crate::context::find_context;
use crate::machine::TuringMachine;
use crate::records::{find_records, Record};
use crate::repeaters::find_repeaters;
use crate::rules::{find_rules, find_start};
use crate::verifier::verify_bouncer;

/// Tries to decide `tm` as a bouncer, then its left-right mirror. A
/// certificate found via the mirror branch carries `mirror: true` and a
/// machine already un-mirrored back to `tm`'s own orientation, so a caller
/// never needs to know which branch succeeded.
pub fn decide_bouncers(tm: &TuringMachine, step_limit: u64) -> Option<FullCert> {
    decide_left_bouncers(tm, false, step_limit)
        .or_else(|| decide_left_bouncers(&tm.mirror(), true, step_limit))
}

/// Finds left-edge records for `tm`, then scans increasing index strides
/// from the tail for a quadruple of records that passes [`check_records`].
pub fn decide_left_bouncers(tm: &TuringMachine, mirrored: bool, step_limit: u64) -> Option<FullCert> {
    let records = find_records(tm, step_limit);
    let num_records = records.len();
    let mut i = 1usize;
    while 3 * i < num_records {
        let quad = [
            records[num_records - 1 - 3 * i].clone(),
            records[num_records - 1 - 2 * i].clone(),
            records[num_records - 1 - i].clone(),
            records[num_records - 1].clone(),
        ];
        if let Some(cert) = check_records(tm, mirrored, &quad) {
            return Some(cert);
        }
        i += 1;
    }
    None
}

fn same_states(records: &[Record; 4]) -> bool {
    records[0].state == records[1].state
        && records[0].state == records[2].state
        && records[0].state == records[3].state
}

fn quadratic_progression(records: &[Record; 4]) -> bool {
    let d1 = records[1].steps as i64 - records[0].steps as i64;
    let d2 = records[2].steps as i64 - records[1].steps as i64;
    let d3 = records[3].steps as i64 - records[2].steps as i64;
    let dd1 = d2 - d1;
    let dd2 = d3 - d2;
    dd1 > 0 && dd1 == dd2
}

/// Runs the full discovery pipeline (C4-C8) on one candidate quadruple of
/// records, returning a verified certificate on success.
fn check_records(tm: &TuringMachine, mirrored: bool, records: &[Record; 4]) -> Option<FullCert> {
    if !same_states(records) || !quadratic_progression(records) {
        return None;
    }

    let (dir_sequence1, history_tape1) =
        find_context(tm, &records[0], records[1].steps - records[0].steps);
    let (dir_sequence2, history_tape2) =
        find_context(tm, &records[1], records[2].steps - records[1].steps);

    let buf_size = find_buffer_size(&dir_sequence1, &dir_sequence2)?;

    let growth = history_tape2.len() as i64 - history_tape1.len() as i64;
    let color_tape1 = find_colors(history_tape1, growth);
    let color_tape2 = find_colors(history_tape2, growth);

    let words = find_repeaters(color_tape1, color_tape2, buf_size as usize)?;

    // records[i] has buffer + repeater^(i-1) + walls.
    let start = find_start(tm, &records[1], buf_size as usize, words, records[2].steps);
    let rules = find_rules(tm, &start, records[3].steps - records[2].steps)?;

    let cert_tm = if mirrored { tm.mirror() } else { tm.clone() };
    let cert = FullCert {
        tm: cert_tm,
        mirror: mirrored,
        start,
        rules,
    };
    verify_bouncer(&cert).then_some(cert)
}

/// The CLI scan mode's step-limit schedule: unless `exact` is set, probes
/// increasing powers of ten below `step_limit` before the final attempt at
/// `step_limit` itself, so a machine that's a bouncer well below the
/// configured limit is decided (and printed) early.
pub fn decide_machine(tm: &TuringMachine, step_limit: u64, exact: bool) -> Option<FullCert> {
    if !exact {
        let mut n = 100u64;
        while n < step_limit {
            if let Some(cert) = decide_bouncers(tm, n) {
                return Some(cert);
            }
            n *= 10;
        }
    }
    decide_bouncers(tm, step_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNCER_1: &str = "1RB1RD_1LC1LE_1RA0LB_0RA---_0RC0RB";
    const BOUNCER_2: &str = "1LB---_0LC1LD_0RD1LC_1RE0LA_1LA0RE";
    const BOUNCER_3: &str = "1RB1LC_0LA0RB_1RD1LE_0RB1RC_---0LB";
    const HALTER: &str = "1RB---_0LC0RB_1LD1LC_1LA0RC";

    #[test]
    fn decides_known_bouncers() {
        let tm = TuringMachine::parse(BOUNCER_1).unwrap();
        let cert = decide_bouncers(&tm, 1_700);
        assert!(cert.is_some());
        assert!(verify_bouncer(&cert.unwrap()));
    }

    #[test]
    fn decides_second_known_bouncer() {
        let tm = TuringMachine::parse(BOUNCER_2).unwrap();
        let cert = decide_bouncers(&tm, 10_000);
        assert!(cert.is_some());
        assert!(verify_bouncer(&cert.unwrap()));
    }

    #[test]
    fn decides_third_known_bouncer() {
        let tm = TuringMachine::parse(BOUNCER_3).unwrap();
        let cert = decide_bouncers(&tm, 10_000);
        assert!(cert.is_some());
        assert!(verify_bouncer(&cert.unwrap()));
    }

    #[test]
    fn halting_machine_yields_no_certificate() {
        let tm = TuringMachine::parse(HALTER).unwrap();
        assert!(decide_bouncers(&tm, 10_000).is_none());
    }

    #[test]
    fn decide_bouncers_is_monotone_in_step_limit() {
        let tm = TuringMachine::parse(BOUNCER_1).unwrap();
        assert!(decide_bouncers(&tm, 1_700).is_some());
        assert!(decide_bouncers(&tm, 5_000).is_some());
    }

    #[test]
    fn mirror_of_mirror_decides_the_same() {
        let tm = TuringMachine::parse(BOUNCER_1).unwrap();
        let mirrored_twice = tm.mirror().mirror();
        assert_eq!(
            decide_bouncers(&tm, 1_700).is_some(),
            decide_bouncers(&mirrored_twice, 1_700).is_some()
        );
    }
}
