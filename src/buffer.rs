//! Buffer size discovery: smoothing the two direction-run sequences until
//! they alternate identically, and re-coloring a history-tagged tape into
//! equivalence classes once the buffer width is known.

use hashbrown::HashMap;

use crate::tape::{HalfTape, TapeSymbol};

/// Collapses adjacent run-lengths into wider "smoothed" runs wherever a run
/// is short enough to be absorbed (`<= buf`), folding its neighbors
/// together. Used repeatedly by [`find_buffer_size`] while searching for a
/// buffer width at which both sequences' direction pattern lines up.
pub fn smoothen_sequence(mut seq: Vec<i64>, buf: i64) -> Vec<i64> {
    let mut i = 0usize;
    let mut j = 1usize;
    let mut k = 2usize;
    let mut res = Vec::new();
    while k < seq.len() {
        if seq[j] <= buf {
            seq[i] = seq[i] - seq[j] + seq[k];
            j = k + 1;
            k += 2;
        } else {
            res.push(seq[i]);
            i = j;
            j = k;
            k += 1;
        }
    }
    res.push(seq[i]);
    if j < seq.len() {
        res.push(seq[j]);
    }
    res
}

/// True if the two sequences have the same length and disagree everywhere
/// except their first and last entries (the two sentinel/trailing slots).
pub fn check_direction_match(seq1: &[i64], seq2: &[i64]) -> bool {
    if seq1.len() != seq2.len() {
        return false;
    }
    for i in 1..seq1.len().saturating_sub(1) {
        if seq1[i] == seq2[i] {
            return false;
        }
    }
    true
}

/// Searches for the smallest buffer width at which smoothing both direction
/// sequences makes them alternate in lockstep, capping the search so a
/// malformed pair of sequences can't loop forever.
pub fn find_buffer_size(sequence1: &[i64], sequence2: &[i64]) -> Option<i64> {
    let cap = (sequence1.len() + sequence2.len()) as i64 + 1;
    let mut seq1 = sequence1.to_vec();
    let mut seq2 = sequence2.to_vec();
    let mut buf_size = 0i64;
    while !check_direction_match(&seq1, &seq2) {
        buf_size += 1;
        if buf_size > cap {
            return None;
        }
        seq1 = smoothen_sequence(seq1, buf_size);
        seq2 = smoothen_sequence(seq2, buf_size);
    }
    Some(buf_size)
}

/// Re-colors a history-tagged half-tape into color symbols: two cells get
/// the same color exactly when the `n`-wide window of history around them
/// (padded with empty history past either end) is identical. `n` is the
/// growth between the two context tapes being compared.
pub fn find_colors(mut tape: HalfTape, n: i64) -> HalfTape {
    let len = tape.len() as i64;
    let full_len = (len + 2 * n).max(0) as usize;
    let mut full_history: Vec<Vec<crate::machine::HeadConfig>> = vec![Vec::new(); full_len];
    let mut storage = HalfTape::new();
    let mut pos = n;

    while let Some(elem) = tape.pop() {
        if pos >= 0 && (pos as usize) < full_history.len() {
            full_history[pos as usize] = elem.history().to_vec();
        }
        pos += 1;
        storage.push(TapeSymbol::Base(elem.base()));
    }

    let mut pre_color_map: HashMap<String, i64> = HashMap::new();
    let mut last_pre_color = 0i64;
    let mut full_pre_color = vec![0i64; full_history.len()];
    for (i, history) in full_history.iter().enumerate() {
        let key = format!("{history:?}");
        let pre_color = *pre_color_map.entry(key).or_insert_with(|| {
            last_pre_color += 1;
            last_pre_color
        });
        full_pre_color[i] = pre_color;
    }

    let mut color_map: HashMap<String, i64> = HashMap::new();
    let mut last_color = 0i64;
    while let Some(elem) = storage.pop() {
        pos -= 1;
        let lo = (pos - n).max(0) as usize;
        let hi = ((pos + n) as usize).min(full_pre_color.len());
        let window = &full_pre_color[lo..hi];
        let key = format!("{window:?}");
        let color = *color_map.entry(key).or_insert_with(|| {
            last_color += 1;
            last_color
        });
        tape.push(TapeSymbol::Color(crate::tape::ColorSymbol {
            color,
            base: elem.base(),
        }));
    }
    tape
}
