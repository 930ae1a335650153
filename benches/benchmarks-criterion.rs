#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

use bouncer_decider::decider::{decide_bouncers, decide_machine};
use bouncer_decider::machine::TuringMachine;
use bouncer_decider::records::find_records;
use bouncer_decider::simulator::run_tm;
use bouncer_decider::tape::PerDirection;

const WARM_UP_TIME_MS: u64 = 500;
const MEASUREMENT_TIME_MS: u64 = 2000;

const BOUNCER_1: &str = "1RB1RD_1LC1LE_1RA0LB_0RA---_0RC0RB";
const BOUNCER_2: &str = "1LB---_0LC1LD_0RD1LC_1RE0LA_1LA0RE";
const BOUNCER_3: &str = "1RB1LC_0LA0RB_1RD1LE_0RB1RC_---0LB";

criterion_group!(
    benches,
    benchmark_run_tm,
    benchmark_find_records,
    benchmark_decide_bouncers,
    benchmark_decide_machine_scan,
);
criterion_main!(benches);

fn benchmark_run_tm(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench run_tm");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.measurement_time(Duration::from_millis(MEASUREMENT_TIME_MS));

    let tm = TuringMachine::parse(BOUNCER_1).unwrap();
    group.bench_function("10k steps from blank tape", |b| {
        b.iter(|| {
            run_tm(
                &tm,
                bouncer_decider::machine::State(0),
                0,
                &[0],
                10_000,
                PerDirection { l: true, r: true },
            )
        })
    });
    group.finish();
}

fn benchmark_find_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench find_records");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.measurement_time(Duration::from_millis(MEASUREMENT_TIME_MS));

    for (name, text) in [("bouncer 1", BOUNCER_1), ("bouncer 2", BOUNCER_2)] {
        let tm = TuringMachine::parse(text).unwrap();
        group.bench_function(name, |b| b.iter(|| find_records(&tm, 10_000)));
    }
    group.finish();
}

fn benchmark_decide_bouncers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench decide_bouncers");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(20);

    for (name, text) in [
        ("bouncer 1", BOUNCER_1),
        ("bouncer 2", BOUNCER_2),
        ("bouncer 3", BOUNCER_3),
    ] {
        let tm = TuringMachine::parse(text).unwrap();
        group.bench_function(name, |b| b.iter(|| decide_bouncers(&tm, 10_000)));
    }
    group.finish();
}

fn benchmark_decide_machine_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench decide_machine scan schedule");
    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(20);

    let tm = TuringMachine::parse(BOUNCER_1).unwrap();
    group.bench_function("probing schedule up to 10k", |b| {
        b.iter(|| decide_machine(&tm, 10_000, false))
    });
    group.finish();
}
