//! CLI entry point: reads machines or certificates from stdin, one per
//! line, and dispatches each to a token-bounded worker pool, matching the
//! original program's buffered-channel semaphore one to one.

use std::io::{BufRead, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::sync_channel;

use bouncer_decider::cert::{FullCert, ShortCert};
use bouncer_decider::config::{Config, PrintMode};
use bouncer_decider::decider::decide_machine;
use bouncer_decider::error::RuntimeFault;
use bouncer_decider::machine::TuringMachine;
use bouncer_decider::rules::find_rules;
use bouncer_decider::verifier::verify_bouncer;

use clap::Parser;

/// A non-halting decider and verifier for bouncer-pattern Turing machines.
#[derive(Parser, Debug)]
#[command(name = "bouncer")]
struct Cli {
    /// Treat input lines as full certificates (JSON) to verify.
    #[arg(long = "fc")]
    full_cert: bool,

    /// Treat input lines as short certificates (JSON); rules are
    /// re-synthesized before verifying.
    #[arg(long = "sc")]
    short_cert: bool,

    /// Step limit for scan mode.
    #[arg(short = 'n', default_value_t = 10_000)]
    step_limit: u64,

    /// Only attempt at the exact step limit; skip the `100, 1000, ...`
    /// probing schedule. Intended for pre-filtered input.
    #[arg(short = 'x')]
    exact: bool,

    /// What to print for a successful certificate: 0 machine text, 1 short
    /// cert JSON, 2 full cert JSON, 3 short cert JSON pretty, 4 full cert
    /// JSON pretty.
    #[arg(long = "pm", default_value_t = 0)]
    print_mode: u8,

    /// Worker pool size; 0 means host parallelism.
    #[arg(long = "cores", default_value_t = 0)]
    cores: usize,
}

/// The spec documents `-fc`, `-sc`, `-pm` and `-cores` as single-dash long
/// flags (following the original Go program's `flag` package, where every
/// flag is single-dash regardless of name length). `clap` only recognizes
/// multi-character flags with a double dash, so the single-dash spellings
/// are rewritten to their double-dash equivalents before parsing; `-n` and
/// `-x` are genuine single-character short flags and pass through as-is.
fn normalize_args(args: impl Iterator<Item = String>) -> Vec<String> {
    const LONG_FLAGS: [&str; 4] = ["-fc", "-sc", "-pm", "-cores"];
    args.map(|arg| {
        let is_long_flag = LONG_FLAGS
            .iter()
            .any(|flag| arg == *flag || arg.starts_with(&format!("{flag}=")));
        if is_long_flag && !arg.starts_with("--") {
            format!("-{arg}")
        } else {
            arg
        }
    })
    .collect()
}

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args()));
    let Some(print_mode) = PrintMode::from_flag(cli.print_mode) else {
        eprintln!("invalid -pm value {}, expected 0..4", cli.print_mode);
        std::process::exit(1);
    };

    let config = Config::builder()
        .step_limit_scan(cli.step_limit)
        .run_schedule_probe(!cli.exact)
        .print_mode(print_mode)
        .cores(cli.cores)
        .build();

    let stdin = std::io::stdin();
    let lines = stdin.lock().lines();

    if cli.full_cert {
        run_pool(lines, config.cores(), move |text| verify_full_cert_line(&text, print_mode));
    } else if cli.short_cert {
        run_pool(lines, config.cores(), move |text| verify_short_cert_line(&text, print_mode));
    } else {
        let step_limit = config.step_limit_scan();
        let probe = config.run_schedule_probe();
        run_pool(lines, config.cores(), move |text| scan_line(&text, step_limit, probe, print_mode));
    }
}

/// Dispatches each stdin line to its own thread, bounded by a token pool of
/// `cores` permits handed out through a `sync_channel`; a thread returns its
/// token when it finishes, including after a caught panic.
fn run_pool<I, F>(lines: I, cores: usize, work: F)
where
    I: Iterator<Item = std::io::Result<String>>,
    F: Fn(String) + Send + Sync + 'static + Clone,
{
    let (tokens_tx, tokens_rx) = sync_channel::<()>(cores);
    for _ in 0..cores {
        let _ = tokens_tx.try_send(());
    }
    let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();

    let mut spawned = 0usize;
    for line in lines {
        let text = match line {
            Ok(text) => text,
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            continue;
        }

        tokens_rx.recv().expect("token pool closed unexpectedly");
        let work = work.clone();
        let tokens_tx = tokens_tx.clone();
        let done_tx = done_tx.clone();
        spawned += 1;
        std::thread::spawn(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| work(text.clone())));
            if let Err(panic) = outcome {
                let message = panic_message(&panic);
                let fault = RuntimeFault {
                    input: text,
                    message,
                };
                eprintln!("{fault}");
            }
            let _ = tokens_tx.try_send(());
            let _ = done_tx.send(());
        });
    }

    for _ in 0..spawned {
        let _ = done_rx.recv();
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn scan_line(text: &str, step_limit: u64, probe: bool, print_mode: PrintMode) {
    let tm = match TuringMachine::parse(text) {
        Ok(tm) => tm,
        Err(err) => {
            eprintln!("Unable to parse {text:?}\n{err}");
            return;
        }
    };
    if let Some(cert) = decide_machine(&tm, step_limit, !probe) {
        print_cert(&cert, print_mode);
    }
}

fn verify_full_cert_line(text: &str, print_mode: PrintMode) {
    let cert: FullCert = match serde_json::from_str(text) {
        Ok(cert) => cert,
        Err(err) => {
            eprintln!("Unable to parse {text:?}\n{err}");
            return;
        }
    };
    if verify_bouncer(&cert) {
        print_cert(&cert, print_mode);
    }
}

fn verify_short_cert_line(text: &str, print_mode: PrintMode) {
    let short: ShortCert = match serde_json::from_str(text) {
        Ok(cert) => cert,
        Err(err) => {
            eprintln!("Unable to parse {text:?}\n{err}");
            return;
        }
    };
    let tm = if short.mirror {
        short.tm.mirror()
    } else {
        short.tm.clone()
    };
    let Some(rules) = find_rules(&tm, &short.start, short.cycle_steps) else {
        return;
    };
    let cert = FullCert {
        tm: short.tm,
        mirror: short.mirror,
        start: short.start,
        rules,
    };
    if verify_bouncer(&cert) {
        print_cert(&cert, print_mode);
    }
}

/// Writes one atomic line to stdout per the selected [`PrintMode`], mirroring
/// the original's `fmt.Println` (line-buffered, one call per line).
fn print_cert(cert: &FullCert, print_mode: PrintMode) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let line = match print_mode {
        PrintMode::MachineText => cert.tm.to_string(),
        PrintMode::ShortCertJson => serde_json::to_string(&cert.to_short()).unwrap(),
        PrintMode::FullCertJson => serde_json::to_string(cert).unwrap(),
        PrintMode::ShortCertJsonPretty => serde_json::to_string_pretty(&cert.to_short()).unwrap(),
        PrintMode::FullCertJsonPretty => serde_json::to_string_pretty(cert).unwrap(),
    };
    let _ = writeln!(handle, "{line}");
}
