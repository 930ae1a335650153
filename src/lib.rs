//! A non-halting decider for bouncer-pattern Turing machines: a certificate
//! discovery pipeline (records -> context -> buffer/color -> repeaters ->
//! rules) plus an independent verifier that mechanically rechecks any
//! certificate the pipeline produces.

pub mod buffer;
pub mod cert;
pub mod config;
pub mod context;
pub mod decider;
pub mod error;
pub mod machine;
pub mod records;
pub mod repeaters;
pub mod rules;
pub mod simulator;
pub mod tape;
pub mod toml;
pub mod utils;
pub mod verifier;
