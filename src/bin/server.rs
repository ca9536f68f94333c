//! Coaching server binary.
//! Run with: cargo run --bin fitlife-server

use std::process::ExitCode;

use fitlife_coach::startup;

fn main() -> ExitCode {
    startup::run()
}
