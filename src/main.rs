use std::env;
use std::io::{self, BufRead};
use std::process;

use anyhow::{bail, Context, Result};

use regex_nfa::compile;

// Usage: echo <input_text> | regex-nfa -E <pattern>
//
// Prints the lines that the pattern accepts in full and exits 0 if there
// was at least one, 1 otherwise.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    if args.next().as_deref() != Some("-E") {
        bail!("expected first argument to be '-E'");
    }
    let pattern = match args.next() {
        Some(pattern) => pattern,
        None => bail!("expected a pattern after '-E'"),
    };

    let compiled =
        compile(&pattern).with_context(|| format!("cannot compile pattern '{pattern}'"))?;

    let mut matched = false;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        if compiled.matches(&line) {
            println!("{line}");
            matched = true;
        }
    }

    process::exit(if matched { 0 } else { 1 })
}
