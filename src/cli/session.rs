use anyhow::{bail, Result};
use clap::Parser;
use log::debug;
use std::io::{BufRead, Write};

use crate::cli::args::SessionLine;
use crate::cli::handlers::{dispatch, Flow, Output};
use crate::config::AppConfig;
use crate::store::HabitStore;

const PROMPT: &str = "habitweek> ";

/// Reads commands line by line until input ends or `quit` is entered.
///
/// A bad line prints its error and the session carries on; only I/O
/// failures end it early.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut HabitStore,
    config: &AppConfig,
    input: R,
    out: &mut Output<W>,
    interactive: bool,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            out.prompt(PROMPT)?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !interactive {
            out.line(format!("{}{}", PROMPT, line))?;
        }

        let tokens = match split_args(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                out.line(format!("  {}", err))?;
                continue;
            }
        };
        let command = match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                out.line(err.render().to_string().trim_end())?;
                continue;
            }
        };
        debug!("Session command: {:?}", command);

        match dispatch(store, config, out, command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => out.line(format!("  ✗ {}", err))?,
        }
    }
    Ok(())
}

/// Splits a line on whitespace, keeping single- or double-quoted text together.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unclosed {} quote", q);
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}
