//! Interactive prompts.
//!
//! All prompts write to stderr and read from stdin, and refuse to run when
//! either is not a terminal so scripted use fails loudly instead of hanging.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Result, bail};
use fabctl_lib::runtime::Confirm;

use crate::output::print_error;

pub fn confirm(message: &str, force: bool) -> io::Result<bool> {
  if force {
    return Ok(true);
  }

  if !is_interactive() {
    return Err(io::Error::other(
      "cannot prompt for confirmation in non-interactive mode; use --yes to proceed",
    ));
  }

  write!(io::stderr(), "{} [y/N] ", message)?;
  io::stderr().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;

  Ok(matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Start-prompt capability handed to the orchestrators.
pub struct StdinConfirm {
  pub force: bool,
}

impl Confirm for StdinConfirm {
  fn confirm(&self, message: &str) -> io::Result<bool> {
    confirm(message, self.force)
  }
}

/// Numbered single choice. Re-asks until a listed number is entered.
pub fn select(title: &str, items: &[&str]) -> Result<usize> {
  require_interactive(title)?;
  if items.is_empty() {
    bail!("nothing to choose from: {}", title);
  }

  loop {
    print_menu(title, items)?;
    let line = read_line()?;
    match parse_choice(&line, items.len()) {
      Some(index) => return Ok(index),
      None => print_error("Invalid number."),
    }
  }
}

/// Numbered multiple choice, space separated. Unknown numbers are ignored.
pub fn select_many(title: &str, items: &[&str]) -> Result<Vec<usize>> {
  require_interactive(title)?;
  print_menu(title, items)?;
  let line = read_line()?;
  Ok(parse_choices(&line, items.len()))
}

/// Free-text answer; re-asks while empty.
pub fn input(message: &str) -> Result<String> {
  require_interactive(message)?;
  loop {
    eprintln!("{}", message);
    write!(io::stderr(), "> ")?;
    io::stderr().flush()?;
    let line = read_line()?;
    if !line.is_empty() {
      return Ok(line);
    }
  }
}

fn is_interactive() -> bool {
  io::stdin().is_terminal() && io::stderr().is_terminal()
}

fn require_interactive(what: &str) -> Result<()> {
  if !is_interactive() {
    bail!("cannot prompt in non-interactive mode ({}); pass it as an argument", what);
  }
  Ok(())
}

fn print_menu(title: &str, items: &[&str]) -> Result<()> {
  let mut err = io::stderr();
  writeln!(err, "{}", title)?;
  for (i, item) in items.iter().enumerate() {
    writeln!(err, "[{}] {}", i + 1, item)?;
  }
  write!(err, "> ")?;
  err.flush()?;
  Ok(())
}

fn read_line() -> Result<String> {
  let mut line = String::new();
  if io::stdin().lock().read_line(&mut line)? == 0 {
    bail!("input closed");
  }
  Ok(line.trim().to_string())
}

/// 1-based menu number to 0-based index.
fn parse_choice(line: &str, len: usize) -> Option<usize> {
  let n: usize = line.trim().parse().ok()?;
  (1..=len).contains(&n).then(|| n - 1)
}

fn parse_choices(line: &str, len: usize) -> Vec<usize> {
  let mut picked: Vec<usize> = line.split_whitespace().filter_map(|t| parse_choice(t, len)).collect();
  picked.sort_unstable();
  picked.dedup();
  picked
}
