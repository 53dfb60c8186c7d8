//! Terminal output for fabctl.
//!
//! Progress and failures go to stderr so `fabctl status -o json` keeps a clean
//! stdout. Every line starts with a mark that tells its tone.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use fabctl_lib::config::Role;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Kind of line being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
  Step,
  Done,
  Failure,
  Warning,
  Note,
}

impl Tone {
  fn mark(self) -> &'static str {
    match self {
      Tone::Step => "→",
      Tone::Done => "✓",
      Tone::Failure => "✗",
      Tone::Warning => "⚠",
      Tone::Note => "•",
    }
  }

  fn to_stderr(self) -> bool {
    matches!(self, Tone::Step | Tone::Failure | Tone::Warning)
  }
}

fn emit(tone: Tone, message: &str) {
  let stream = if tone.to_stderr() { Stream::Stderr } else { Stream::Stdout };
  let mark = tone.mark();
  let mark = match tone {
    Tone::Step => mark.if_supports_color(stream, |s| s.cyan()).to_string(),
    Tone::Done => mark.if_supports_color(stream, |s| s.green()).to_string(),
    Tone::Failure => mark.if_supports_color(stream, |s| s.red()).to_string(),
    Tone::Warning => mark.if_supports_color(stream, |s| s.yellow()).to_string(),
    Tone::Note => mark.if_supports_color(stream, |s| s.blue()).to_string(),
  };
  let body = match tone {
    Tone::Step => message.if_supports_color(stream, |s| s.bold()).to_string(),
    Tone::Failure => message.if_supports_color(stream, |s| s.red()).to_string(),
    Tone::Warning => message.if_supports_color(stream, |s| s.yellow()).to_string(),
    Tone::Done | Tone::Note => message.to_string(),
  };

  if tone.to_stderr() {
    eprintln!("{} {}", mark, body);
  } else {
    println!("{} {}", mark, body);
  }
}

pub fn print_step(message: &str) {
  emit(Tone::Step, message);
}

pub fn print_success(message: &str) {
  emit(Tone::Done, message);
}

pub fn print_error(message: &str) {
  emit(Tone::Failure, message);
}

pub fn print_warning(message: &str) {
  emit(Tone::Warning, message);
}

pub fn print_info(message: &str) {
  emit(Tone::Note, message);
}

/// Indented `label: value` line under a step or result.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// One row of the `status` listing.
pub fn container_row(role: Role, name: &str, running: bool) -> String {
  let (mark, state) = if running {
    (Tone::Done.mark().if_supports_color(Stream::Stdout, |s| s.green()).to_string(), "running")
  } else {
    (Tone::Failure.mark().if_supports_color(Stream::Stdout, |s| s.red()).to_string(), "stopped")
  };
  format!("  {} {:<6} {} ({})", mark, role.as_str(), name, state)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Wall time of a deploy run: `850ms`, `12.3s` or `2m 05s`.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  if secs >= 60 {
    format!("{}m {:02}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{:.1}s", duration.as_secs_f64())
  } else {
    format!("{}ms", duration.subsec_millis())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn durations() {
    assert_eq!(format_duration(Duration::from_millis(850)), "850ms");
    assert_eq!(format_duration(Duration::from_millis(12_340)), "12.3s");
    assert_eq!(format_duration(Duration::from_secs(125)), "2m 05s");
  }

  #[test]
  fn output_format_json() {
    assert!(OutputFormat::Json.is_json());
    assert!(!OutputFormat::default().is_json());
  }

  #[test]
  fn progress_goes_to_stderr() {
    assert!(Tone::Step.to_stderr());
    assert!(Tone::Failure.to_stderr());
    assert!(Tone::Warning.to_stderr());
    assert!(!Tone::Done.to_stderr());
    assert!(!Tone::Note.to_stderr());
  }

  #[test]
  fn container_rows() {
    let row = container_row(Role::Peer, "peer0", true);
    assert!(row.contains("peer   peer0 (running)"));
    let row = container_row(Role::Client, "cli", false);
    assert!(row.contains("client cli (stopped)"));
  }
}
