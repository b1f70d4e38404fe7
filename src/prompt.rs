//! Interactive confirmation as an injected capability.
//!
//! The reconciliation steps never talk to a terminal directly; they take a
//! [`Confirmer`] so the logic is testable without one. The real
//! implementation reads `/dev/tty`, which keeps prompting working when the
//! installer itself is piped into a shell. Without any terminal the default
//! answer is used and the auto-choice is echoed so the user can see what a
//! non-interactive run decided.

use std::io::{BufRead, BufReader, Write};

/// A yes/no question answerer.
pub trait Confirmer {
    /// Ask `question`, returning the user's answer or `default` when no
    /// answer is available.
    fn confirm(&self, question: &str, default: bool) -> bool;
}

/// Interactive confirmer backed by the controlling terminal.
#[derive(Debug, Default)]
pub struct TtyConfirmer;

impl Confirmer for TtyConfirmer {
    fn confirm(&self, question: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        match read_tty_line(question, hint) {
            Some(answer) => {
                let answer = answer.trim().to_lowercase();
                if answer.is_empty() {
                    default
                } else {
                    matches!(answer.as_str(), "y" | "yes")
                }
            }
            None => {
                println!("{question} {hint} (auto: {})", if default { "y" } else { "n" });
                tracing::info!(question, default, "no terminal available, using default");
                default
            }
        }
    }
}

/// Prompt on stdout and read one line from the controlling terminal.
#[cfg(unix)]
fn read_tty_line(question: &str, hint: &str) -> Option<String> {
    let tty = std::fs::File::open("/dev/tty").ok()?;

    print!("{question} {hint} ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    BufReader::new(tty).read_line(&mut line).ok()?;
    Some(line)
}

#[cfg(not(unix))]
fn read_tty_line(question: &str, hint: &str) -> Option<String> {
    use std::io::IsTerminal;

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return None;
    }

    print!("{question} {hint} ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    stdin.lock().read_line(&mut line).ok()?;
    Some(line)
}

/// Non-interactive confirmer that always returns the caller's default.
/// Used for `--yes` runs and anywhere prompting is unwanted.
#[derive(Debug, Default)]
pub struct AssumeDefault;

impl Confirmer for AssumeDefault {
    fn confirm(&self, _question: &str, default: bool) -> bool {
        default
    }
}
