//! Terminal account picker.

use colored::Colorize;
use speckle_core::account::{Account, AccountPicker};
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

/// Prompts for an account on the terminal.
///
/// An empty answer, an out-of-range number or end of input dismisses the
/// selection.
pub struct TerminalPicker {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl TerminalPicker {
    pub fn stdio() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stderr())
    }

    pub fn with_io(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Box::new(input)),
            output: Mutex::new(Box::new(output)),
        }
    }

    fn prompt(&self, accounts: &[Account]) -> io::Result<Option<usize>> {
        let mut output = self.output.lock().unwrap_or_else(|p| p.into_inner());
        if accounts.is_empty() {
            writeln!(output, "{}", "No Speckle accounts found on this machine.".yellow())?;
            return Ok(None);
        }

        writeln!(output, "{}", "Select a Speckle account:".bold())?;
        for (i, account) in accounts.iter().enumerate() {
            writeln!(
                output,
                "  {}) {} {}",
                i + 1,
                account.email,
                format!("({})", account.server_name).as_str().dimmed()
            )?;
        }
        write!(output, "Account [1-{}, empty to cancel]: ", accounts.len())?;
        output.flush()?;

        let mut line = String::new();
        self.input
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .read_line(&mut line)?;
        Ok(parse_choice(&line, accounts.len()))
    }
}

impl AccountPicker for TerminalPicker {
    fn pick(&self, accounts: &[Account]) -> Option<Account> {
        match self.prompt(accounts) {
            Ok(choice) => choice.and_then(|i| accounts.get(i).cloned()),
            Err(e) => {
                tracing::warn!(error = %e, "Account prompt failed");
                None
            }
        }
    }
}

/// Parses a 1-based menu answer into an index.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}
