//! Line-based prompter for interactive runs.

use std::io::{self, BufRead, Write};

use releaseman_core::{CoreError, CoreResult, Prompter};

/// Asks questions on `output` and reads answers line by line from `input`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` and reads one line. `None` on end of input.
    fn read_answer(&mut self, prompt: &str) -> CoreResult<Option<String>> {
        write!(self.output, "{prompt}").map_err(prompt_err)?;
        self.output.flush().map_err(prompt_err)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(prompt_err)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn prompt_err(e: io::Error) -> CoreError {
    CoreError::Prompt(e.to_string())
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> CoreResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.read_answer(&format!("{question} {hint}: "))? else {
                return Ok(default);
            };
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.").map_err(prompt_err)?,
            }
        }
    }

    fn ask(&mut self, question: &str) -> CoreResult<String> {
        Ok(self
            .read_answer(&format!("{question}: "))?
            .unwrap_or_default())
    }
}
