//! Interactive terminal session.
//!
//! Every input line is replayed as keystrokes on an [`EditBuffer`]; the
//! expression line and the result line are printed after each one. Lines
//! starting with `:` are session commands.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::calculator::{ERROR_LABEL, copy_to_clipboard, is_sentinel};
use crate::config::Config;
use crate::editor::{EditBuffer, Key};

const HELP: &str = "\
keys: 0-9 . + - * / ^ ( )   r or √: square root
      = commit   b: backspace   c: clear   < >: move cursor
commands: :cursor N   :copy   :clear   :help   :quit";

enum Flow {
    Continue,
    Quit,
}

pub struct Repl<'a> {
    config: &'a Config,
    buffer: EditBuffer,
}

impl<'a> Repl<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            buffer: EditBuffer::new(),
        }
    }

    /// Run until end of input or `:quit`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
        interactive: bool,
    ) -> Result<()> {
        if interactive {
            writeln!(out, "{HELP}")?;
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            if let Flow::Quit = self.handle_line(&line, &mut out)? {
                break;
            }
            if interactive {
                write!(out, "{}", self.config.prompt)?;
                out.flush()?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix(':') {
            return self.handle_command(command, out);
        }

        let mut committed = false;
        for key in line.chars().filter_map(Key::from_char) {
            if let Some(outcome) = self.buffer.apply(key) {
                committed = true;
                info!(result = %outcome.display_result, "committed");
                if self.config.copy_on_commit
                    && let Some(text) = outcome.clipboard.as_deref()
                    && let Err(e) = copy_to_clipboard(text)
                {
                    warn!(%e, "could not copy result");
                }
            }
        }

        self.render(out, committed)?;
        Ok(Flow::Continue)
    }

    fn handle_command<W: Write>(&mut self, command: &str, out: &mut W) -> Result<Flow> {
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("q" | "quit"), _) => return Ok(Flow::Quit),
            (Some("help"), _) => writeln!(out, "{HELP}")?,
            (Some("clear"), _) => {
                self.buffer.clear();
                self.render(out, false)?;
            }
            (Some("cursor"), Some(pos)) => match pos.parse::<usize>() {
                Ok(pos) => {
                    self.buffer.set_cursor(pos);
                    self.render(out, false)?;
                }
                Err(_) => writeln!(out, "invalid cursor position: {pos}")?,
            },
            (Some("copy"), _) => {
                let result = self.buffer.result_display();
                if result.is_empty() || result == ERROR_LABEL || is_sentinel(&result) {
                    writeln!(out, "nothing to copy")?;
                } else {
                    match copy_to_clipboard(&result) {
                        Ok(()) => writeln!(out, "copied {result}")?,
                        Err(e) => writeln!(out, "{e}")?,
                    }
                }
            }
            _ => writeln!(out, "unknown command :{command} (try :help)")?,
        }
        Ok(Flow::Continue)
    }

    fn render<W: Write>(&self, out: &mut W, committed: bool) -> Result<()> {
        writeln!(out, "{}", self.expression_with_cursor())?;
        if committed || self.config.show_preview {
            let result = self.buffer.result_display();
            if !result.is_empty() {
                writeln!(out, "= {result}")?;
            }
        }
        Ok(())
    }

    /// The expression line with `|` marking the cursor when it is not at
    /// the end.
    fn expression_with_cursor(&self) -> String {
        let text = self.buffer.text();
        if self.buffer.cursor() >= self.buffer.len() {
            return self.buffer.expression_display();
        }
        let mut marked = String::with_capacity(text.len() + 1);
        for (i, c) in text.chars().enumerate() {
            if i == self.buffer.cursor() {
                marked.push('|');
            }
            marked.push(c);
        }
        marked
    }
}
