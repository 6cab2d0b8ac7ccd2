//! Interactive console.
//!
//! This module runs the command loop:
//! - reading one line at a time from any `BufRead`
//! - parsing it into a `Command`
//! - applying it to the `Session` and writing the result to any `Write`
//!
//! Every engine, file or parse error is reported and the loop continues.
//! End of input behaves like `bio exit`.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{debug, warn};

use crate::command::{parse_command, Command};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::fasta::read_sequence_file;
use crate::report;
use crate::session::{parse_depth, Session};

/// The console controller.
pub struct Console<R, W> {
    /// Command source
    input: R,
    /// Where results are written
    output: W,
    /// The indexing session
    session: Session,
    /// Output wrap width
    wrap_width: usize,
    /// Show the banner and prompt
    interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates an interactive console over `input` and `output`.
    pub fn new(input: R, output: W, config: &EngineConfig) -> Self {
        Self {
            input,
            output,
            session: Session::new(config),
            wrap_width: config.wrap_width,
            interactive: true,
        }
    }

    /// Suppresses the banner and the prompt (for scripts).
    pub fn quiet(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the loop until `bio exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        if self.interactive {
            writeln!(self.output, "{}", report::banner())?;
        }

        let mut buffer = Vec::new();
        loop {
            if self.interactive {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            buffer.clear();
            if self.input.read_until(b'\n', &mut buffer)? == 0 {
                self.execute(Command::Exit)?;
                break;
            }
            let line = String::from_utf8_lossy(&buffer);

            let keep_going = match parse_command(&line) {
                Ok(command) => self.execute(command)?,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Applies one command.
    ///
    /// Returns `false` once the session has ended.
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        debug!("Executing {:?} (session {})", command, self.session.state().name());
        let width = self.wrap_width;

        match command {
            Command::Empty => {}
            Command::Help => {
                writeln!(self.output, "{}", report::help_text())?;
            }
            Command::Start(raw) => {
                match parse_depth(&raw).and_then(|depth| self.session.start(depth)) {
                    Ok(trie) => writeln!(self.output, "{}", report::started(trie))?,
                    Err(e) => self.report_error(&e)?,
                }
            }
            Command::Read(path) => {
                let depth = match self.session.trie() {
                    Ok(trie) => trie.depth(),
                    Err(e) => return self.report_error(&e).map(|_| true),
                };
                let records = match read_sequence_file(&path) {
                    Ok(records) => records,
                    Err(e) => {
                        warn!("Could not read '{}': {}", path.display(), e);
                        writeln!(self.output, "Error: {}", e)?;
                        return Ok(true);
                    }
                };

                for record in &records {
                    match self.session.index(&record.data) {
                        Ok(result) if result.is_too_short(depth) => {
                            let e = EngineError::SequenceTooShort {
                                length: result.length,
                                depth,
                            };
                            writeln!(self.output, "-> '{}': {}.", record.id, e)?;
                        }
                        Ok(result) => {
                            writeln!(self.output, "{}", report::indexed(&record.id, &result))?
                        }
                        Err(e) => {
                            self.report_error(&e)?;
                            break;
                        }
                    }
                }
            }
            Command::Search(gene) => {
                let gene = gene.to_ascii_uppercase();
                match self.session.search(&gene) {
                    Ok(positions) => {
                        writeln!(self.output, "{}", report::occurrences(&gene, positions, width))?
                    }
                    Err(EngineError::NotFound) => {
                        writeln!(self.output, "-> Gene '{}' not found.", gene)?
                    }
                    Err(e) => self.report_error(&e)?,
                }
            }
            Command::All => match self.session.all() {
                Ok(hits) => writeln!(self.output, "{}", report::all_genes(&hits, width))?,
                Err(EngineError::NotFound) => writeln!(self.output, "-> No genes indexed yet.")?,
                Err(e) => self.report_error(&e)?,
            },
            Command::Extremum(kind) => match self.session.extremum(kind) {
                Ok(result) => writeln!(self.output, "{}", report::extremum(&result, width))?,
                Err(EngineError::NotFound) => writeln!(self.output, "-> No genes indexed yet.")?,
                Err(e) => self.report_error(&e)?,
            },
            Command::Exit => {
                if let Some(stats) = self.session.teardown() {
                    writeln!(self.output, "{}", report::released(&stats))?;
                }
                writeln!(self.output, "Exiting...")?;
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn report_error(&mut self, error: &EngineError) -> Result<()> {
        warn!("{}", error);
        writeln!(self.output, "Error: {}", error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> String {
        let mut console = Console::new(script.as_bytes(), Vec::new(), &EngineConfig::default()).quiet();
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn sequence_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_full_session() {
        let file = sequence_file("ACGTACGT\n");
        let script = format!(
            "bio start 2\nbio read {}\nbio search AC\nbio search ta\nbio search AA\nbio max\nbio min\nbio exit\n",
            file.path().display()
        );
        let out = run_script(&script);

        assert!(out.contains("-> Tree created with depth 2 (16 possible genes)."));
        assert!(out.contains("8 bases read, 7 genes indexed."));
        assert!(out.contains("AC: 2 occurrences at 0, 4"));
        assert!(out.contains("TA: 1 occurrence at 3"));
        assert!(out.contains("-> Gene 'AA' not found."));
        assert!(out.contains("-> Most frequent: 3 genes with 2 occurrences:"));
        assert!(out.contains("CG: 2 occurrences at 1, 5"));
        assert!(out.contains("GT: 2 occurrences at 2, 6"));
        assert!(out.contains("-> Least frequent: 1 gene with 1 occurrence:"));
        assert!(out.contains("-> Released 21 nodes and 7 offsets."));
        assert!(out.trim_end().ends_with("Exiting..."));
    }

    #[test]
    fn test_all_lists_genes_in_order() {
        let file = sequence_file("TTGACA");
        let script = format!("bio start 2\nbio read {}\nbio all\n", file.path().display());
        let out = run_script(&script);

        let listed: Vec<&str> = out
            .lines()
            .filter_map(|l| l.split_once(": ").map(|(gene, _)| gene))
            .filter(|g| g.len() == 2)
            .collect();
        assert_eq!(listed, vec!["AC", "CA", "GA", "TG", "TT"]);
        assert!(out.contains("-> 5 genes found:"));
    }

    #[test]
    fn test_queries_before_start() {
        let out = run_script("bio search AC\nbio all\nbio read whatever.txt\n");
        assert_eq!(
            out.matches("Error: No tree has been created yet").count(),
            3,
            "{}",
            out
        );
    }

    #[test]
    fn test_second_start_rejected() {
        let out = run_script("bio start 2\nbio start 3\n");
        assert!(out.contains("Error: A tree already exists for this session"));
        assert!(out.contains("-> Released 21 nodes and 0 offsets."));
    }

    #[test]
    fn test_invalid_depth() {
        let out = run_script("bio start abc\nbio start 0\nbio start -1\nbio start 99\n");
        assert!(out.contains("Invalid depth 'abc'"));
        assert!(out.contains("Invalid depth '0'"));
        assert!(out.contains("Invalid depth '-1'"));
        assert!(out.contains("Depth 99 exceeds the configured maximum of 10"));
    }

    #[test]
    fn test_unrecognized_lines() {
        let out = run_script("hello\nbio dance\nbio start\n\nbio help\n");
        assert!(out.contains("Unrecognized command. Use 'bio <action>'."));
        assert!(out.contains("Unknown action 'dance'."));
        assert!(out.contains("Missing argument: use 'bio start <m>'."));
        assert!(out.contains("Commands:"));
    }

    #[test]
    fn test_short_sequence_and_empty_index() {
        let file = sequence_file("ACG\n");
        let script = format!(
            "bio start 5\nbio read {}\nbio all\nbio max\n",
            file.path().display()
        );
        let out = run_script(&script);
        assert!(out.contains("Sequence too short (length 3, m=5)."));
        assert_eq!(out.matches("-> No genes indexed yet.").count(), 2);
    }

    #[test]
    fn test_invalid_symbols_are_skipped() {
        let file = sequence_file("ACNGT\n");
        let script = format!("bio start 2\nbio read {}\nbio all\n", file.path().display());
        let out = run_script(&script);
        assert!(out.contains("2 genes indexed, 2 windows skipped (invalid symbols)."));
        assert!(out.contains("AC: 1 occurrence at 0"));
        assert!(out.contains("GT: 1 occurrence at 3"));
    }

    #[test]
    fn test_missing_file_keeps_session() {
        let out = run_script("bio start 2\nbio read /no/such/file.txt\nbio search AC\n");
        assert!(out.contains("Error: Failed to open file"));
        assert!(out.contains("-> Gene 'AC' not found."));
    }

    #[test]
    fn test_end_of_input_tears_down() {
        let mut console =
            Console::new("bio start 1\n".as_bytes(), Vec::new(), &EngineConfig::default()).quiet();
        console.run().unwrap();
        assert_eq!(console.session().state().name(), "destroyed");
    }

    #[test]
    fn test_interactive_banner_and_prompt() {
        let mut console = Console::new("bio exit\n".as_bytes(), Vec::new(), &EngineConfig::default());
        console.run().unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("====="));
        assert!(out.contains("> "));
        assert!(out.contains("Exiting..."));
    }
}
