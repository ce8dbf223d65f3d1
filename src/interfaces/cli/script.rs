//! Command scripts
//!
//! Line-oriented replay format for driving a scoreboard from a file or
//! stdin. Blank lines and `#` comments are skipped; double quotes keep a
//! team name with spaces together.
//!
//! ```text
//! start Mexico Canada
//! goal Mexico Canada away
//! undo Mexico Canada away
//! score Mexico Canada
//! summary
//! finish Mexico Canada
//! start "South Korea" Japan
//! ```

use super::CliError;
use crate::application::services::ScoreboardService;
use crate::domain::error::{Result as ScoreResult, ScoreboardError};
use crate::domain::key::MatchKeyGenerator;
use smallvec::SmallVec;
use std::io::{BufRead, Write};

type Tokens = SmallVec<[String; 4]>;

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Start { home: String, away: String },
    Finish { home: String, away: String },
    /// `side` stays a raw token: an unknown side is a rejected request, not a syntax error
    Goal { home: String, away: String, side: String },
    Undo { home: String, away: String, side: String },
    Score { home: String, away: String },
    Summary,
}

/// Outcome counts of a script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub executed: usize,
    pub rejected: usize,
}

/// Splits a line into tokens, honouring double quotes
fn tokenize(line: &str) -> Result<Tokens, String> {
    let mut tokens = Tokens::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                token.push(c);
            }
            if !closed {
                return Err("unterminated quote".to_string());
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

/// Parses one line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = tokenize(trimmed)?.into_iter();
    let verb = tokens.next().unwrap_or_default().to_ascii_lowercase();
    let args: Tokens = tokens.collect();

    let expect = |n: usize| -> Result<(), String> {
        if args.len() == n {
            Ok(())
        } else {
            Err(format!("'{}' expects {} argument(s), got {}", verb, n, args.len()))
        }
    };

    let command = match verb.as_str() {
        "start" => {
            expect(2)?;
            ScriptCommand::Start { home: args[0].clone(), away: args[1].clone() }
        }
        "finish" => {
            expect(2)?;
            ScriptCommand::Finish { home: args[0].clone(), away: args[1].clone() }
        }
        "goal" => {
            expect(3)?;
            ScriptCommand::Goal {
                home: args[0].clone(),
                away: args[1].clone(),
                side: args[2].clone(),
            }
        }
        "undo" => {
            expect(3)?;
            ScriptCommand::Undo {
                home: args[0].clone(),
                away: args[1].clone(),
                side: args[2].clone(),
            }
        }
        "score" => {
            expect(2)?;
            ScriptCommand::Score { home: args[0].clone(), away: args[1].clone() }
        }
        "summary" => {
            expect(0)?;
            ScriptCommand::Summary
        }
        other => return Err(format!("unknown command '{}'", other)),
    };

    Ok(Some(command))
}

/// Applies a command, returning the lines it prints
fn apply<G: MatchKeyGenerator>(
    board: &ScoreboardService<G>,
    command: &ScriptCommand,
) -> ScoreResult<Vec<String>> {
    match command {
        ScriptCommand::Start { home, away } => board.start_match(home, away).map(|_| Vec::new()),
        ScriptCommand::Finish { home, away } => board.finish_match(home, away).map(|_| Vec::new()),
        ScriptCommand::Goal { home, away, side } => board
            .update_score_by_token(home, away, side)
            .map(|_| Vec::new()),
        ScriptCommand::Undo { home, away, side } => board
            .adjust_score_by_token(home, away, side)
            .map(|_| Vec::new()),
        ScriptCommand::Score { home, away } => board.get_score(home, away).map(|s| vec![s]),
        ScriptCommand::Summary => Ok(board.get_summary()),
    }
}

/// Runs every line of `input` against `board`
///
/// Rejected operations are reported on `out` as `line N: <kind>: <message>`
/// and the run continues, unless `strict` is set.
///
/// # Errors
/// * `CliError::Syntax` - malformed line
/// * `CliError::Rejected` - first rejection when `strict`
/// * `CliError::Read` / `CliError::Output` - I/O failures
pub fn execute_script<G, R, W>(
    board: &ScoreboardService<G>,
    input: R,
    out: &mut W,
    strict: bool,
) -> Result<ScriptReport, CliError>
where
    G: MatchKeyGenerator,
    R: BufRead,
    W: Write,
{
    let mut report = ScriptReport::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(CliError::Read)?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => return Err(CliError::Syntax { line: line_no, message }),
        };

        match apply(board, &command) {
            Ok(lines) => {
                report.executed += 1;
                for printed in lines {
                    writeln!(out, "{}", printed)?;
                }
            }
            Err(err) => {
                report.rejected += 1;
                if strict {
                    return Err(CliError::Rejected { line: line_no, source: err });
                }
                report_rejection(out, line_no, &err)?;
            }
        }
    }

    Ok(report)
}

fn report_rejection<W: Write>(out: &mut W, line: usize, err: &ScoreboardError) -> std::io::Result<()> {
    writeln!(out, "line {}: {}: {}", line, err.kind(), err)
}
