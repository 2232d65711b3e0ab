//! Interactive analysis session

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use uacheck_core::models::{IssueKey, IssueSnapshot, Verdict};
use uacheck_core::{build_prompt, Prompt};
use uacheck_jira::JiraClient;
use uacheck_ollama::OllamaClient;

/// Input that ends the session.
pub const EXIT_SENTINEL: &str = "exit";

const KEY_PROMPT: &str = "Enter Jira issue code (or type 'exit' to quit): ";
const RETRY_PROMPT: &str = "Enter Jira issue code: ";

/// Counters for one session, logged on exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub invalid_keys: usize,
    pub tracker_failures: usize,
    pub inference_failures: usize,
    pub reported: usize,
}

#[derive(Debug)]
enum State {
    AwaitingKey { retry: bool },
    Validating(String),
    Fetching(IssueKey),
    Prompting(IssueSnapshot),
    Querying(Prompt),
    Reporting(Verdict),
    Exit,
}

/// Reads issue keys from `input` and writes results to `output`, one issue
/// at a time, until the operator types `exit` or input ends.
pub struct Session<R, W> {
    jira: JiraClient,
    ollama: OllamaClient,
    model: String,
    input: R,
    output: W,
    stats: SessionStats,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        jira: JiraClient,
        ollama: OllamaClient,
        model: impl Into<String>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            jira,
            ollama,
            model: model.into(),
            input,
            output,
            stats: SessionStats::default(),
        }
    }

    /// Run until exit. Tracker and inference failures are reported to the
    /// operator and the loop carries on; only terminal I/O errors end it
    /// early.
    pub async fn run(&mut self) -> io::Result<SessionStats> {
        let mut state = State::AwaitingKey { retry: false };

        loop {
            state = match state {
                State::AwaitingKey { retry } => {
                    write!(self.output, "{}", if retry { RETRY_PROMPT } else { KEY_PROMPT })?;
                    self.output.flush()?;

                    match self.read_line().await? {
                        Some(line) => State::Validating(line),
                        None => {
                            writeln!(self.output)?;
                            State::Exit
                        }
                    }
                }

                State::Validating(input) => {
                    if input == EXIT_SENTINEL {
                        State::Exit
                    } else {
                        match IssueKey::parse(&input) {
                            Ok(key) => State::Fetching(key),
                            Err(e) => {
                                self.stats.invalid_keys += 1;
                                writeln!(self.output, "\n{}\n", e)?;
                                State::AwaitingKey { retry: true }
                            }
                        }
                    }
                }

                State::Fetching(key) => match self.jira.fetch_issue(&key).await {
                    Ok(snapshot) => State::Prompting(snapshot),
                    Err(e) => {
                        self.stats.tracker_failures += 1;
                        if matches!(e, uacheck_jira::Error::Unavailable { .. }) {
                            writeln!(self.output, "{}", e)?;
                        } else {
                            tracing::warn!("Could not read Jira issue {}: {}", key, e);
                            writeln!(self.output, "Error loading Jira issue: {}\n{}\n", key, e)?;
                        }
                        State::AwaitingKey { retry: false }
                    }
                },

                State::Prompting(snapshot) => State::Querying(build_prompt(&snapshot)),

                State::Querying(prompt) => {
                    writeln!(self.output, "Querying the LLM...")?;
                    self.output.flush()?;

                    match self.ollama.generate(&self.model, &prompt).await {
                        Ok(verdict) => State::Reporting(verdict),
                        Err(e) => {
                            tracing::warn!("Inference with {} failed: {}", self.model, e);
                            self.stats.inference_failures += 1;
                            writeln!(
                                self.output,
                                "Failed to query the LLM: {}\nIs the ollama instance running?\n",
                                e
                            )?;
                            State::AwaitingKey { retry: false }
                        }
                    }
                }

                State::Reporting(verdict) => {
                    match verdict.assessment() {
                        Some(assessment) => tracing::info!(
                            "Verdict: contains_uac={} should_manually_review={}",
                            assessment.contains_uac,
                            assessment.should_manually_review
                        ),
                        None => tracing::info!("Verdict did not follow the response schema"),
                    }

                    self.stats.reported += 1;
                    writeln!(self.output, "Result: {}\n", verdict)?;
                    State::AwaitingKey { retry: false }
                }

                State::Exit => break,
            };
        }

        tracing::info!("Session finished: {:?}", self.stats);
        Ok(self.stats)
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// One line without its terminator, or `None` at end of input. Bytes
    /// that aren't UTF-8 are replaced so the line still reaches validation.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
