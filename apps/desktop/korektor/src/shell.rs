//! Line-oriented terminal front end.
//!
//! A plain line becomes the input and is submitted at once. Lines starting
//! with `:` are commands; text that starts with `:` goes through `:paste`.
//! Every failure is printed as a one-line notice prefixed with `!`; only
//! terminal I/O errors end the loop.

use crate::commands::clipboard::copy_result;
use crate::commands::correction::{clear, set_input, submit_correction};
use crate::commands::credential::{forget_credential, has_credential, save_credential};
use crate::commands::deep_link::open_url;
use crate::error::KorektorError;
use crate::session::Session;

use client_core::clipboard::CopyOutcome;

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const PROMPT: &str = "> ";
const KEY_PROMPT: &str = "Enter your OpenAI API key: ";
const PASTE_TERMINATOR: &str = ".";

pub const HELP_TEXT: &str = "\
Type or paste a line of text to correct it.
  :paste          multi-line input, end with a line containing only '.'
                  (use it for text that itself starts with ':')
  :correct        correct the current input again
  :copy           copy the last result to the clipboard
  :key <value>    save the OpenAI API key
  :forget-key     remove the saved API key
  :open <url>     open a korektor:// link (text=... pre-fills the input)
  :show           show input, result and last notice
  :clear          clear input and result
  :help           this help
  :quit           exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the input to this text and submit it.
    Submit(String),
    Paste,
    Correct,
    Copy,
    SetKey(String),
    ForgetKey,
    Open(String),
    Show,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let Some(command) = line.trim().strip_prefix(':') else {
            return Some(ShellCommand::Submit(line.to_string()));
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        Some(match name {
            "paste" => ShellCommand::Paste,
            "correct" => ShellCommand::Correct,
            "copy" => ShellCommand::Copy,
            "key" => ShellCommand::SetKey(argument.to_string()),
            "forget-key" => ShellCommand::ForgetKey,
            "open" => ShellCommand::Open(argument.to_string()),
            "show" => ShellCommand::Show,
            "clear" => ShellCommand::Clear,
            "help" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            other => ShellCommand::Unknown(other.to_string()),
        })
    }

    /// Short name for logging. Never includes typed text or key material.
    pub fn name(&self) -> &'static str {
        match self {
            ShellCommand::Submit(_) => "submit",
            ShellCommand::Paste => "paste",
            ShellCommand::Correct => "correct",
            ShellCommand::Copy => "copy",
            ShellCommand::SetKey(_) => "key",
            ShellCommand::ForgetKey => "forget-key",
            ShellCommand::Open(_) => "open",
            ShellCommand::Show => "show",
            ShellCommand::Clear => "clear",
            ShellCommand::Help => "help",
            ShellCommand::Quit => "quit",
            ShellCommand::Unknown(_) => "unknown",
        }
    }
}

/// Run the shell until `:quit` or end of input.
///
/// If no credential is stored, asks for one first.
///
/// # Errors
///
/// Returns [`KorektorError::Korektor`] only if reading or writing the terminal fails.
pub async fn run<R, W>(session: &Session, input: R, mut out: W) -> Result<(), KorektorError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    if !ensure_credential(session, &mut lines, &mut out).await? {
        return Ok(());
    }

    say(&mut out, "Korektor ready. Type :help for commands.\n").await?;

    loop {
        say(&mut out, PROMPT).await?;
        let Some(line) = next_line(&mut lines).await? else {
            break;
        };
        let Some(command) = ShellCommand::parse(&line) else {
            continue;
        };

        debug!("Shell command: {}", command.name());
        if !execute(session, command, &mut lines, &mut out).await? {
            break;
        }
    }

    info!("Shell finished");
    Ok(())
}

/// Prompt until a credential is saved. Returns `false` on end of input.
async fn ensure_credential<R, W>(
    session: &Session,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<bool, KorektorError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        match has_credential(session) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(e) => {
                // Let the user in; `:key` can still overwrite the broken value.
                notice(out, &e).await?;
                return Ok(true);
            }
        }

        say(out, KEY_PROMPT).await?;
        let Some(value) = next_line(lines).await? else {
            return Ok(false);
        };

        match save_credential(session, &value) {
            Ok(()) => {
                say(out, "API key saved.\n").await?;
                return Ok(true);
            }
            Err(e) => notice(out, &e).await?,
        }
    }
}

/// Execute one command. Returns `false` when the shell should stop.
async fn execute<R, W>(
    session: &Session,
    command: ShellCommand,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<bool, KorektorError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match command {
        ShellCommand::Submit(text) => {
            set_input(session, text).await?;
            submit(session, lines, out).await?;
        }
        ShellCommand::Paste => {
            let text = read_paste(lines).await?;
            set_input(session, text).await?;
            submit(session, lines, out).await?;
        }
        ShellCommand::Correct => submit(session, lines, out).await?,
        ShellCommand::Copy => match copy_result(session).await {
            Ok(CopyOutcome::Copied) => say(out, "Copied to clipboard.\n").await?,
            Ok(CopyOutcome::Skipped) => say(out, "Nothing to copy yet.\n").await?,
            Err(e) => notice(out, &e).await?,
        },
        ShellCommand::SetKey(value) => match save_credential(session, &value) {
            Ok(()) => say(out, "API key saved.\n").await?,
            Err(e) => notice(out, &e).await?,
        },
        ShellCommand::ForgetKey => match forget_credential(session) {
            Ok(()) => say(out, "API key removed.\n").await?,
            Err(e) => notice(out, &e).await?,
        },
        ShellCommand::Open(url) => {
            let delivered = open_url(session, &url);
            debug!("Deep link delivered to {delivered} listener(s)");
        }
        ShellCommand::Show => show(session, out).await?,
        ShellCommand::Clear => {
            clear(session).await?;
            say(out, "Cleared.\n").await?;
        }
        ShellCommand::Help => say(out, HELP_TEXT).await?,
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Unknown(name) => {
            say(out, &format!("! Unknown command :{name} (try :help)\n")).await?;
        }
    }

    Ok(true)
}

/// Submit the current input. If it failed for lack of a key, ask for one;
/// the user resubmits with `:correct`.
async fn submit<R, W>(
    session: &Session,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<(), KorektorError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match submit_correction(session).await {
        Ok(corrected) => say(out, &format!("{corrected}\n")).await,
        Err(e @ KorektorError::Credential { .. }) => {
            notice(out, &e).await?;
            if matches!(has_credential(session), Ok(false)) {
                ensure_credential(session, lines, out).await?;
            }
            Ok(())
        }
        Err(e) => notice(out, &e).await,
    }
}

async fn show<W>(session: &Session, out: &mut W) -> Result<(), KorektorError>
where
    W: AsyncWrite + Unpin,
{
    let view = session.state().view().await;
    let mut text = format!("Input:\n{}\n", view.input);
    if let Some(result) = &view.result {
        text.push_str(&format!("Result:\n{result}\n"));
    }
    if let Some(message) = &view.notice {
        text.push_str(&format!("! {message}\n"));
    }
    say(out, &text).await
}

async fn read_paste<R>(lines: &mut Lines<R>) -> Result<String, KorektorError>
where
    R: AsyncBufRead + Unpin,
{
    let mut collected = Vec::new();
    while let Some(line) = next_line(lines).await? {
        if line == PASTE_TERMINATOR {
            break;
        }
        collected.push(line);
    }
    Ok(collected.join("\n"))
}

async fn next_line<R>(lines: &mut Lines<R>) -> Result<Option<String>, KorektorError>
where
    R: AsyncBufRead + Unpin,
{
    lines
        .next_line()
        .await
        .map_err(|e| KorektorError::korektor(format!("Failed to read input: {e}")))
}

async fn notice<W>(out: &mut W, error: &KorektorError) -> Result<(), KorektorError>
where
    W: AsyncWrite + Unpin,
{
    say(out, &format!("! {}\n", error.user_message())).await
}

async fn say<W>(out: &mut W, text: &str) -> Result<(), KorektorError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes())
        .await
        .map_err(|e| KorektorError::korektor(format!("Failed to write output: {e}")))?;
    out.flush()
        .await
        .map_err(|e| KorektorError::korektor(format!("Failed to write output: {e}")))
}
