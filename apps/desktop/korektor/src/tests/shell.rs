// Unit tests for shell command parsing

use crate::shell::ShellCommand;

/// **VALUE**: Verifies plain lines are submitted verbatim.
///
/// **WHY THIS MATTERS**: The correction request must carry the user's text exactly;
/// trimming here would silently change what is sent.
#[test]
fn given_plain_line_when_parsed_then_submit_keeps_text_verbatim() {
    assert_eq!(
        ShellCommand::parse("  Ala ma kota,  "),
        Some(ShellCommand::Submit("  Ala ma kota,  ".to_string()))
    );
}

#[test]
fn given_blank_line_when_parsed_then_nothing_to_do() {
    assert_eq!(ShellCommand::parse(""), None);
    assert_eq!(ShellCommand::parse("   \t"), None);
}

#[test]
fn given_commands_when_parsed_then_mapped_with_arguments() {
    let cases = [
        (":paste", ShellCommand::Paste),
        (":correct", ShellCommand::Correct),
        (":copy", ShellCommand::Copy),
        (":key  sk-abc ", ShellCommand::SetKey("sk-abc".to_string())),
        (":key", ShellCommand::SetKey(String::new())),
        (":forget-key", ShellCommand::ForgetKey),
        (
            ":open korektor://app?text=Hi",
            ShellCommand::Open("korektor://app?text=Hi".to_string()),
        ),
        (":show", ShellCommand::Show),
        (":clear", ShellCommand::Clear),
        (":help", ShellCommand::Help),
        (":quit", ShellCommand::Quit),
        (":q", ShellCommand::Quit),
        (":frobnicate", ShellCommand::Unknown("frobnicate".to_string())),
    ];

    for (line, expected) in cases {
        assert_eq!(ShellCommand::parse(line), Some(expected), "line: {line:?}");
    }
}

/// **BUG THIS CATCHES**: Would catch the log name for `:key` including the key itself.
#[test]
fn given_key_command_when_named_for_logging_then_value_not_included() {
    let command = ShellCommand::SetKey("sk-secret".to_string());

    assert_eq!(command.name(), "key");
}
