//! Headless mode for the scripted chat.
//!
//! This module provides a simple text-based interface for running the
//! conversation without a TUI. It's designed for automated testing and
//! piping transcripts.

use lanchat_core::{ChatSession, Script, Sender, SessionConfig};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Configuration parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Override for the typing delay, in milliseconds.
    pub typing_delay_ms: Option<u64>,
}

/// Run the chat in headless mode.
///
/// Line-oriented protocol:
/// - A number selects the reply with that on-screen position
/// - Lines starting with `#` are commands (restart, transcript, save, quit)
/// - All other output is the conversation
pub async fn run_headless(config: HeadlessConfig) -> io::Result<()> {
    let mut session_config = SessionConfig::default();
    if let Some(ms) = config.typing_delay_ms {
        session_config = session_config.with_typing_delay_ms(ms);
    }

    let mut session = ChatSession::new(Script::builtin(), session_config);
    session.start();

    println!("=== Chat with the Creator of the First LAN ===");
    println!();
    println!("Commands:");
    println!("  #quit          - Exit the chat");
    println!("  #restart       - Reset the conversation");
    println!("  #transcript    - Print the full transcript so far");
    println!("  #save <path>   - Write the transcript as JSON");
    println!("  #help          - Show this help");
    println!();
    println!("Pick a reply by typing its number:");
    println!();

    let mut printed = 0;
    print_new_messages(&session, &mut printed);
    print_replies(&session);

    let delay = Duration::from_millis(session.config().typing_delay_ms);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Handle commands
        if let Some(rest) = line.strip_prefix('#') {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    println!("Goodbye!");
                    break;
                }
                Some("restart") => {
                    session.reset();
                    session.start();
                    printed = 0;
                    println!("[RESTARTED]");
                    print_new_messages(&session, &mut printed);
                    print_replies(&session);
                }
                Some("transcript") => {
                    println!("[TRANSCRIPT]");
                    let mut from_start = 0;
                    print_new_messages(&session, &mut from_start);
                }
                Some("save") => {
                    if let Some(path) = parts.get(1) {
                        match save_transcript(&session, path) {
                            Ok(()) => println!("[SAVED] Transcript written to {path}"),
                            Err(e) => println!("[ERROR] Save failed: {e}"),
                        }
                    } else {
                        println!("[ERROR] Usage: #save <path>");
                    }
                }
                Some("help") => {
                    println!("[HELP]");
                    println!("  #quit          - Exit the chat");
                    println!("  #restart       - Reset the conversation");
                    println!("  #transcript    - Print the full transcript so far");
                    println!("  #save <path>   - Write the transcript as JSON");
                    println!("  (a number picks the reply at that position)");
                }
                _ => {
                    println!("[ERROR] Unknown command. Type #help for help.");
                }
            }
            stdout.flush().ok();
            continue;
        }

        // A number picks a reply
        let Ok(number) = line.parse::<usize>() else {
            println!("[ERROR] Enter a reply number or a # command.");
            continue;
        };
        if number == 0 || number > session.replies().len() {
            println!("[ERROR] No reply at position {number}.");
            continue;
        }

        if let Some(pending) = session.select(number - 1) {
            print_new_messages(&session, &mut printed);
            // Pacing only; the content is already decided.
            tokio::time::sleep(delay).await;
            session.deliver(pending);
        }
        print_new_messages(&session, &mut printed);
        print_replies(&session);
        stdout.flush().ok();
    }

    Ok(())
}

/// Print any transcript entries past the cursor, advancing it.
fn print_new_messages(session: &ChatSession, printed: &mut usize) {
    for message in &session.messages()[*printed..] {
        let label = match message.sender {
            Sender::User => "[YOU]",
            Sender::Narrator => "[BOB]",
        };
        println!("{label} {}", message.text);
        if let Some(image) = &message.image {
            println!("      (diagram: {image})");
        }
        println!();
    }
    *printed = session.messages().len();
}

fn print_replies(session: &ChatSession) {
    println!("Replies:");
    for (i, reply) in session.replies().iter().enumerate() {
        println!("  {}. {}", i + 1, reply.text);
    }
    println!();
}

fn save_transcript(session: &ChatSession, path: &str) -> io::Result<()> {
    let json = session
        .transcript_json()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Parse headless configuration from command line arguments.
pub fn parse_config_from_args(args: &[String]) -> HeadlessConfig {
    let mut config = HeadlessConfig::default();

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--delay-ms" {
            if let Some(ms) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                config.typing_delay_ms = Some(ms);
                i += 1;
            }
        }
        i += 1;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_flag_is_parsed() {
        let args: Vec<String> = ["lanchat", "--headless", "--delay-ms", "0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(parse_config_from_args(&args).typing_delay_ms, Some(0));
    }

    #[test]
    fn missing_delay_value_is_ignored() {
        let args: Vec<String> = ["lanchat", "--delay-ms"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_config_from_args(&args).typing_delay_ms, None);
    }
}
