//! System clipboard access through a clipboard command

use std::process::Stdio;

use futures::future::BoxFuture;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info};

/// Somewhere text can be copied to
pub trait Clipboard: Send + Sync {
    fn copy<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), String>>;
}

/// Pipes text into a clipboard program such as `pbcopy` or `xclip`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Build from a whitespace-separated command line, e.g. `xclip -selection clipboard`
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The usual clipboard program for the current platform
    pub fn default_command() -> &'static str {
        if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(target_os = "windows") {
            "clip"
        } else {
            "xclip -selection clipboard"
        }
    }

    async fn run(&self, text: &str) -> Result<(), String> {
        debug!("Copying {} bytes with {}", text.len(), self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to execute {}: {}", self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| format!("Failed to write to {}: {}", self.program, e))?;
            // Dropping stdin closes the pipe so the program can finish
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("Failed to wait for {}: {}", self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} failed: {}", self.program, stderr.trim()));
        }

        info!("Copied text to the clipboard");
        Ok(())
    }
}

impl Clipboard for CommandClipboard {
    fn copy<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(self.run(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_is_split_into_program_and_args() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_succeeds_when_the_program_accepts_input() {
        let clipboard = CommandClipboard::from_command_line("cat").unwrap();
        assert!(clipboard.copy("http://localhost:20553/").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_reports_a_failing_program() {
        let clipboard = CommandClipboard::from_command_line("false").unwrap();
        assert!(clipboard.copy("anything").await.is_err());
    }

    #[tokio::test]
    async fn copy_reports_a_missing_program() {
        let clipboard =
            CommandClipboard::from_command_line("prayer-cloud-no-such-clipboard-tool").unwrap();
        let err = clipboard.copy("anything").await.unwrap_err();
        assert!(err.contains("Failed to execute"));
    }
}
