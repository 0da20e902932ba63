//! Spoken narration.
//!
//! Narration is fire-and-forget: a speaker never reports failure to the
//! caller, and each new utterance supersedes the one before it.

use std::process::{Child, Command, Stdio};

/// Text-to-speech capability.
pub trait Speaker: Send {
    /// Speak `text`, cancelling anything still being spoken.
    fn speak(&mut self, text: &str);

    /// Stop the current utterance, if any.
    fn cancel(&mut self) {}
}

/// A speaker that says nothing. Used when no speech backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str) {}
}

/// Speaks by running an external program (e.g. `espeak-ng -v cmn`) with the
/// text appended as the final argument.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current: None,
        }
    }

    /// Build from a whitespace-separated command line. `None` if blank.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) {
        self.cancel();

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.current = Some(child),
            Err(e) => tracing::warn!(program = %self.program, error = %e, "speech command failed"),
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already-exited children just fail the kill; wait reaps either way.
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let speaker = CommandSpeaker::from_command_line("espeak-ng -v cmn -s 190").unwrap();
        assert_eq!(speaker.program(), "espeak-ng");
        assert_eq!(speaker.args, vec!["-v", "cmn", "-s", "190"]);

        assert!(CommandSpeaker::from_command_line("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_silent() {
        let mut speaker = CommandSpeaker::new("definitely-not-a-real-tts-binary", Vec::new());
        speaker.speak("你好");
        assert!(speaker.current.is_none());
        speaker.speak("再见");
    }

    #[test]
    fn test_silent_speaker() {
        let mut speaker = SilentSpeaker;
        speaker.speak("anything");
        speaker.cancel();
    }
}
