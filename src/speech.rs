//! Speech input backed by an external recognizer command.
//!
//! `start` spawns `sh -c <cmd>`; the command is expected to listen and print a
//! single transcription on stdout. `poll` never blocks: it checks the child
//! with `try_wait` and only reads stdout once the process has exited.

use std::io::Read;
use std::process::{Child, Command, Stdio};

use crate::core::{SpeechError, SpeechInput};

#[derive(Debug, Default)]
pub struct CommandSpeech {
    cmd: Option<String>,
    child: Option<Child>,
}

impl CommandSpeech {
    /// `None` yields a capability that always reports `Unsupported`.
    pub fn new(cmd: Option<String>) -> Self {
        Self { cmd, child: None }
    }

    pub fn is_listening(&self) -> bool {
        self.child.is_some()
    }

    fn finish(mut child: Child) -> Result<String, SpeechError> {
        let status = child
            .wait()
            .map_err(|e| SpeechError::Recognition(e.to_string()))?;
        let mut out = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout
                .read_to_string(&mut out)
                .map_err(|e| SpeechError::Recognition(e.to_string()))?;
        }
        if !status.success() {
            return Err(SpeechError::Recognition(format!("recognizer exited with {status}")));
        }
        let text = out.lines().next().unwrap_or("").trim().to_string();
        if text.is_empty() {
            return Err(SpeechError::Recognition("nothing was heard".to_string()));
        }
        Ok(text)
    }
}

impl SpeechInput for CommandSpeech {
    fn start(&mut self) -> Result<(), SpeechError> {
        self.cancel();
        let cmd = self.cmd.as_deref().ok_or(SpeechError::Unsupported)?;
        let child = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Recognition(e.to_string()))?;
        tracing::debug!(pid = child.id(), "recognizer started");
        self.child = Some(child);
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<String, SpeechError>> {
        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(None) => None,
            Ok(Some(_)) => self.child.take().map(Self::finish),
            Err(e) => {
                self.cancel();
                Some(Err(SpeechError::Recognition(e.to_string())))
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!("recognizer cancelled");
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(speech: &mut CommandSpeech) -> Result<String, SpeechError> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = speech.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "recognizer never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn without_command_is_unsupported() {
        let mut speech = CommandSpeech::new(None);
        assert_eq!(speech.start(), Err(SpeechError::Unsupported));
        assert_eq!(speech.poll(), None);
    }

    #[test]
    fn first_line_of_stdout_is_the_transcript() {
        let mut speech = CommandSpeech::new(Some("printf ' had \\nnoise\\n'".into()));
        speech.start().unwrap();
        assert!(speech.is_listening());
        assert_eq!(wait_for(&mut speech), Ok("had".to_string()));
        assert!(!speech.is_listening());
        assert_eq!(speech.poll(), None);
    }

    #[test]
    fn silence_and_failure_are_recognition_errors() {
        let mut speech = CommandSpeech::new(Some("true".into()));
        speech.start().unwrap();
        assert!(matches!(wait_for(&mut speech), Err(SpeechError::Recognition(_))));

        let mut speech = CommandSpeech::new(Some("echo had; exit 3".into()));
        speech.start().unwrap();
        assert!(matches!(wait_for(&mut speech), Err(SpeechError::Recognition(_))));
    }

    #[test]
    fn restart_replaces_the_running_recognizer() {
        let mut speech = CommandSpeech::new(Some("sleep 30".into()));
        speech.start().unwrap();
        speech.cmd = Some("echo again".into());
        speech.start().unwrap();
        assert_eq!(wait_for(&mut speech), Ok("again".to_string()));
    }

    #[test]
    fn cancel_kills_the_recognizer() {
        let mut speech = CommandSpeech::new(Some("sleep 30".into()));
        speech.start().unwrap();
        speech.cancel();
        assert!(!speech.is_listening());
        assert_eq!(speech.poll(), None);
    }
}
