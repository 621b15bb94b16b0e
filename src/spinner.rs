use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use std::io::{stderr, IsTerminal};
use std::time::Duration;
use tokio::task::JoinHandle;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK_RATE: Duration = Duration::from_millis(100);

/// Progress indicator drawn on stderr while Jira is being queried
pub struct Spinner {
  handle: Option<JoinHandle<()>>,
}

impl Spinner {
  /// Start spinning, unless disabled or stderr is not a terminal.
  pub fn start(message: &'static str, enabled: bool) -> Self {
    if !enabled || !stderr().is_terminal() {
      return Self { handle: None };
    }

    let handle = tokio::spawn(async move {
      let mut interval = tokio::time::interval(TICK_RATE);
      for frame in FRAMES.iter().cycle() {
        interval.tick().await;
        let mut err = stderr();
        // Drawing errors only affect the indicator
        let _ = err
          .execute(MoveToColumn(0))
          .and_then(|e| e.execute(Clear(ClearType::CurrentLine)))
          .and_then(|e| e.execute(Print(format!("{} {}", message, frame))));
      }
    });

    Self {
      handle: Some(handle),
    }
  }

  /// Stop spinning and erase the indicator line.
  pub fn stop(&mut self) {
    if let Some(handle) = self.handle.take() {
      handle.abort();
      let mut err = stderr();
      let _ = err
        .execute(MoveToColumn(0))
        .and_then(|e| e.execute(Clear(ClearType::CurrentLine)));
    }
  }
}

impl Drop for Spinner {
  fn drop(&mut self) {
    self.stop();
  }
}
