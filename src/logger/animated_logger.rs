use std::io::{IsTerminal, Write};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spinner on stderr for long phases; silent when stderr is not a terminal.
pub struct AnimatedLogger {
    message: String,
    animation_chars: Vec<&'static str>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn new(message: impl Into<String>) -> Self {
        let animation_chars = vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

        Self {
            message: message.into(),
            animation_chars,
            stop_sender: None,
            task_handle: None,
        }
    }

    fn interactive() -> bool {
        std::io::stderr().is_terminal()
    }

    pub fn start(&mut self) {
        if !Self::interactive() {
            log::info!("⏳ {}", self.message);
            return;
        }

        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let message = self.message.clone();
        let animation_chars = self.animation_chars.clone();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(150));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ", message, animation_chars[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % animation_chars.len();
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    async fn finish(&mut self) -> bool {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        match self.task_handle.take() {
            Some(handle) => {
                let _ = handle.await;
                true
            }
            None => false,
        }
    }

    pub async fn stop(&mut self, final_message: &str) {
        if self.finish().await {
            eprint!("\r\x1b[K✅  {}\n", final_message);
            let _ = std::io::stderr().flush();
        } else {
            log::info!("✅ {}", final_message);
        }
    }

    pub async fn error(&mut self, error_message: &str) {
        if self.finish().await {
            eprint!("\r\x1b[K❌ {}\n", error_message);
            let _ = std::io::stderr().flush();
        } else {
            log::warn!("❌ {}", error_message);
        }
    }
}
