use std::io::Write;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stderr activity indicator for waits with no intermediate output, like the
/// AI pass. Stdout stays clean for the report.
pub struct StatusSpinner {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StatusSpinner {
    pub fn start(label: &str) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let label = label.to_string();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(120));
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r{} {} ", FRAMES[frame], label);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = &mut stop_rx => break,
                }
            }
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub async fn finish(mut self, message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K✅ {}\n", message);
        let _ = std::io::stderr().flush();
    }

    pub async fn fail(mut self, message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K⚠️ {}\n", message);
        let _ = std::io::stderr().flush();
    }

    async fn halt(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}
