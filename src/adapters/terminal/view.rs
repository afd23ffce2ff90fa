use crate::ports::ViewPort;
use async_trait::async_trait;
use tokio::io::{self, AsyncWriteExt};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Redraws the whole listing on stdout
pub struct TerminalView {
    title: String,
}

impl TerminalView {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    fn screen(&self, lines: &[String]) -> String {
        let mut screen = String::from(CLEAR_SCREEN);
        screen.push_str(&format!("{} ({} destinations)\n\n", self.title, lines.len()));
        for line in lines {
            screen.push_str(line);
            screen.push('\n');
        }
        screen
    }
}

#[async_trait]
impl ViewPort for TerminalView {
    async fn present(&self, lines: &[String]) {
        let screen = self.screen(lines);
        let mut stdout = io::stdout();

        if let Err(e) = stdout.write_all(screen.as_bytes()).await {
            log::warn!("Failed to draw connections: {}", e);
            return;
        }
        if let Err(e) = stdout.flush().await {
            log::warn!("Failed to flush connections: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout() {
        let view = TerminalView::new("Connections on eth0");
        let lines = vec![
            "10.0.0.1:443 --> 10.0.0.2:51000 Seen: 0 secs ago".to_string(),
            "10.0.0.3:22 --> 10.0.0.2:51001 Seen: 4 secs ago".to_string(),
        ];

        let screen = view.screen(&lines);

        assert!(screen.starts_with(CLEAR_SCREEN));
        assert_eq!(
            &screen[CLEAR_SCREEN.len()..],
            "Connections on eth0 (2 destinations)\n\n\
             10.0.0.1:443 --> 10.0.0.2:51000 Seen: 0 secs ago\n\
             10.0.0.3:22 --> 10.0.0.2:51001 Seen: 4 secs ago\n"
        );
    }
}
