use async_trait::async_trait;

/// Port for presenting the rendered connection listing
#[async_trait]
pub trait ViewPort: Send + Sync {
    async fn present(&self, lines: &[String]);
}
