//! Newline-delimited JSON over any async byte stream.

use anyhow::Context;
use log::warn;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::Message;
use crate::transport::Transport;

/// Maximum accepted line length in bytes.
const MAX_LINE_LEN: usize = 64 * 1024;

/// One JSON message per line. Blank lines are skipped; a line that does
/// not parse, is not UTF-8 or is longer than the limit is answered with
/// [`Message::Error`] and skipped.
pub struct LinesTransport<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R, W> LinesTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    async fn write_message(&mut self, msg: &Message) -> anyhow::Result<()> {
        let mut encoded = serde_json::to_string(msg)?;
        encoded.push('\n');
        self.writer.write_all(encoded.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn reply_error(&mut self, error: String) -> anyhow::Result<()> {
        self.write_message(&Message::Error { error }).await
    }

    /// Discard input up to and including the next newline.
    async fn skip_line(&mut self) -> anyhow::Result<()> {
        loop {
            let (consumed, done) = {
                let buf = self.reader.fill_buf().await?;
                match buf.iter().position(|&b| b == b'\n') {
                    Some(pos) => (pos + 1, true),
                    None => (buf.len(), buf.is_empty()),
                }
            };
            self.reader.consume(consumed);
            if done {
                return Ok(());
            }
        }
    }
}

#[async_trait::async_trait]
impl<R, W> Transport for LinesTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.write_message(&msg).await
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            self.line.clear();
            let read = (&mut self.reader)
                .take(MAX_LINE_LEN as u64 + 1)
                .read_until(b'\n', &mut self.line)
                .await
                .context("reading request line")?;
            if read == 0 {
                return Err(anyhow::anyhow!("Connection closed"));
            }
            if self.line.len() > MAX_LINE_LEN && self.line.last() != Some(&b'\n') {
                self.skip_line().await?;
                warn!("dropping line longer than {} bytes", MAX_LINE_LEN);
                self.reply_error(format!("Message exceeds {} bytes", MAX_LINE_LEN))
                    .await?;
                continue;
            }
            let text = match std::str::from_utf8(&self.line) {
                Ok(text) => text.trim(),
                Err(e) => {
                    warn!("non UTF-8 line: {}", e);
                    self.reply_error(format!("Malformed message: {}", e)).await?;
                    continue;
                }
            };
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str::<Message>(text) {
                Ok(msg) => return Ok(msg),
                Err(e) => {
                    warn!("malformed message: {}", e);
                    self.reply_error(format!("Malformed message: {}", e)).await?;
                }
            }
        }
    }
}
