//! Line-oriented transport: one command per input line, one reply per command.
use super::ui;
use crate::core::{UserId, Wallet};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

/// Interactive session over stdin/stdout until end of input.
pub async fn run(wallet: &mut Wallet, user: UserId) -> Result<()> {
    eprintln!(
        "{}",
        ui::style_text(
            &format!("Wallet session for user {user}. Commands: ADD, SUB, DEL, SHOW"),
            ui::StyleType::Subtle
        )
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    serve(wallet, user, stdin, &mut stdout).await
}

/// Handles each line of `reader` in order, writing replies to `writer`.
///
/// Blank lines are skipped. A command is handled to completion before the
/// next line is read.
pub async fn serve<R, W>(wallet: &mut Wallet, user: UserId, reader: R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let reply = wallet.handle(user, text).await;
        writer
            .write_all(reply.trim_end().as_bytes())
            .await
            .context("Failed to write reply")?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    debug!("Input closed, ending session");
    Ok(())
}
