//! Stream a translation from a conversation given as plain role/content mappings
//!
//! Press Ctrl-C to stop early; dropping the receiver cancels the request.

use dashlm::client::Client;
use dashlm::prelude::*;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const CONVERSATION: &str = r#"[
    {"role": "system", "content": "你是一个专业的翻译"},
    {"role": "user", "content": "你好"},
    {"role": "assistant", "content": "Hello"},
    {"role": "user", "content": "你好,你的名字是？"}
]"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::new(OpenAI::dashscope_from_env()?);
    let conversation = Message::conversation_from_json(CONVERSATION)?;

    let mut fragments = client.spawn_fragments(conversation).await?;
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                fragments.close();
                break;
            }
            fragment = fragments.recv() => match fragment {
                Some(fragment) => {
                    write!(stdout, "{}", fragment?)?;
                    stdout.flush()?;
                }
                None => break,
            },
        }
    }
    println!();

    Ok(())
}
