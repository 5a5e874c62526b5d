//! Stream a reply to a short shopping conversation
//!
//! ```sh
//! DASHSCOPE_API_KEY=sk-... cargo run --example chat_stream
//! ```

use dashlm::client::{sink, Client};
use dashlm::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::new(OpenAI::dashscope_from_env()?).with_model("qwen3-max");

    let conversation = vec![
        Message::system("AI助理,简洁回答"),
        Message::user("我有100元"),
        Message::assistant("ok"),
        Message::user("买苹果花了20"),
        Message::assistant("ok"),
        Message::user("买了一个苹果"),
        Message::assistant("ok"),
        Message::user("还有多少，买了啥？"),
    ];

    let stream = client.stream_chat(conversation).await?;
    let mut stdout = std::io::stdout();
    sink::write_fragments(stream, &mut stdout).await?;
    println!();

    Ok(())
}
