//! Chat command

use anyhow::Result;
use clap::Args;
use reqwest::Client;
use shoal_core::Message;
use shoal_neon::NeonClient;
use shoal_roster::{PROJECT_AGENT, bootstrap, build_roster};
use shoal_runtime::{Provider, Runtime, Session};
use std::io::{BufRead, Write};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatCmd {
    /// The model to use
    #[arg(short, long, default_value = "gpt-4o")]
    pub model: String,

    /// Override the chat-completions endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// The message to send (if empty, starts interactive mode)
    pub message: Option<String>,
}

impl ChatCmd {
    /// Run the chat command
    pub async fn run(&self) -> Result<()> {
        let key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("missing OPENAI_API_KEY environment variable"))?;

        let client = Client::new();
        let mut provider = Provider::new(client.clone(), &key, &self.model)?;
        if let Some(base_url) = &self.base_url {
            provider = provider.with_endpoint(base_url);
        }

        let neon = NeonClient::from_env(client)?;
        let mut runtime = Runtime::new();
        build_roster(&mut runtime, neon.clone());

        let context = bootstrap(&neon).await?;
        let mut session = Session::new(PROJECT_AGENT, context);

        self.run_chat(&runtime, &provider, &mut session).await
    }

    async fn run_chat(
        &self,
        runtime: &Runtime,
        provider: &Provider,
        session: &mut Session,
    ) -> Result<()> {
        if let Some(msg) = &self.message {
            Self::send(runtime, provider, session, Message::user(msg)).await?;
        } else {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            loop {
                print!("> ");
                stdout.flush()?;

                let mut input = String::new();
                if stdin.lock().read_line(&mut input)? == 0 {
                    break;
                }

                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "/quit" || input == "/exit" {
                    break;
                }

                Self::send(runtime, provider, session, Message::user(input)).await?;
            }
        }

        Ok(())
    }

    async fn send(
        runtime: &Runtime,
        provider: &Provider,
        session: &mut Session,
        message: Message,
    ) -> Result<()> {
        let response = runtime.send(provider, session, message).await?;
        if let Some(content) = response.content() {
            println!("{content}");
        }
        Ok(())
    }
}
