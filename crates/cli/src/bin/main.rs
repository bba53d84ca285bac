use anyhow::Result;
use clap::Parser;
use shoal::App;

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();
    app.chat.run().await
}
