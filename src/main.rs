use clap::Parser;
use npc_gateway::gateway_state::{GatewayConfig, GatewayState};
use npc_gateway::server::{init_logging, startup};
use tokio::signal;

#[derive(Parser, Debug)]
#[command(
    name = "npc-gateway",
    about = "HTTP gateway generating tabletop RPG NPC descriptions"
)]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Base URL of the OpenAI-compatible completion API
    #[arg(long, default_value = "https://api.openai.com/v1")]
    api_base: String,
    #[arg(long, default_value = "gpt-3.5-turbo")]
    model: String,
    #[arg(long, default_value_t = 150)]
    max_tokens: u32,
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,
    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();
    let config = GatewayConfig {
        host: args.host,
        port: args.port,
        api_base: args.api_base,
        model: args.model,
        max_tokens: args.max_tokens,
        temperature: args.temperature,
        timeout: args.timeout,
        api_key: std::env::var("OPENAI_API_KEY").ok(),
    };
    let state = GatewayState::new(config.clone())?;

    actix_web::rt::System::new().block_on(async move {
        tokio::select! {
            res = startup(config, state) => {
                res?;
            }
            _ = signal::ctrl_c() => {
                println!("Received Ctrl+C, shutting down");
            }
        }
        anyhow::Ok(())
    })?;
    Ok(())
}
