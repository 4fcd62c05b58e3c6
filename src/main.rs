use anyhow::Result;
use berry_snake::game::GameConfig;
use berry_snake::modes::HumanMode;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "berry-snake")]
#[command(version, about = "Terminal snake game with a speed ramp")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Seconds between moves at score zero
    #[arg(long, default_value_t = 0.3)]
    interval: f64,

    /// Points needed per speed-up
    #[arg(long, default_value_t = 5)]
    threshold: u32,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::with_tuning(cli.interval, cli.threshold);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
    }

    Ok(())
}
