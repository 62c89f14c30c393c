use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use distal_arm_ik::{
    sweep_commands, ArmConfig, ChannelSink, Controller, Error, JointStream, PlanarChain,
};
use futures::StreamExt;

/// Sweep the commanded distal angle and stream the solved joint angles.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// TOML file with link lengths, joint limits and solver settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// First commanded distal angle, degrees.
    #[arg(long, default_value_t = -180.0, allow_negative_numbers = true)]
    from: f64,

    /// Last commanded distal angle, degrees.
    #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
    to: f64,

    /// Increment between commands, degrees.
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Commands issued per second.
    #[arg(long, default_value_t = 100.0)]
    rate_hz: f64,
}

async fn consume(mut poses: JointStream, chain: PlanarChain) -> usize {
    let mut received = 0;
    while let Some(angles) = poses.next().await {
        let tip = chain.tip(&angles);
        log::info!(
            "joints [{:6.1} {:6.1} {:6.1} {:6.1}] tip ({:6.2}, {:6.2})",
            angles.base,
            angles.shoulder,
            angles.elbow,
            angles.distal,
            tip.x,
            tip.y
        );
        received += 1;
    }
    received
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading arm configuration from {}", path.display());
            ArmConfig::from_file(path)?
        }
        None => ArmConfig::default(),
    };

    let (sink, poses) = ChannelSink::new(64);
    let mut controller = Controller::new(&config, sink)?;
    let consumer = tokio::spawn(consume(poses, controller.solver().chain().clone()));

    let outbound = sweep_commands(args.from, args.to, args.step)?;
    let inbound = sweep_commands(args.to, args.from, args.step)?;
    let rate_hz = args.rate_hz.clamp(1.0, 10_000.0);
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / rate_hz));

    let mut solved = 0;
    let mut commanded = 0;
    for distal in outbound.chain(inbound) {
        ticker.tick().await;
        if controller.set_distal(distal).await?.is_solved() {
            solved += 1;
        }
        commanded += 1;
    }
    log::info!("Commanded {commanded} distal angles, {solved} solved");

    drop(controller);
    match consumer.await {
        Ok(received) => log::info!("Consumer received {received} poses"),
        Err(e) => log::warn!("Consumer task failed: {e}"),
    }
    Ok(())
}
