//! time-announce entry point
//!
//! Speaks the current time (or custom text) and streams it to DVMBridge.
//! Exit status is 0 on success, 1 on a configuration or socket failure and
//! 2 when only silence could be sent because synthesis failed.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use time_announce::announcement::current_announcement;
use time_announce::announcer::{
    buffer_options, dump_buffer, prepare_buffer, send_buffer, AnnounceOutcome,
};
use time_announce::config::{Config, DEFAULT_CONFIG_FILE};
use time_announce::speech::create_synth;
use time_announce::transport::PacedFrameTransmitter;
use time_announce::Result;

#[derive(Parser, Debug)]
#[command(name = "time-announce", version)]
#[command(about = "Speak the time and stream it to DVMBridge", long_about = None)]
struct Cli {
    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// DVMBridge host (overrides config)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// DVMBridge port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Custom announcement text
    #[arg(short, long)]
    text: Option<String>,

    /// Build the audio without sending to DVMBridge
    #[arg(long)]
    test: bool,

    /// Write the outgoing raw PCM buffer to this file
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            error!("Fatal error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<AnnounceOutcome> {
    info!("{} version {} starting", time_announce::APP_NAME, time_announce::VERSION);

    if cli.write_config {
        Config::write_default(&cli.config)?;
        return Ok(AnnounceOutcome::Built);
    }

    let mut config = Config::load(&cli.config)?;
    if let Some(host) = &cli.host {
        config.set("network", "host", host);
    }
    if let Some(port) = cli.port {
        config.set("network", "port", &port.to_string());
    }

    let announcement = cli
        .text
        .clone()
        .unwrap_or_else(|| current_announcement(&config.announcement_format()));
    info!("Announcement: {}", announcement);

    let mut synth = create_synth(
        config.engine(),
        config.espeak_settings(),
        &config.pico_language(),
    );
    let buffer = prepare_buffer(buffer_options(&config), synth.as_mut(), &announcement);

    if let Some(path) = &cli.dump {
        dump_buffer(&buffer, path)?;
    }

    if cli.test {
        info!("Test mode - not sending to DVMBridge");
        info!("Audio duration: {:.2} seconds", buffer.duration().as_secs_f32());
        if !buffer.has_speech() {
            error!("Synthesis produced no speech");
            return Ok(AnnounceOutcome::BuiltSilence);
        }
        return Ok(AnnounceOutcome::Built);
    }

    let host = config.host();
    let port = config.port()?;
    info!("Streaming to DVMBridge at {}:{}", host, port);
    let mut transmitter = PacedFrameTransmitter::connect(&host, port)?;
    let outcome = send_buffer(&buffer, &mut transmitter)?;

    if let AnnounceOutcome::SentSilence(_) = outcome {
        error!("Announcement was silent: speech synthesis failed");
    }
    Ok(outcome)
}
