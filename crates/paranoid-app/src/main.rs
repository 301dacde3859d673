use std::fs::File;
use std::io::{stdout, BufWriter};

use anyhow::Context;

use paranoid_app::audio;
use paranoid_app::config::AppConfig;
use paranoid_app::frontend::Frontend;
use paranoid_app::game_loop::spawn_game_loop;
use paranoid_app::terminal::{spawn_input_thread, TerminalGuard};
use paranoid_voice::IntroScreen;

/// Log file location override. The terminal is in raw mode, so logs never go
/// to stderr.
const LOG_FILE_ENV: &str = "PARANOID_LOG";

fn init_logging() -> anyhow::Result<()> {
    let path = std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| "paranoid.log".to_string());
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("panic: {}", info);
        default_hook(info);
    }));

    let config = AppConfig::load();
    let game = spawn_game_loop(config.sim_config()).context("starting game loop")?;
    let intro = IntroScreen::new(
        audio::open_microphone(),
        config.sound_service(),
        config.recorder_settings(),
    );
    let speaker = audio::open_speaker();

    let events = spawn_input_thread().context("starting input thread")?;
    let mut terminal = TerminalGuard::enter(BufWriter::new(stdout())).context("entering raw mode")?;

    log::info!("Paranoid Asteroids started");
    let mut frontend = Frontend::new(intro, game, speaker);
    frontend.run(terminal.out(), &events)?;
    Ok(())
}
