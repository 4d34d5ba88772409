//! wordbeats - turn text into a beat
//!
//! Run with: cargo run -- "hello world"

mod device;
mod ui;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::info;
use std::{fs::File, path::PathBuf};

use device::CpalEngine;
use ui::UiApp;
use wordbeats::{
    compose::{compose, resolve_text},
    controller::{AppState, Controller},
    engine::{analyser_channel, tap::TAP_CAPACITY, AudioEngine, OfflineEngine, StepClock},
    playback::{PlayRequest, Player},
    sequencing::Scale,
    settings::Settings,
    visual::Visualizer,
    voices::Instrument,
    DEFAULT_SAMPLE_RATE,
};

/// Steps in one 4/4 bar of sixteenths.
const STEPS_PER_BAR: u64 = 16;

/// Extra steps rendered after the last one so release tails are kept.
const TAIL_STEPS: u64 = 2;

#[derive(Parser, Debug)]
#[command(name = "wordbeats", version, about = "Turn any text into a beat")]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    /// Tempo in beats per minute (60-200)
    #[arg(long, global = true, default_value_t = 120)]
    bpm: u16,

    /// Scale the melody is drawn from
    #[arg(long, global = true, default_value_t = Scale::Major)]
    scale: Scale,

    /// Instrument to play, repeat for layers (default: drums)
    #[arg(long = "voice", global = true)]
    voices: Vec<Instrument>,

    /// Sample rate for offline rendering
    #[arg(long, global = true, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,
}

impl SettingsArgs {
    fn resolve(&self) -> EyreResult<Settings> {
        let voices = if self.voices.is_empty() {
            vec![Instrument::default()]
        } else {
            self.voices.clone()
        };
        Ok(Settings::new(self.bpm, self.scale, voices, self.sample_rate)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rhythm pattern and melody for a text
    Pattern { text: String },

    /// Render a text to a WAV file without a sound device
    Render {
        text: String,

        /// Length in 4/4 bars
        #[arg(long, conflicts_with = "steps")]
        bars: Option<u64>,

        /// Length in sixteenth steps (default: one pass of the pattern)
        #[arg(long)]
        steps: Option<u64>,

        #[arg(short, long, default_value = "wordbeats.wav")]
        out: PathBuf,
    },

    /// Open the interactive player (default)
    Play {
        text: Option<String>,

        /// Where armed recordings are saved
        #[arg(long, default_value = ".")]
        record_dir: PathBuf,
    },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = cli.settings.resolve()?;

    match cli.command {
        Some(Command::Pattern { text }) => {
            init_logging(false)?;
            print_pattern(&text, &settings);
            Ok(())
        }
        Some(Command::Render {
            text,
            bars,
            steps,
            out,
        }) => {
            init_logging(false)?;
            render(&text, &settings, bars.map(|b| b * STEPS_PER_BAR).or(steps), out)
        }
        Some(Command::Play { text, record_dir }) => {
            init_logging(true)?;
            play(text.unwrap_or_default(), &settings, record_dir)
        }
        None => {
            init_logging(true)?;
            play(String::new(), &settings, PathBuf::from("."))
        }
    }
}

/// The TUI owns the terminal, so interactive sessions log to a file.
fn init_logging(to_file: bool) -> EyreResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if to_file {
        let file = File::create("wordbeats.log").wrap_err("failed to create wordbeats.log")?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().wrap_err("logger already initialized")?;
    Ok(())
}

fn print_pattern(text: &str, settings: &Settings) {
    let composition = compose(resolve_text(text), settings.scale);
    println!("text:    {}", composition.text());
    println!("pattern: {}", composition.pattern().grouped());
    let notes: Vec<String> = composition.notes().iter().map(|p| p.to_string()).collect();
    println!("melody:  {}", notes.join(" "));
    println!("scale:   {}", composition.scale());
}

fn render(text: &str, settings: &Settings, steps: Option<u64>, out: PathBuf) -> EyreResult<()> {
    let mut player = Player::new(OfflineEngine::new(settings.sample_rate));
    let session = player.play(PlayRequest {
        text,
        scale: settings.scale,
        tempo: settings.tempo,
        voices: &settings.voices,
        record: true,
    })?;

    let steps = steps.unwrap_or(session.composition().len() as u64) + TAIL_STEPS;
    let samples_per_step =
        StepClock::compute_samples_per_step(settings.tempo.bpm() as f64, settings.sample_rate as f64);
    let frames = (steps as f64 * samples_per_step).round() as usize;
    player.engine_mut().render(frames);

    let recording = player
        .stop()
        .ok_or_else(|| eyre!("renderer produced no recording"))?;
    recording
        .write_wav(&out)
        .wrap_err_with(|| format!("failed to write {}", out.display()))?;

    info!(
        "rendered {:.2}s of \"{}\" at {} to {}",
        recording.duration().as_secs_f32(),
        session.composition().text(),
        settings.tempo,
        out.display()
    );
    Ok(())
}

fn play(text: String, settings: &Settings, record_dir: PathBuf) -> EyreResult<()> {
    let (tap, audio_rx) = analyser_channel(TAP_CAPACITY);
    let engine = CpalEngine::open(tap)?;
    info!(
        "output: {} ({} ch, {} Hz)",
        engine.device_name(),
        engine.channels(),
        engine.sample_rate()
    );

    let controller = Controller::new(engine, AppState::new(text, settings), record_dir);
    let mut app = UiApp::new(controller, Visualizer::new(audio_rx));

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
