//! Planet Conquest - conquer the solar system one arithmetic problem at a time

mod catalog;
mod cinematic;
mod config;
mod error;
mod events;
mod hud;
mod invasion;
mod progression;
mod session;
mod state;

use anyhow::{Context, Result};
use catalog::Catalog;
use config::GameConfig;
use engine_core::{PhaseEvent, Time};
use hud::{HUDConfig, HUDSystem};
use input::{Command, ParseError};
use session::GameSession;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// How long the loop waits for input before advancing the scene.
const FRAME: Duration = Duration::from_millis(16);

fn load_catalog(config: &GameConfig) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path).with_context(|| format!("Failed to load planet catalog {:?}", path)),
        None => Ok(Catalog::solar_system()),
    }
}

/// Read stdin on its own thread so the scene keeps animating while the prompt waits.
fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn draw(session: &mut GameSession, hud: &HUDSystem) {
    for message in session.messages.drain() {
        println!("{}", hud.message_line(&message));
    }
    match hud.invasion_panel(session) {
        Some(panel) => print!("{}", panel),
        None => print!("{}", hud.screen_panel(session)),
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                     PLANET CONQUEST                      ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Answer questions to earn coins, spend coins to conquer  ║");
    println!("║  planets, and solve word problems to fight off invaders. ║");
    println!("║  Type `help` at any time for the command list.           ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    if !GameConfig::file_exists() {
        config.save();
        log::info!("Wrote default config.ron");
    }
    let catalog = load_catalog(&config)?;
    let hud = HUDSystem::new(HUDConfig {
        show_glyphs: config.show_glyphs,
        ..HUDConfig::default()
    });

    log::info!("Starting Planet Conquest");
    let mut session = GameSession::new(config, catalog);
    let lines = spawn_line_reader();
    let mut time = Time::new();
    draw(&mut session, &hud);

    loop {
        match lines.recv_timeout(FRAME) {
            Ok(line) => {
                match Command::parse(&line) {
                    Ok(command) => {
                        let changes_state = !command.is_view_toggle();
                        if session.handle_command(command, &hud) {
                            break;
                        }
                        if changes_state {
                            print!("{}", hud.status_panel(&session));
                        }
                    }
                    Err(ParseError::Empty) => {}
                    Err(err) => session.messages.warning(err.to_string()),
                }
                draw(&mut session, &hud);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        time.update();
        let steps = time.drain_fixed_steps();
        for event in session.tick(time.delta_seconds(), steps) {
            if let PhaseEvent::Enter(_) = event {
                if let Some(line) = hud.flyby_line(&session) {
                    println!("\n{}", line);
                }
            }
        }
    }

    log::info!(
        "Leaving with {} coins and {} planets",
        session.progress().coins(),
        session.progress().empire().len()
    );
    Ok(())
}
