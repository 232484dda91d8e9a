use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use desk_logging::desk_info;
use jobdesk_core::{update, AppState, Msg};
use jobdesk_tms::StoredSessionSource;

use crate::config::{AppConfig, CONFIG_FILENAME};
use crate::effects::EffectRunner;
use crate::ui::{input, render};

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILENAME));
    let settings = config.client_settings();
    desk_info!("Job desk starting against {}", settings.base_url);

    let session = Arc::new(StoredSessionSource::new(
        &config.session_file,
        settings.base_url.clone(),
    ));

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(settings, session, msg_tx.clone())?;

    let quit = Arc::new(AtomicBool::new(false));
    spawn_input_thread(msg_tx, quit.clone());

    render::print_lines(&render::help_banner());

    let mut state = AppState::new();
    render::print_lines(&render::render(&state.view()));

    while !quit.load(Ordering::Relaxed) {
        let Ok(msg) = msg_rx.recv() else {
            break;
        };
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.enqueue(effects);
        if state.consume_dirty() {
            render::print_lines(&render::render(&state.view()));
        }
    }

    desk_info!("Job desk exiting");
    Ok(())
}

fn spawn_input_thread(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    quit.store(true, Ordering::Relaxed);
                    let _ = msg_tx.send(Msg::NoOp);
                    break;
                }
                Ok(_) => {}
            }
            match input::parse(&line) {
                None => {}
                Some(input::Action::Dispatch(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Some(input::Action::Help) => render::print_lines(&render::help_banner()),
                Some(input::Action::Quit) => {
                    quit.store(true, Ordering::Relaxed);
                    let _ = msg_tx.send(Msg::NoOp);
                    break;
                }
                Some(input::Action::Invalid(reason)) => println!("{reason}"),
            }
        }
    });
}
