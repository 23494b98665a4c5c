use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dashboard_core::{update, AppState, Msg};
use dashboard_gateway::{GatewayHandle, ReqwestGateway};
use dashboard_logging::{dash_debug, dash_info};

use super::config::{AppConfig, Cli};
use super::effects::EffectRunner;
use super::persistence;
use super::ui::commands::{self, Command};
use super::ui::render::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Control {
    Show,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load(Cli::parse())?;
    dashboard_logging::initialize(config.log, config.log_level, &config.log_file);
    dash_info!(
        "backend {} downloads in {}",
        config.backend,
        config.download_dir.display()
    );

    let gateway = ReqwestGateway::new(config.gateway_settings())?;
    let handle = GatewayHandle::new(Arc::new(gateway), config.download_dir.clone())
        .context("starting gateway worker")?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (control_tx, control_rx) = mpsc::channel::<Control>();
    let runner = EffectRunner::new(handle, config.state_dir.clone(), msg_tx.clone());
    let mut shell = Shell::new(runner);

    if let Some(user) = persistence::load_remembered_user(&config.state_dir) {
        let _ = msg_tx.send(Msg::RememberedUserRestored(user));
    }

    shell.print();
    println!("type `help` for commands");
    spawn_input_thread(msg_tx, control_tx);

    loop {
        if let Ok(msg) = msg_rx.recv_timeout(POLL_INTERVAL) {
            shell.dispatch(msg);
        }
        while let Ok(msg) = msg_rx.try_recv() {
            shell.dispatch(msg);
        }
        for msg in shell.runner.drain_events() {
            shell.dispatch(msg);
        }
        match control_rx.try_recv() {
            Ok(Control::Show) => shell.needs_render = true,
            Ok(Control::Quit) | Err(mpsc::TryRecvError::Disconnected) => break,
            Err(mpsc::TryRecvError::Empty) => {}
        }
        if shell.needs_render {
            shell.print();
        }
    }

    dash_info!("shutting down");
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    needs_render: bool,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            needs_render: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_render = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn print(&mut self) {
        self.needs_render = false;
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", render(&self.state.view()));
        let _ = stdout.flush();
    }
}

fn spawn_input_thread(msg_tx: mpsc::Sender<Msg>, control_tx: mpsc::Sender<Control>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match commands::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Dispatch(msgs))) => {
                    for msg in msgs {
                        if msg_tx.send(msg).is_err() {
                            return;
                        }
                    }
                }
                Ok(Some(Command::Help)) => println!("{}", commands::HELP),
                Ok(Some(Command::Show)) => {
                    let _ = control_tx.send(Control::Show);
                }
                Ok(Some(Command::Quit)) => break,
                Err(err) => println!("{err}"),
            }
        }
        dash_debug!("input closed");
        let _ = control_tx.send(Control::Quit);
    });
}
