use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use bazar_logging::{bazar_info, bazar_warn};
use listing_core::{update, AuthCollaborator, Msg, WizardSession};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::persistence::AuthSessionStore;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::render;

const TICK: Duration = Duration::from_millis(75);
const SHUTDOWN_WAIT: Duration = Duration::from_secs(30);

pub fn run_app() -> anyhow::Result<()> {
    let config = match AppConfig::load(Path::new(CONFIG_FILENAME)) {
        Ok(config) => {
            logging::initialize(config.log_destination, config.log_level());
            config
        }
        Err(err) => {
            let config = AppConfig::default();
            logging::initialize(config.log_destination, config.log_level());
            bazar_warn!("{}; using defaults", err);
            config
        }
    };

    let auth = AuthSessionStore::load(config.state_dir.clone());
    let effects = EffectRunner::new(&config)?;
    let mut app = App {
        auth,
        effects,
        wizard: None,
    };

    // Stdin is read on its own thread so engine completions keep arriving
    // while the prompt waits for input.
    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("Campus Bazar. Type `help` for commands.");
    app.greet();
    prompt();
    loop {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => {
                if !app.handle_line(&line) {
                    break;
                }
                prompt();
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                app.finish_pending();
                break;
            }
        }
        if app.drain_engine() {
            prompt();
        }
    }

    app.shutdown();
    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

struct App {
    auth: AuthSessionStore,
    effects: EffectRunner,
    wizard: Option<WizardSession>,
}

impl App {
    fn greet(&self) {
        match self.auth.current_user() {
            Some(user) => println!("Signed in as {} ({}).", user.name, user.university),
            None => println!("Not signed in. Use `login <id> <name> <university>`."),
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return true,
            Err(err) => {
                println!("{err}");
                return true;
            }
        };

        match command {
            Command::Wizard(msg) => self.dispatch(msg),
            Command::NewListing => self.open_wizard(),
            Command::Login(user) => {
                if let Err(err) = self.auth.login(user) {
                    println!("Could not save the session: {err}");
                }
                self.greet();
            }
            Command::Logout => {
                self.dispatch(Msg::Dismissed);
                if let Err(err) = self.auth.logout() {
                    println!("Could not clear the session: {err}");
                }
                self.greet();
            }
            Command::Show => match &self.wizard {
                Some(session) => print_lines(&render(&session.view())),
                None => println!("No listing in progress. Type `new` to start one."),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    fn open_wizard(&mut self) {
        if self.wizard.is_some() {
            println!("A listing is already in progress. `cancel` it first.");
            return;
        }
        match WizardSession::open(&self.auth) {
            Some(mut session) => {
                bazar_info!("Create-listing wizard opened");
                session.consume_dirty();
                print_lines(&render(&session.view()));
                self.wizard = Some(session);
            }
            None => println!("Please log in to create a listing (redirecting to /login)."),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let Some(session) = self.wizard.take() else {
            if msg.is_user_action() {
                println!("No listing in progress. Type `new` to start one.");
            }
            return;
        };
        bazar_logging::next_dispatch_seq();

        let (mut session, effects) = update(session, msg);
        let navigations = self.effects.enqueue(effects);
        if session.consume_dirty() {
            print_lines(&render(&session.view()));
        }
        for listing_id in &navigations {
            println!("Navigating to /listing/{listing_id}");
        }

        if session.is_closed() || !navigations.is_empty() {
            bazar_info!(
                "Wizard finished, live previews={}",
                self.effects.live_previews()
            );
            self.effects.retire_session();
            return;
        }
        self.wizard = Some(session);
    }

    /// Feeds engine completions into the wizard. Returns true if anything arrived.
    fn drain_engine(&mut self) -> bool {
        let inbox = self.effects.poll_events();
        let arrived = !inbox.is_empty();
        for msg in inbox {
            self.dispatch(msg);
        }
        arrived
    }

    fn finish_pending(&mut self) {
        let pending = self
            .wizard
            .as_ref()
            .is_some_and(WizardSession::is_pending);
        if !pending {
            return;
        }
        match self.effects.wait_event(SHUTDOWN_WAIT) {
            Some(msg) => self.dispatch(msg),
            None => bazar_warn!("Submission still pending at shutdown"),
        }
    }

    fn shutdown(&mut self) {
        self.dispatch(Msg::Dismissed);
        let leaked = self.effects.live_previews();
        if leaked > 0 {
            bazar_warn!("{} previews still live at shutdown", leaked);
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
