use std::io::BufRead;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use legend_config::language::LanguageConfig;
use legend_core::{Message, Session};
use legend_types::{AppEvent, DetectedLanguage, LanguageCode, MessageId, Role, SessionEvent};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
Type text, then:
  /detect            detect the language of the pending text
  /summarize         summarize the pending text
  /translate <id>    translate message <id> into the target language
  /hide <id>         hide the translation of message <id>
  /unhide <id>       show it again
  /target <code>     select the target language
  /show              print the conversation
  /status            print capability and session status
  /quit              exit";

/// One line typed at the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Text(String),
    Detect,
    Summarize,
    Translate(MessageId),
    SetTranslationVisible(MessageId, bool),
    Target(LanguageCode),
    Show,
    Status,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> ConsoleCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return ConsoleCommand::Text(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    if parts.next().is_some() {
        return ConsoleCommand::Invalid(format!("Too many arguments: {trimmed}"));
    }

    match (name, arg) {
        ("detect", None) => ConsoleCommand::Detect,
        ("summarize", None) => ConsoleCommand::Summarize,
        ("translate", Some(id)) => match parse_id(id) {
            Ok(id) => ConsoleCommand::Translate(id),
            Err(invalid) => invalid,
        },
        ("hide" | "unhide", Some(id)) => match parse_id(id) {
            Ok(id) => ConsoleCommand::SetTranslationVisible(id, name == "unhide"),
            Err(invalid) => invalid,
        },
        ("target", Some(code)) => ConsoleCommand::Target(LanguageCode::new(code.to_lowercase())),
        ("show", None) => ConsoleCommand::Show,
        ("status", None) => ConsoleCommand::Status,
        ("help", None) => ConsoleCommand::Help,
        ("quit" | "exit", None) => ConsoleCommand::Quit,
        _ => ConsoleCommand::Invalid(format!("Unknown command: {trimmed}")),
    }
}

fn parse_id(id: &str) -> Result<MessageId, ConsoleCommand> {
    id.parse()
        .map(MessageId)
        .map_err(|_| ConsoleCommand::Invalid(format!("Not a message id: {id}")))
}

pub fn format_message(languages: &LanguageConfig, message: &Message) -> String {
    let role = match message.role {
        Role::User => "you",
        Role::System => "summary",
    };
    let mut out = format!(
        "[{}] {} ({}): {}",
        message.id,
        role,
        languages.display_name(&message.detected_language),
        message.text.trim_end()
    );

    if let Some(translation) = message.translation.as_ref().filter(|t| t.visible) {
        out.push_str(&format!("\n    -> {}", translation.text));
    }

    out
}

/// Console state: the text typed since the last consumed input
#[derive(Debug, Default)]
pub struct Console {
    pending: String,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Turn a console command into an app event, handling local ones in place
    pub async fn handle(&mut self, command: ConsoleCommand, session: &Session) -> Option<AppEvent> {
        match command {
            ConsoleCommand::Text(line) => {
                if !self.pending.is_empty() {
                    self.pending.push('\n');
                }
                self.pending.push_str(&line);
                None
            }
            ConsoleCommand::Detect => Some(AppEvent::Detect(self.pending.clone())),
            ConsoleCommand::Summarize => Some(AppEvent::Summarize(self.pending.clone())),
            ConsoleCommand::Translate(id) => match session.message(id).await {
                Some(message) => Some(AppEvent::Translate {
                    id,
                    source: message.detected_language,
                }),
                None => {
                    println!("No message with id {id}.");
                    None
                }
            },
            ConsoleCommand::SetTranslationVisible(id, visible) => {
                Some(AppEvent::SetTranslationVisible { id, visible })
            }
            ConsoleCommand::Target(code) => Some(AppEvent::SelectTarget(code)),
            ConsoleCommand::Show => {
                for message in session.conversation().await {
                    println!("{}", format_message(session.languages(), &message));
                }
                None
            }
            ConsoleCommand::Status => {
                let readiness = session.readiness().await;
                let target = session.target().await;
                println!(
                    "detector: {}, translators: {}, summarizer: {}",
                    readiness.detector, readiness.translators, readiness.summarizer
                );
                println!(
                    "target: {} ({}), loading: {}",
                    target,
                    session.languages().display_name(&DetectedLanguage::Known(target.clone())),
                    session.is_loading()
                );
                if let Some(error) = session.last_error().await {
                    println!("error: {error}");
                }
                None
            }
            ConsoleCommand::Help => {
                println!("{HELP}");
                None
            }
            ConsoleCommand::Quit => Some(AppEvent::Shutdown),
            ConsoleCommand::Invalid(reason) => {
                println!("{reason}");
                None
            }
        }
    }

    /// React to a state change published by the session
    pub async fn render(&mut self, event: SessionEvent, session: &Session) {
        match event {
            SessionEvent::ReadinessChanged(readiness) => {
                tracing::debug!("Readiness: {:?}", readiness);
                if readiness.is_ready() && readiness.translators == 0 {
                    println!("AI Services Ready, no translators yet");
                } else if readiness.is_ready() {
                    println!("AI Services Ready ({} translators)", readiness.translators);
                }
            }
            SessionEvent::MessageAppended(id) | SessionEvent::TranslationUpdated(id) => {
                if let Some(message) = session.message(id).await {
                    println!("{}", format_message(session.languages(), &message));
                }
            }
            SessionEvent::InputConsumed => self.pending.clear(),
            SessionEvent::LoadingChanged(true) => println!("..."),
            SessionEvent::LoadingChanged(false) => {}
            SessionEvent::ErrorChanged(Some(error)) => println!("! {error}"),
            SessionEvent::ErrorChanged(None) => {}
            SessionEvent::TargetChanged(code) => println!(
                "Target language: {}",
                session.languages().display_name(&DetectedLanguage::Known(code))
            ),
        }
    }
}

/// Stdin is read on a plain thread, a blocked read never holds up shutdown
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        tracing::debug!("Stdin closed");
    });

    rx.to_async()
}

pub async fn ui_loop(
    session: Arc<Session>,
    app_to_ui_rx: AsyncReceiver<SessionEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let lines = spawn_stdin_reader();
    let mut console = Console::new();

    if atty::is(atty::Stream::Stdin) {
        println!("Initializing AI services...");
        println!("{HELP}");
    }

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Ok(line) = line else {
                    tracing::info!("[UI] Input closed, shutting down");
                    ui_to_app_tx.send(AppEvent::Shutdown).await?;
                    return Ok(());
                };
                let command = parse_line(&line);
                if let Some(event) = console.handle(command, &session).await {
                    ui_to_app_tx.send(event).await?;
                }
            }
            event = app_to_ui_rx.recv() => {
                console.render(event?, &session).await;
            }
            _ = cancel.cancelled() => {
                tracing::info!("[UI] Cancelled, stopping");
                return Ok(());
            }
        }
    }
}
