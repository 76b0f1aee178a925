use legend_config::language::LanguageConfig;
use legend_core::{Message, Session, Translation};
use legend_types::{AppEvent, DetectedLanguage, LanguageCode, MessageId, Role, SessionEvent};

use crate::ui::{Console, ConsoleCommand, format_message, parse_line};

#[test]
fn test_plain_lines_are_text() {
    assert_eq!(
        parse_line("Hola, ¿qué tal?"),
        ConsoleCommand::Text("Hola, ¿qué tal?".to_string())
    );
}

#[test]
fn test_slash_commands() {
    assert_eq!(parse_line("/detect"), ConsoleCommand::Detect);
    assert_eq!(parse_line("  /summarize  "), ConsoleCommand::Summarize);
    assert_eq!(
        parse_line("/translate 2"),
        ConsoleCommand::Translate(MessageId(2))
    );
    assert_eq!(
        parse_line("/target RU"),
        ConsoleCommand::Target(LanguageCode::new("ru"))
    );
    assert_eq!(parse_line("/quit"), ConsoleCommand::Quit);
    assert_eq!(parse_line("/exit"), ConsoleCommand::Quit);
}

#[test]
fn test_bad_commands() {
    assert!(matches!(parse_line("/translate x"), ConsoleCommand::Invalid(_)));
    assert!(matches!(parse_line("/translate"), ConsoleCommand::Invalid(_)));
    assert!(matches!(parse_line("/detect now"), ConsoleCommand::Invalid(_)));
    assert!(matches!(parse_line("/target es pt"), ConsoleCommand::Invalid(_)));
    assert!(matches!(parse_line("/frobnicate"), ConsoleCommand::Invalid(_)));
}

#[tokio::test]
async fn test_pending_text_feeds_commands_until_consumed() {
    let session = Session::new(LanguageConfig::default());
    let mut console = Console::new();

    let event = console
        .handle(ConsoleCommand::Text("first line".to_string()), &session)
        .await;
    assert!(event.is_none());
    console
        .handle(ConsoleCommand::Text("second line".to_string()), &session)
        .await;

    let event = console.handle(ConsoleCommand::Detect, &session).await;
    assert!(matches!(event, Some(AppEvent::Detect(ref text)) if text == "first line\nsecond line"));
    // Nothing consumed yet, the same text can still be summarized
    assert_eq!(console.pending(), "first line\nsecond line");

    console.render(SessionEvent::InputConsumed, &session).await;
    assert_eq!(console.pending(), "");
}

#[tokio::test]
async fn test_translate_unknown_message_stays_local() {
    let session = Session::new(LanguageConfig::default());
    let mut console = Console::new();

    let event = console
        .handle(ConsoleCommand::Translate(MessageId(7)), &session)
        .await;

    assert!(event.is_none());
}

#[tokio::test]
async fn test_target_and_quit_become_events() {
    let session = Session::new(LanguageConfig::default());
    let mut console = Console::new();

    let target = console
        .handle(ConsoleCommand::Target(LanguageCode::new("tr")), &session)
        .await;
    let quit = console.handle(ConsoleCommand::Quit, &session).await;

    assert!(matches!(target, Some(AppEvent::SelectTarget(ref code)) if code.as_str() == "tr"));
    assert!(matches!(quit, Some(AppEvent::Shutdown)));
}

#[test]
fn test_format_message_with_translation() {
    let languages = LanguageConfig::default();
    let mut message = Message {
        id: MessageId(0),
        text: "Hola\n".to_string(),
        role: Role::User,
        detected_language: DetectedLanguage::Known(LanguageCode::new("es")),
        translation: None,
    };

    assert_eq!(format_message(&languages, &message), "[0] you (Spanish): Hola");

    message.translation = Some(Translation {
        text: "Hello".to_string(),
        visible: true,
    });
    assert_eq!(
        format_message(&languages, &message),
        "[0] you (Spanish): Hola\n    -> Hello"
    );
}

#[test]
fn test_format_unknown_language() {
    let message = Message {
        id: MessageId(3),
        text: "Resumo".to_string(),
        role: Role::System,
        detected_language: DetectedLanguage::Unknown,
        translation: None,
    };

    assert_eq!(
        format_message(&LanguageConfig::default(), &message),
        "[3] summary (Unknown): Resumo"
    );
}

#[test]
fn test_visibility_commands() {
    assert_eq!(
        parse_line("/hide 1"),
        ConsoleCommand::SetTranslationVisible(MessageId(1), false)
    );
    assert_eq!(
        parse_line("/unhide 1"),
        ConsoleCommand::SetTranslationVisible(MessageId(1), true)
    );
    assert!(matches!(parse_line("/hide one"), ConsoleCommand::Invalid(_)));
}
