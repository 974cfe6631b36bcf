use colored::Color;
use rand::seq::IndexedRandom;
use std::sync::LazyLock;

#[derive(Clone, Debug)]
pub struct ColoredMessage {
    pub text: String,
    pub color: Color,
}

impl ColoredMessage {
    fn from_static(text: &'static str, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color,
        }
    }
}

macro_rules! messages {
    ($($text:expr => $color:expr),+ $(,)?) => {
        vec![
            $(ColoredMessage::from_static($text, $color)),+
        ]
    };
}

static PUSH_MESSAGES: LazyLock<Vec<ColoredMessage>> = LazyLock::new(|| {
    messages![
        "Pushing commits upstream..." => Color::Cyan,
        "Packing objects for the trip..." => Color::Magenta,
        "Negotiating refs with the remote..." => Color::Blue,
        "Shipping your history..." => Color::Green,
        "Handing commits to the remote..." => Color::Yellow,
        "Waiting for the remote to accept the update..." => Color::BrightCyan,
        "Syncing the branch tip..." => Color::BrightMagenta,
    ]
});

static FALLBACK: LazyLock<ColoredMessage> =
    LazyLock::new(|| ColoredMessage::from_static("Pushing...", Color::Cyan));

/// Random line shown next to the spinner while a push runs
pub fn get_push_message() -> &'static ColoredMessage {
    PUSH_MESSAGES.choose(&mut rand::rng()).unwrap_or(&FALLBACK)
}
