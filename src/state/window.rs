//! The window shared by the session log, channels and queries.

use super::message::{Message, MessageKind};
use super::uid::WindowId;

/// Read/unread state of a window as shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    #[default]
    Read,
    Active,
    UnreadMessage,
    UnreadEvent,
    UnreadHighlight,
}

impl WindowState {
    fn urgency(self) -> u8 {
        match self {
            Self::Read | Self::Active => 0,
            Self::UnreadEvent => 1,
            Self::UnreadMessage => 2,
            Self::UnreadHighlight => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Active => "active",
            Self::UnreadMessage => "message",
            Self::UnreadEvent => "event",
            Self::UnreadHighlight => "highlight",
        }
    }
}

/// A message log with a name, title and unread state.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    name: String,
    title: String,
    messages: Vec<Message>,
    state: WindowState,
}

impl Window {
    pub fn new(id: impl Into<WindowId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            messages: Vec::new(),
            state: WindowState::Read,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == WindowState::Active
    }

    pub fn set_active(&mut self, active: bool) {
        self.state = if active {
            WindowState::Active
        } else {
            WindowState::Read
        };
    }

    /// Append a line, raising the unread state unless the window is active.
    /// The state never drops back: a pending highlight outranks later chat.
    pub fn add_message(&mut self, message: Message) {
        if self.state != WindowState::Active {
            let incoming = match message.kind() {
                MessageKind::Event(_) | MessageKind::Error => WindowState::UnreadEvent,
                MessageKind::Normal | MessageKind::Action | MessageKind::Notice => {
                    WindowState::UnreadMessage
                }
                MessageKind::Highlight
                | MessageKind::HighlightAction
                | MessageKind::HighlightNotice => WindowState::UnreadHighlight,
            };
            if incoming.urgency() > self.state.urgency() {
                self.state = incoming;
            }
        }
        self.messages.push(message);
    }
}

/// Anything that owns a [`Window`].
pub trait HasWindow {
    fn window(&self) -> &Window;
    fn window_mut(&mut self) -> &mut Window;

    fn id(&self) -> &str {
        self.window().id()
    }

    fn name(&self) -> &str {
        self.window().name()
    }

    fn add_message(&mut self, message: Message) {
        self.window_mut().add_message(message);
    }
}

impl HasWindow for Window {
    fn window(&self) -> &Window {
        self
    }

    fn window_mut(&mut self) -> &mut Window {
        self
    }
}
