//! Private conversations.

use super::uid::WindowId;
use super::window::{HasWindow, Window};

/// A one-to-one conversation; the window name is the peer's nickname.
#[derive(Debug, Clone)]
pub struct Query {
    window: Window,
}

impl Query {
    pub fn new(id: impl Into<WindowId>, nickname: impl Into<String>) -> Self {
        let nickname = nickname.into();
        let mut window = Window::new(id, nickname.clone());
        window.set_title(nickname);
        Self { window }
    }

    pub fn nickname(&self) -> &str {
        self.window.name()
    }

    /// Follow the peer's nick change.
    pub fn rename(&mut self, nickname: impl Into<String>) {
        let nickname = nickname.into();
        self.window.set_title(nickname.clone());
        self.window.set_name(nickname);
    }
}

impl HasWindow for Query {
    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}
