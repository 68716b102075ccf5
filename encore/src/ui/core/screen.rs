use iced::{Element, Task, Theme};
use std::fmt::Debug;

use crate::ui::{AppContext, UiEvent};

/// Command returned from screen update methods
pub enum ScreenCommand<M> {
    /// No action needed
    None,
    /// Execute a command with screen's message type
    Message(Task<M>),
    /// Switch to a different screen
    ChangeScreen(ScreenType),
}

/// Types of screens for navigation
#[derive(Debug, Clone)]
pub enum ScreenType {
    /// Assistant conversation plus the online roster strip
    Home,
    /// Picks produced by the finished conversation
    Recommendation,
    /// Paginated list of every recommendation chat
    ChatList,
    /// Paginated list of favorite chats
    Favorites,
    /// Profile, settings and account actions
    MyPage,
    /// Support conversation with the developer
    DeveloperChat,
}

/// Base trait for all application screens
pub trait Screen {
    type Message: Debug + Clone + Send + 'static;

    fn update(&mut self, message: Self::Message, ctx: &mut AppContext)
    -> ScreenCommand<Self::Message>;

    fn handle_ui_event(
        &mut self,
        _event: UiEvent,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        ScreenCommand::None
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Self::Message>;
}
