use std::any::TypeId;
use std::sync::Arc;

use iced::futures::sink::SinkExt as _;
use iced::{Element, Subscription, Task, Theme, stream};
use tokio::sync::{Mutex as TokioMutex, mpsc};

use crate::chat::ChatManager;
use crate::config::ConfigManager;
use crate::feed::{FeedKind, FeedManager};
use crate::models::PeerId;
use crate::session::SessionManager;
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::screens::{
    ChatListScreen, DeveloperChatMessage, DeveloperChatScreen, FavoritesScreen, HomeMessage,
    HomeScreen, MyPageMessage, MyPageScreen, RecommendationScreen,
};
use crate::ui::theme::ThemePreference;
use crate::ui::{UiEvent, UiEventListener};

enum CurrentScreen {
    Home(HomeScreen),
    Recommendation(RecommendationScreen),
    ChatList(ChatListScreen),
    Favorites(FavoritesScreen),
    MyPage(MyPageScreen),
    Developer(DeveloperChatScreen),
}

pub struct AppContext {
    pub config: Arc<ConfigManager>,
    pub session: Arc<SessionManager>,
    pub feed_manager: Arc<FeedManager>,
    pub chat_manager: Arc<ChatManager>,
    pub theme: ThemePreference,
    pub ui_event_rx: Arc<TokioMutex<mpsc::Receiver<UiEvent>>>,
}

impl AppContext {
    fn new() -> Self {
        let (ui_event_tx, ui_event_rx) = mpsc::channel(100);
        let listener = Arc::new(UiEventListener::new(ui_event_tx));
        let config = Arc::new(ConfigManager::new().unwrap_or_else(|err| {
            tracing::warn!(
                ?err,
                "Cannot resolve the config directory, using the working directory"
            );
            ConfigManager::with_path("encore-config.json")
        }));
        let theme = config.load().theme;
        let session = Arc::new(SessionManager::new(config.clone()));
        let feed_manager = Arc::new(FeedManager::with_listener(listener.clone()));
        let chat_manager = Arc::new(ChatManager::with_listener(listener));
        Self {
            config,
            session,
            feed_manager,
            chat_manager,
            theme,
            ui_event_rx: Arc::new(TokioMutex::new(ui_event_rx)),
        }
    }
}

pub struct EncoreApp {
    screen: CurrentScreen,
    ctx: AppContext,
    theme: Theme,
}

impl EncoreApp {
    /// Helper method to handle ScreenCommand and convert to Task<AppMessage>
    fn handle_screen_command<M, F>(&mut self, cmd: ScreenCommand<M>, wrap: F) -> Task<AppMessage>
    where
        M: Send + 'static,
        F: Fn(M) -> AppMessage + 'static + Send + Sync + Clone,
    {
        match cmd {
            ScreenCommand::None => Task::none(),
            ScreenCommand::Message(task) => task.map(wrap),
            ScreenCommand::ChangeScreen(screen_type) => self.switch_screen(screen_type),
        }
    }

    /// Replace the current screen and start the task that loads its data.
    fn switch_screen(&mut self, screen_type: ScreenType) -> Task<AppMessage> {
        match screen_type {
            ScreenType::Home => {
                self.screen = CurrentScreen::Home(HomeScreen::new(
                    self.ctx.chat_manager.online_peers(),
                ));
                let chats = self.ctx.chat_manager.clone();
                Task::perform(
                    async move {
                        let chat = chats.open_chat(PeerId::Assistant).await;
                        chat.history().await.unwrap_or_else(|err| {
                            tracing::error!(%err, "Cannot load assistant history");
                            Vec::new()
                        })
                    },
                    |messages| AppMessage::Home(HomeMessage::HistoryLoaded(messages)),
                )
            }
            ScreenType::Recommendation => {
                self.screen = CurrentScreen::Recommendation(RecommendationScreen::new());
                Task::none()
            }
            ScreenType::ChatList => {
                self.screen = CurrentScreen::ChatList(ChatListScreen::new());
                let feeds = self.ctx.feed_manager.clone();
                Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::General).await;
                        if let Err(err) = feed.refresh().await {
                            tracing::error!(%err, "Cannot refresh the chat feed");
                        }
                    },
                    |_| AppMessage::Tick,
                )
            }
            ScreenType::Favorites => {
                self.screen = CurrentScreen::Favorites(FavoritesScreen::new());
                let feeds = self.ctx.feed_manager.clone();
                Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::Favorites).await;
                        if let Err(err) = feed.refresh().await {
                            tracing::error!(%err, "Cannot refresh the favorites feed");
                        }
                    },
                    |_| AppMessage::Tick,
                )
            }
            ScreenType::MyPage => {
                self.screen = CurrentScreen::MyPage(MyPageScreen::new(self.ctx.theme));
                let session = self.ctx.session.clone();
                Task::perform(async move { session.profile().await }, |profile| {
                    AppMessage::MyPage(MyPageMessage::ProfileLoaded(profile))
                })
            }
            ScreenType::DeveloperChat => {
                self.screen = CurrentScreen::Developer(DeveloperChatScreen::new());
                let chats = self.ctx.chat_manager.clone();
                Task::perform(
                    async move {
                        let chat = chats.open_chat(PeerId::Developer).await;
                        chat.history().await.unwrap_or_else(|err| {
                            tracing::error!(%err, "Cannot load developer history");
                            Vec::new()
                        })
                    },
                    |messages| {
                        AppMessage::Developer(DeveloperChatMessage::HistoryLoaded(messages))
                    },
                )
            }
        }
    }
}

#[derive(Clone)]
pub enum AppMessage {
    // Wrapped screen messages
    Home(crate::ui::screens::HomeMessage),
    Recommendation(crate::ui::screens::RecommendationMessage),
    ChatList(crate::ui::screens::ChatListMessage),
    Favorites(crate::ui::screens::FavoritesMessage),
    MyPage(crate::ui::screens::MyPageMessage),
    Developer(crate::ui::screens::DeveloperChatMessage),
    // UI events from subscription
    UiEvent(UiEvent),
    Tick,
}

impl std::fmt::Debug for AppMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppMessage::Home(_) => write!(f, "Home(<msg>)"),
            AppMessage::Recommendation(_) => write!(f, "Recommendation(<msg>)"),
            AppMessage::ChatList(_) => write!(f, "ChatList(<msg>)"),
            AppMessage::Favorites(_) => write!(f, "Favorites(<msg>)"),
            AppMessage::MyPage(_) => write!(f, "MyPage(<msg>)"),
            AppMessage::Developer(_) => write!(f, "Developer(<msg>)"),
            AppMessage::UiEvent(_) => write!(f, "UiEvent(<event>)"),
            AppMessage::Tick => write!(f, "Tick"),
        }
    }
}

impl EncoreApp {
    pub fn new() -> (Self, Task<AppMessage>) {
        let ctx = AppContext::new();
        let theme = ctx.theme.to_iced_theme();
        let mut app = Self {
            screen: CurrentScreen::Home(HomeScreen::new(Vec::new())),
            ctx,
            theme,
        };
        let task = app.switch_screen(ScreenType::Home);
        (app, task)
    }

    pub fn subscription(&self) -> Subscription<AppMessage> {
        // Create subscriptions vector
        let mut subscriptions = vec![];
        // Add UI event subscription
        let event_rx = self.ctx.ui_event_rx.clone();
        let ui_event_sub = stream::channel(100, move |mut output| async move {
            loop {
                let mut rx = event_rx.lock().await;
                match rx.recv().await {
                    Some(event) => {
                        let _ = output.send(AppMessage::UiEvent(event)).await;
                    }
                    None => {
                        break;
                    }
                }
            }
        });
        subscriptions.push(Subscription::run_with_id(
            TypeId::of::<UiEvent>(),
            ui_event_sub,
        ));
        // Keep tick subscription for compatibility
        subscriptions.push(
            iced::time::every(std::time::Duration::from_millis(250)).map(|_| AppMessage::Tick),
        );
        Subscription::batch(subscriptions)
    }

    pub fn title(&self) -> String {
        match self.screen {
            CurrentScreen::Home(_) => "Encore".to_string(),
            CurrentScreen::Recommendation(_) => "Encore: Recommendations".to_string(),
            CurrentScreen::ChatList(_) => "Encore: All Chats".to_string(),
            CurrentScreen::Favorites(_) => "Encore: Favorites".to_string(),
            CurrentScreen::MyPage(_) => "Encore: My Page".to_string(),
            CurrentScreen::Developer(_) => "Encore: Developer".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn update(&mut self, message: AppMessage) -> Task<AppMessage> {
        let task = match (&mut self.screen, message) {
            // Route UI events from the subscription into the current screen
            (_, AppMessage::UiEvent(event)) => match &mut self.screen {
                CurrentScreen::Home(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::Home)
                }
                CurrentScreen::Recommendation(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::Recommendation)
                }
                CurrentScreen::ChatList(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::ChatList)
                }
                CurrentScreen::Favorites(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::Favorites)
                }
                CurrentScreen::MyPage(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::MyPage)
                }
                CurrentScreen::Developer(screen) => {
                    let cmd = screen.handle_ui_event(event, &mut self.ctx);
                    self.handle_screen_command(cmd, AppMessage::Developer)
                }
            },
            (CurrentScreen::Home(screen), AppMessage::Home(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Home)
            }
            (CurrentScreen::Recommendation(screen), AppMessage::Recommendation(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Recommendation)
            }
            (CurrentScreen::ChatList(screen), AppMessage::ChatList(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::ChatList)
            }
            (CurrentScreen::Favorites(screen), AppMessage::Favorites(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Favorites)
            }
            (CurrentScreen::MyPage(screen), AppMessage::MyPage(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::MyPage)
            }
            (CurrentScreen::Developer(screen), AppMessage::Developer(msg)) => {
                let cmd = screen.update(msg, &mut self.ctx);
                self.handle_screen_command(cmd, AppMessage::Developer)
            }
            // Tick keeps the runtime polling even when nothing else fires
            (_, AppMessage::Tick) => Task::none(),
            // Ignore unmatched pairs
            _ => Task::none(),
        };
        // A screen may have flipped the theme preference during update.
        self.theme = self.ctx.theme.to_iced_theme();
        task
    }

    pub fn view(&self) -> Element<'_, AppMessage> {
        match &self.screen {
            CurrentScreen::Home(screen) => screen.view(&self.theme).map(AppMessage::Home),
            CurrentScreen::Recommendation(screen) => {
                screen.view(&self.theme).map(AppMessage::Recommendation)
            }
            CurrentScreen::ChatList(screen) => screen.view(&self.theme).map(AppMessage::ChatList),
            CurrentScreen::Favorites(screen) => {
                screen.view(&self.theme).map(AppMessage::Favorites)
            }
            CurrentScreen::MyPage(screen) => screen.view(&self.theme).map(AppMessage::MyPage),
            CurrentScreen::Developer(screen) => {
                screen.view(&self.theme).map(AppMessage::Developer)
            }
        }
    }
}
