use encore_feed::Record;
use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

use crate::feed::FeedKind;
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent, icons};

/// Relative scroll offset past which the next page is requested.
const LOAD_MORE_THRESHOLD: f32 = 0.92;

pub struct ChatListScreen {
    records: Vec<Record>,
    search_text: String,
    active_query: String,
    loading: bool,
    has_more: bool,
    loaded_once: bool,
    scrollable_id: scrollable::Id,
}

#[derive(Clone, Debug)]
pub enum ChatListMessage {
    Back,
    SearchInputChanged(String),
    SearchSubmit,
    Scrolled(f32),
    FeedCommandDone(Result<(), String>),
    ToggleFavorite(u32),
    ShareRecord(u32),
    DeleteRecord(u32),
}

impl ChatListScreen {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            search_text: String::new(),
            active_query: String::new(),
            loading: false,
            has_more: true,
            loaded_once: false,
            scrollable_id: scrollable::Id::unique(),
        }
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, ChatListMessage> {
        let back_button = button(icons::icon(
            icons::BACK_ICON,
            18.0,
            colors::text_primary(theme),
        ))
        .on_press(ChatListMessage::Back)
        .padding(8)
        .style(styles::button_icon);
        let header = row![
            back_button,
            text(FeedKind::General.title())
                .size(20)
                .color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
        ]
        .spacing(12)
        .align_y(Alignment::Center);
        container(header)
            .width(Length::Fill)
            .padding(16)
            .style(styles::panel_header)
            .into()
    }

    fn build_search_bar<'a>(&'a self, theme: &'a Theme) -> Element<'a, ChatListMessage> {
        let input = text_input("Search by song title or artist...", &self.search_text)
            .on_input(ChatListMessage::SearchInputChanged)
            .on_submit(ChatListMessage::SearchSubmit)
            .padding(10)
            .size(14)
            .width(Length::Fill);
        let search_button = button(
            row![
                icons::icon(icons::SEARCH_ICON, 16.0, colors::text_on_primary(theme)),
                text("Search").size(14),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .on_press(ChatListMessage::SearchSubmit)
        .padding([8, 16])
        .style(button::primary);
        container(
            row![input, search_button]
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding([8, 16])
        .into()
    }

    fn build_record_card<'a>(
        &'a self,
        record: &'a Record,
        theme: &'a Theme,
    ) -> Element<'a, ChatListMessage> {
        let thumbnail = container(icons::icon(
            icons::MUSIC_NOTE_ICON,
            24.0,
            colors::primary(theme),
        ))
        .width(Length::Fixed(56.0))
        .height(Length::Fixed(56.0))
        .center_x(Length::Fixed(56.0))
        .center_y(Length::Fixed(56.0))
        .style(styles::thumbnail);
        let info = column![
            text(format!("{} - {}", record.title, record.artist))
                .size(14)
                .color(colors::text_primary(theme)),
            text(&record.date).size(11).color(colors::text_muted(theme)),
        ]
        .spacing(3)
        .width(Length::Fill);
        let (star_source, star_color) = if record.favorite {
            (icons::STAR_FILLED_ICON, colors::primary(theme))
        } else {
            (icons::STAR_ICON, colors::text_secondary(theme))
        };
        let actions = row![
            button(icons::icon(star_source, 16.0, star_color))
                .on_press(ChatListMessage::ToggleFavorite(record.id))
                .padding(6)
                .style(styles::button_icon),
            button(icons::icon(
                icons::SHARE_ICON,
                16.0,
                colors::text_secondary(theme)
            ))
            .on_press(ChatListMessage::ShareRecord(record.id))
            .padding(6)
            .style(styles::button_icon),
            button(icons::icon(
                icons::TRASH_ICON,
                16.0,
                colors::text_error(theme)
            ))
            .on_press(ChatListMessage::DeleteRecord(record.id))
            .padding(6)
            .style(styles::button_icon),
        ]
        .spacing(4);
        container(
            row![thumbnail, info, actions]
                .spacing(12)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(12)
        .style(styles::card)
        .into()
    }

    fn build_body<'a>(&'a self, theme: &'a Theme) -> Element<'a, ChatListMessage> {
        if !self.loaded_once {
            return container(text("Loading...").size(14).color(colors::text_muted(theme)))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        }
        if self.records.is_empty() {
            let label = if self.active_query.is_empty() {
                "No chats yet."
            } else {
                "No search results."
            };
            return container(text(label).size(14).color(colors::text_muted(theme)))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        }
        let mut records = column![].spacing(10);
        for record in &self.records {
            records = records.push(self.build_record_card(record, theme));
        }
        if self.loading {
            records = records.push(
                text("Loading...")
                    .size(12)
                    .color(colors::text_muted(theme))
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            );
        } else if !self.has_more {
            records = records.push(
                text("All chats loaded.")
                    .size(12)
                    .color(colors::text_muted(theme))
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            );
        }
        scrollable(container(records).padding(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .id(self.scrollable_id.clone())
            .on_scroll(|viewport| ChatListMessage::Scrolled(viewport.relative_offset().y))
            .into()
    }
}

impl Screen for ChatListScreen {
    type Message = ChatListMessage;

    fn update(
        &mut self,
        message: Self::Message,
        ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match message {
            ChatListMessage::Back => ScreenCommand::ChangeScreen(ScreenType::MyPage),
            ChatListMessage::SearchInputChanged(value) => {
                self.search_text = value;
                ScreenCommand::None
            }
            ChatListMessage::SearchSubmit => {
                let query = self.search_text.trim().to_string();
                self.active_query = query.clone();
                self.loading = true;
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::General).await;
                        feed.search(query).await.map_err(|err| err.to_string())
                    },
                    ChatListMessage::FeedCommandDone,
                ))
            }
            ChatListMessage::Scrolled(offset) => {
                if offset >= LOAD_MORE_THRESHOLD
                    && self.loaded_once
                    && self.has_more
                    && !self.loading
                {
                    self.loading = true;
                    let feeds = ctx.feed_manager.clone();
                    ScreenCommand::Message(Task::perform(
                        async move {
                            let feed = feeds.open_feed(FeedKind::General).await;
                            feed.load_next_page().await.map_err(|err| err.to_string())
                        },
                        ChatListMessage::FeedCommandDone,
                    ))
                } else {
                    ScreenCommand::None
                }
            }
            ChatListMessage::FeedCommandDone(Ok(())) => ScreenCommand::None,
            ChatListMessage::FeedCommandDone(Err(err)) => {
                tracing::error!(%err, "Feed command failed");
                self.loading = false;
                ScreenCommand::None
            }
            ChatListMessage::ToggleFavorite(id) => {
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::General).await;
                        feed.toggle_favorite(id).await.map_err(|err| err.to_string())
                    },
                    ChatListMessage::FeedCommandDone,
                ))
            }
            ChatListMessage::ShareRecord(id) => {
                if let Some(record) = self.records.iter().find(|record| record.id == id) {
                    tracing::info!(url = %record.video_url, "Share song link");
                }
                ScreenCommand::None
            }
            ChatListMessage::DeleteRecord(id) => {
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::General).await;
                        feed.delete_record(id).await.map_err(|err| err.to_string())
                    },
                    ChatListMessage::FeedCommandDone,
                ))
            }
        }
    }

    fn handle_ui_event(
        &mut self,
        event: UiEvent,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match event {
            UiEvent::FeedReset {
                kind: FeedKind::General,
                records,
                has_more,
            } => {
                self.records = records;
                self.has_more = has_more;
                self.loading = false;
                self.loaded_once = true;
                ScreenCommand::Message(scrollable::scroll_to(
                    self.scrollable_id.clone(),
                    scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
                ))
            }
            UiEvent::FeedPageLoaded {
                kind: FeedKind::General,
                records,
                has_more,
            } => {
                for record in records {
                    if !self.records.iter().any(|known| known.id == record.id) {
                        self.records.push(record);
                    }
                }
                self.has_more = has_more;
                self.loading = false;
                ScreenCommand::None
            }
            UiEvent::FeedRecordUpdated {
                kind: FeedKind::General,
                record,
            } => {
                if let Some(slot) = self.records.iter_mut().find(|known| known.id == record.id) {
                    *slot = record;
                }
                ScreenCommand::None
            }
            UiEvent::FeedRecordRemoved {
                kind: FeedKind::General,
                id,
            } => {
                self.records.retain(|record| record.id != id);
                ScreenCommand::None
            }
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Self::Message> {
        column![
            self.build_header(theme),
            self.build_search_bar(theme),
            self.build_body(theme),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
