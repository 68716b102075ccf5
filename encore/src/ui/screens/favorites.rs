use encore_feed::Record;
use iced::widget::{Space, button, column, container, row, scrollable, stack, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

use crate::chat::detail_transcript;
use crate::feed::FeedKind;
use crate::models::ChatMessage;
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent, icons};

/// Relative scroll offset past which the next page is requested.
const LOAD_MORE_THRESHOLD: f32 = 0.92;

struct DetailState {
    record: Record,
    transcript: Vec<ChatMessage>,
    liked: bool,
    disliked: bool,
}

pub struct FavoritesScreen {
    records: Vec<Record>,
    search_text: String,
    active_query: String,
    loading: bool,
    has_more: bool,
    loaded_once: bool,
    detail: Option<DetailState>,
    confirm_delete: Option<Record>,
    scrollable_id: scrollable::Id,
}

#[derive(Clone, Debug)]
pub enum FavoritesMessage {
    Back,
    SearchInputChanged(String),
    SearchSubmit,
    Scrolled(f32),
    FeedCommandDone(Result<(), String>),
    Unfavorite(u32),
    ShareRecord(u32),
    OpenDetail(u32),
    CloseDetail,
    DetailLike,
    DetailDislike,
    DetailOpenVideo,
    DetailShareStory,
    DetailShareLink,
    RequestDelete(u32),
    CancelDelete,
    ConfirmDelete,
}

impl FavoritesScreen {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            search_text: String::new(),
            active_query: String::new(),
            loading: false,
            has_more: true,
            loaded_once: false,
            detail: None,
            confirm_delete: None,
            scrollable_id: scrollable::Id::unique(),
        }
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, FavoritesMessage> {
        let back_button = button(icons::icon(
            icons::BACK_ICON,
            18.0,
            colors::text_primary(theme),
        ))
        .on_press(FavoritesMessage::Back)
        .padding(8)
        .style(styles::button_icon);
        let header = row![
            back_button,
            text(FeedKind::Favorites.title())
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

    fn build_search_bar<'a>(&'a self, theme: &'a Theme) -> Element<'a, FavoritesMessage> {
        let input = text_input("Search by song title or artist...", &self.search_text)
            .on_input(FavoritesMessage::SearchInputChanged)
            .on_submit(FavoritesMessage::SearchSubmit)
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
        .on_press(FavoritesMessage::SearchSubmit)
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
    ) -> Element<'a, FavoritesMessage> {
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
        let reason_preview: String = record.reason.chars().take(100).collect();
        let info = column![
            text(format!("{} - {}", record.title, record.artist))
                .size(14)
                .color(colors::text_primary(theme)),
            text(&record.date).size(11).color(colors::text_muted(theme)),
            text(format!("{reason_preview}..."))
                .size(11)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(3)
        .width(Length::Fill);
        // The star is always filled here so a press removes the record.
        let actions = row![
            button(icons::icon(
                icons::STAR_FILLED_ICON,
                16.0,
                colors::primary(theme)
            ))
            .on_press(FavoritesMessage::Unfavorite(record.id))
            .padding(6)
            .style(styles::button_icon),
            button(icons::icon(
                icons::SHARE_ICON,
                16.0,
                colors::text_secondary(theme)
            ))
            .on_press(FavoritesMessage::ShareRecord(record.id))
            .padding(6)
            .style(styles::button_icon),
            button(icons::icon(
                icons::TRASH_ICON,
                16.0,
                colors::text_error(theme)
            ))
            .on_press(FavoritesMessage::RequestDelete(record.id))
            .padding(6)
            .style(styles::button_icon),
        ]
        .spacing(4);
        let body = button(
            row![thumbnail, info]
                .spacing(12)
                .align_y(Alignment::Center),
        )
        .on_press(FavoritesMessage::OpenDetail(record.id))
        .padding(0)
        .style(button::text)
        .width(Length::Fill);
        container(row![body, actions].spacing(12).align_y(Alignment::Center))
            .width(Length::Fill)
            .padding(12)
            .style(styles::card)
            .into()
    }

    fn build_body<'a>(&'a self, theme: &'a Theme) -> Element<'a, FavoritesMessage> {
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
                "No favorite chats."
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
                text("All favorites loaded.")
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
            .on_scroll(|viewport| FavoritesMessage::Scrolled(viewport.relative_offset().y))
            .into()
    }

    fn build_detail_modal<'a>(
        &'a self,
        state: &'a DetailState,
        theme: &'a Theme,
    ) -> Element<'a, FavoritesMessage> {
        let record = &state.record;
        let thumbnail = container(icons::icon(
            icons::MUSIC_NOTE_ICON,
            28.0,
            colors::primary(theme),
        ))
        .width(Length::Fixed(64.0))
        .height(Length::Fixed(64.0))
        .center_x(Length::Fixed(64.0))
        .center_y(Length::Fixed(64.0))
        .style(styles::thumbnail);
        let close_button = button(icons::icon(
            icons::CLOSE_ICON,
            18.0,
            colors::text_secondary(theme),
        ))
        .on_press(FavoritesMessage::CloseDetail)
        .padding(4)
        .style(styles::button_icon);
        let header = row![
            thumbnail,
            column![
                text(format!("Title : {}", record.title))
                    .size(16)
                    .color(colors::text_primary(theme)),
                text(format!("Artist : {}", record.artist))
                    .size(13)
                    .color(colors::text_secondary(theme)),
                text(format!("Recommended on : {}", record.date))
                    .size(11)
                    .color(colors::text_muted(theme)),
            ]
            .spacing(4)
            .width(Length::Fill),
            close_button,
        ]
        .spacing(12)
        .align_y(Alignment::Center);
        let like_label = if state.liked { "Liked!" } else { "Like" };
        let dislike_label = if state.disliked { "Noted" } else { "Dislike" };
        let actions = row![
            build_reaction_chip(
                icons::THUMB_UP_ICON,
                like_label,
                state.liked,
                FavoritesMessage::DetailLike,
                theme,
            ),
            build_reaction_chip(
                icons::THUMB_DOWN_ICON,
                dislike_label,
                state.disliked,
                FavoritesMessage::DetailDislike,
                theme,
            ),
            button(text("Open on Youtube").size(12))
                .on_press(FavoritesMessage::DetailOpenVideo)
                .padding([6, 12])
                .style(button::secondary),
            button(icons::icon(
                icons::CAMERA_ICON,
                16.0,
                colors::text_secondary(theme)
            ))
            .on_press(FavoritesMessage::DetailShareStory)
            .padding(6)
            .style(styles::button_icon),
            button(icons::icon(
                icons::LINK_ICON,
                16.0,
                colors::text_secondary(theme)
            ))
            .on_press(FavoritesMessage::DetailShareLink)
            .padding(6)
            .style(styles::button_icon),
            Space::with_width(Length::Fill),
            button(text("Delete chat history").size(12))
                .on_press(FavoritesMessage::RequestDelete(record.id))
                .padding([6, 12])
                .style(styles::button_danger),
        ]
        .spacing(8)
        .align_y(Alignment::Center);
        let mut transcript = column![].spacing(8);
        for message in &state.transcript {
            transcript = transcript.push(build_transcript_bubble(message, theme));
        }
        let dialog = column![
            header,
            text(format!("Why this song : {}", record.reason))
                .size(12)
                .color(colors::text_secondary(theme)),
            text(format!("A note for you : {}", record.encouragement))
                .size(12)
                .color(colors::text_muted(theme)),
            actions,
            container(Space::with_height(1))
                .width(Length::Fill)
                .style(move |t: &Theme| styles::divider(t)),
            text("Conversation with the AI Music Manager")
                .size(13)
                .color(colors::text_secondary(theme)),
            scrollable(transcript).height(Length::Fixed(260.0)),
        ]
        .spacing(12);
        build_overlay(
            container(dialog)
                .width(Length::Fixed(520.0))
                .padding(20)
                .style(styles::card)
                .into(),
        )
    }

    fn build_delete_modal<'a>(
        &'a self,
        record: &'a Record,
        theme: &'a Theme,
    ) -> Element<'a, FavoritesMessage> {
        let dialog = column![
            text("Delete Chat")
                .size(18)
                .color(colors::text_primary(theme)),
            text("Are you sure you want to delete this chat?")
                .size(13)
                .color(colors::text_secondary(theme)),
            text(format!("\"{} - {}\"", record.title, record.artist))
                .size(13)
                .color(colors::text_primary(theme)),
            text("Deleted chats cannot be recovered.")
                .size(11)
                .color(colors::text_error(theme)),
            row![
                button(text("Cancel").size(13))
                    .on_press(FavoritesMessage::CancelDelete)
                    .padding([8, 16])
                    .style(button::secondary),
                button(text("Delete").size(13))
                    .on_press(FavoritesMessage::ConfirmDelete)
                    .padding([8, 16])
                    .style(styles::button_danger),
            ]
            .spacing(8),
        ]
        .spacing(10);
        build_overlay(
            container(dialog)
                .width(Length::Fixed(380.0))
                .padding(20)
                .style(styles::card)
                .into(),
        )
    }
}

impl Screen for FavoritesScreen {
    type Message = FavoritesMessage;

    fn update(
        &mut self,
        message: Self::Message,
        ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match message {
            FavoritesMessage::Back => ScreenCommand::ChangeScreen(ScreenType::MyPage),
            FavoritesMessage::SearchInputChanged(value) => {
                self.search_text = value;
                ScreenCommand::None
            }
            FavoritesMessage::SearchSubmit => {
                let query = self.search_text.trim().to_string();
                self.active_query = query.clone();
                self.loading = true;
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::Favorites).await;
                        feed.search(query).await.map_err(|err| err.to_string())
                    },
                    FavoritesMessage::FeedCommandDone,
                ))
            }
            FavoritesMessage::Scrolled(offset) => {
                if offset >= LOAD_MORE_THRESHOLD
                    && self.loaded_once
                    && self.has_more
                    && !self.loading
                {
                    self.loading = true;
                    let feeds = ctx.feed_manager.clone();
                    ScreenCommand::Message(Task::perform(
                        async move {
                            let feed = feeds.open_feed(FeedKind::Favorites).await;
                            feed.load_next_page().await.map_err(|err| err.to_string())
                        },
                        FavoritesMessage::FeedCommandDone,
                    ))
                } else {
                    ScreenCommand::None
                }
            }
            FavoritesMessage::FeedCommandDone(Ok(())) => ScreenCommand::None,
            FavoritesMessage::FeedCommandDone(Err(err)) => {
                tracing::error!(%err, "Feed command failed");
                self.loading = false;
                ScreenCommand::None
            }
            FavoritesMessage::Unfavorite(id) => {
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::Favorites).await;
                        feed.toggle_favorite(id).await.map_err(|err| err.to_string())
                    },
                    FavoritesMessage::FeedCommandDone,
                ))
            }
            FavoritesMessage::ShareRecord(id) => {
                if let Some(record) = self.records.iter().find(|record| record.id == id) {
                    tracing::info!(url = %record.video_url, "Share song link");
                }
                ScreenCommand::None
            }
            FavoritesMessage::OpenDetail(id) => {
                if let Some(record) = self.records.iter().find(|record| record.id == id) {
                    self.detail = Some(DetailState {
                        record: record.clone(),
                        transcript: detail_transcript(record),
                        liked: false,
                        disliked: false,
                    });
                }
                ScreenCommand::None
            }
            FavoritesMessage::CloseDetail => {
                self.detail = None;
                ScreenCommand::None
            }
            FavoritesMessage::DetailLike => {
                if let Some(detail) = &mut self.detail {
                    detail.liked = !detail.liked;
                    if detail.liked {
                        detail.disliked = false;
                    }
                }
                ScreenCommand::None
            }
            FavoritesMessage::DetailDislike => {
                if let Some(detail) = &mut self.detail {
                    detail.disliked = !detail.disliked;
                    if detail.disliked {
                        detail.liked = false;
                    }
                }
                ScreenCommand::None
            }
            FavoritesMessage::DetailOpenVideo => {
                if let Some(detail) = &self.detail {
                    tracing::info!(url = %detail.record.video_url, "Open song video");
                }
                ScreenCommand::None
            }
            FavoritesMessage::DetailShareStory => {
                if let Some(detail) = &self.detail {
                    tracing::info!(title = %detail.record.title, "Share song as story");
                }
                ScreenCommand::None
            }
            FavoritesMessage::DetailShareLink => {
                if let Some(detail) = &self.detail {
                    tracing::info!(url = %detail.record.video_url, "Share song link");
                }
                ScreenCommand::None
            }
            FavoritesMessage::RequestDelete(id) => {
                if let Some(record) = self
                    .records
                    .iter()
                    .find(|record| record.id == id)
                    .cloned()
                    .or_else(|| {
                        self.detail
                            .as_ref()
                            .filter(|detail| detail.record.id == id)
                            .map(|detail| detail.record.clone())
                    })
                {
                    self.detail = None;
                    self.confirm_delete = Some(record);
                }
                ScreenCommand::None
            }
            FavoritesMessage::CancelDelete => {
                self.confirm_delete = None;
                ScreenCommand::None
            }
            FavoritesMessage::ConfirmDelete => {
                let Some(record) = self.confirm_delete.take() else {
                    return ScreenCommand::None;
                };
                let feeds = ctx.feed_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let feed = feeds.open_feed(FeedKind::Favorites).await;
                        feed.delete_record(record.id)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    FavoritesMessage::FeedCommandDone,
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
                kind: FeedKind::Favorites,
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
                kind: FeedKind::Favorites,
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
            UiEvent::FeedRecordRemoved {
                kind: FeedKind::Favorites,
                id,
            } => {
                self.records.retain(|record| record.id != id);
                if self
                    .detail
                    .as_ref()
                    .is_some_and(|detail| detail.record.id == id)
                {
                    self.detail = None;
                }
                ScreenCommand::None
            }
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Self::Message> {
        let base: Element<'a, FavoritesMessage> = column![
            self.build_header(theme),
            self.build_search_bar(theme),
            self.build_body(theme),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into();
        if let Some(record) = &self.confirm_delete {
            return stack![base, self.build_delete_modal(record, theme)].into();
        }
        if let Some(detail) = &self.detail {
            return stack![base, self.build_detail_modal(detail, theme)].into();
        }
        base
    }
}

fn build_reaction_chip<'a>(
    icon_source: &'static str,
    label: &'a str,
    selected: bool,
    message: FavoritesMessage,
    theme: &'a Theme,
) -> Element<'a, FavoritesMessage> {
    let style: fn(&Theme, button::Status) -> button::Style = if selected {
        styles::button_chip_selected
    } else {
        styles::button_chip
    };
    let color = if selected {
        colors::text_on_primary(theme)
    } else {
        colors::text_secondary(theme)
    };
    button(
        row![
            icons::icon(icon_source, 14.0, color),
            text(label).size(12)
        ]
        .spacing(4)
        .align_y(Alignment::Center),
    )
    .on_press(message)
    .padding([6, 12])
    .style(style)
    .into()
}

fn build_transcript_bubble<'a>(
    message: &'a ChatMessage,
    theme: &'a Theme,
) -> Element<'a, FavoritesMessage> {
    let (style, alignment): (fn(&Theme) -> container::Style, Alignment) = if message.author.is_me()
    {
        (styles::message_outgoing, Alignment::End)
    } else {
        (styles::message_incoming, Alignment::Start)
    };
    let bubble = container(text(&message.text).size(12))
        .padding([8, 12])
        .max_width(340.0)
        .style(move |t: &Theme| style(t));
    column![
        text(message.author.label())
            .size(10)
            .color(colors::text_muted(theme)),
        bubble,
    ]
    .spacing(2)
    .width(Length::Fill)
    .align_x(alignment)
    .into()
}

fn build_overlay(dialog: Element<'_, FavoritesMessage>) -> Element<'_, FavoritesMessage> {
    container(
        container(dialog)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |t: &Theme| styles::modal_overlay(t))
    .into()
}
