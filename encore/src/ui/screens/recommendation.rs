use encore_feed::Catalog;
use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length, Theme};

use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, icons};

pub struct RecommendationScreen {
    items: Vec<RecommendationItem>,
    cursor: usize,
    status: Option<String>,
}

struct RecommendationItem {
    title: String,
    artist: String,
    reason: String,
    encouragement: String,
    video_url: String,
    liked: bool,
    disliked: bool,
    saved: bool,
}

#[derive(Clone, Debug)]
pub enum RecommendationMessage {
    Back,
    NextRecommendation,
    Like(usize),
    Dislike(usize),
    ToggleSaved(usize),
    OpenVideo(usize),
    ShareStory(usize),
    ShareLink(usize),
}

impl RecommendationScreen {
    pub fn new() -> Self {
        let items = Catalog::recommended()
            .tracks()
            .iter()
            .map(|track| RecommendationItem {
                title: track.title.clone(),
                artist: track.artist.clone(),
                reason: track.reason.clone(),
                encouragement: track.encouragement.clone(),
                video_url: track.video_url.clone(),
                liked: false,
                disliked: false,
                saved: false,
            })
            .collect();
        Self {
            items,
            cursor: 0,
            status: None,
        }
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, RecommendationMessage> {
        let back = button(
            row![
                icons::icon(icons::BACK_ICON, 16.0, colors::text_primary(theme)),
                text("Back").size(14),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .on_press(RecommendationMessage::Back)
        .padding([6, 12])
        .style(button::secondary);
        let header = column![
            row![back, Space::with_width(Length::Fill)],
            text("Music picked for you")
                .size(24)
                .color(colors::text_primary(theme)),
            text("Special tracks the AI Music Manager picked from your conversation.")
                .size(13)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(8);
        container(header)
            .width(Length::Fill)
            .padding(16)
            .style(move |t: &Theme| styles::panel_header(t))
            .into()
    }

    fn build_status<'a>(&'a self, theme: &'a Theme) -> Element<'a, RecommendationMessage> {
        match &self.status {
            Some(status) => Element::from(
                container(text(status).size(12).color(colors::text_secondary(theme)))
                    .padding([4, 16]),
            ),
            None => Element::from(Space::with_height(0)),
        }
    }

    fn build_card<'a>(
        &'a self,
        index: usize,
        item: &'a RecommendationItem,
        theme: &'a Theme,
    ) -> Element<'a, RecommendationMessage> {
        let thumb = container(icons::icon(
            icons::MUSIC_NOTE_ICON,
            28.0,
            colors::primary(theme),
        ))
        .center_x(Length::Fixed(72.0))
        .center_y(Length::Fixed(72.0))
        .style(move |t: &Theme| styles::thumbnail(t));
        let info = column![
            text(format!("Title : {}", item.title))
                .size(15)
                .color(colors::text_primary(theme)),
            text(format!("Artist : {}", item.artist))
                .size(13)
                .color(colors::text_secondary(theme)),
            text(format!("Why this song : {}", item.reason))
                .size(12)
                .color(colors::text_secondary(theme)),
            text(format!("A note for you : {}", item.encouragement))
                .size(12)
                .color(colors::text_muted(theme)),
        ]
        .spacing(4)
        .width(Length::Fill);

        let like_style: fn(&Theme, button::Status) -> button::Style = if item.liked {
            styles::button_chip_selected
        } else {
            styles::button_chip
        };
        let like_color = if item.liked {
            colors::text_on_primary(theme)
        } else {
            colors::text_primary(theme)
        };
        let dislike_style: fn(&Theme, button::Status) -> button::Style = if item.disliked {
            styles::button_chip_selected
        } else {
            styles::button_chip
        };
        let dislike_color = if item.disliked {
            colors::text_on_primary(theme)
        } else {
            colors::text_primary(theme)
        };
        let save_style: fn(&Theme, button::Status) -> button::Style = if item.saved {
            styles::button_chip_selected
        } else {
            styles::button_chip
        };
        let save_label = if item.saved {
            "Saved to my library"
        } else {
            "Save to my library"
        };

        let actions = row![
            button(icons::icon(icons::THUMB_UP_ICON, 16.0, like_color))
                .on_press(RecommendationMessage::Like(index))
                .padding(6)
                .style(like_style),
            button(icons::icon(icons::THUMB_DOWN_ICON, 16.0, dislike_color))
                .on_press(RecommendationMessage::Dislike(index))
                .padding(6)
                .style(dislike_style),
            button(
                row![
                    icons::icon(icons::EXTERNAL_LINK_ICON, 14.0, colors::text_primary(theme)),
                    text("Open on Youtube").size(12),
                ]
                .spacing(6)
                .align_y(Alignment::Center),
            )
            .on_press(RecommendationMessage::OpenVideo(index))
            .padding([6, 12])
            .style(button::secondary),
            button(text(save_label).size(12))
                .on_press(RecommendationMessage::ToggleSaved(index))
                .padding([6, 12])
                .style(save_style),
            Space::with_width(Length::Fill),
            button(icons::icon(
                icons::CAMERA_ICON,
                16.0,
                colors::text_primary(theme)
            ))
            .on_press(RecommendationMessage::ShareStory(index))
            .padding(6)
            .style(styles::button_icon),
            button(icons::icon(
                icons::LINK_ICON,
                16.0,
                colors::text_primary(theme)
            ))
            .on_press(RecommendationMessage::ShareLink(index))
            .padding(6)
            .style(styles::button_icon),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        container(
            column![row![thumb, info].spacing(12), actions].spacing(10),
        )
        .width(Length::Fill)
        .padding(14)
        .style(move |t: &Theme| styles::card(t))
        .into()
    }
}

impl Screen for RecommendationScreen {
    type Message = RecommendationMessage;

    fn update(
        &mut self,
        message: RecommendationMessage,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<RecommendationMessage> {
        match message {
            RecommendationMessage::Back => ScreenCommand::ChangeScreen(ScreenType::Home),
            RecommendationMessage::NextRecommendation => {
                if !self.items.is_empty() {
                    self.cursor = (self.cursor + 1) % self.items.len();
                    self.status = None;
                }
                ScreenCommand::None
            }
            RecommendationMessage::Like(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.liked = !item.liked;
                    if item.liked {
                        item.disliked = false;
                    }
                }
                ScreenCommand::None
            }
            RecommendationMessage::Dislike(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.disliked = !item.disliked;
                    if item.disliked {
                        item.liked = false;
                    }
                }
                ScreenCommand::None
            }
            RecommendationMessage::ToggleSaved(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.saved = !item.saved;
                    self.status = Some(if item.saved {
                        format!(
                            "\"{} - {}\" has been saved to your library!",
                            item.title, item.artist
                        )
                    } else {
                        "Removed from your library.".to_string()
                    });
                }
                ScreenCommand::None
            }
            RecommendationMessage::OpenVideo(index) => {
                if let Some(item) = self.items.get(index) {
                    tracing::info!(url = %item.video_url, "Open song on Youtube");
                    self.status = Some(format!("Opening {}", item.video_url));
                }
                ScreenCommand::None
            }
            RecommendationMessage::ShareStory(index) => {
                if let Some(item) = self.items.get(index) {
                    tracing::info!(title = %item.title, "Share to Instagram story");
                    self.status = Some("Sharing to your Instagram story...".to_string());
                }
                ScreenCommand::None
            }
            RecommendationMessage::ShareLink(index) => {
                if let Some(item) = self.items.get(index) {
                    tracing::info!(url = %item.video_url, "Share song link");
                    self.status = Some("Share link copied.".to_string());
                }
                ScreenCommand::None
            }
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, RecommendationMessage> {
        // One pick at a time; cycling keeps each track's reactions.
        let mut body = column![].spacing(12).padding(16);
        if let Some(item) = self.items.get(self.cursor) {
            body = body.push(self.build_card(self.cursor, item, theme));
            body = body.push(
                button(
                    text("Get another recommendation")
                        .size(14)
                        .width(Length::Fill)
                        .align_x(Alignment::Center),
                )
                .on_press(RecommendationMessage::NextRecommendation)
                .padding([10, 16])
                .width(Length::Fill)
                .style(button::primary),
            );
        }
        column![
            self.build_header(theme),
            self.build_status(theme),
            scrollable(body).width(Length::Fill).height(Length::Fill),
        ]
        .into()
    }
}
