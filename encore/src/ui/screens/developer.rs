use iced::widget::{Space, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

use crate::chat::QUICK_MESSAGES;
use crate::models::{ChatMessage, PeerId};
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent, icons};

pub struct DeveloperChatScreen {
    messages: Vec<ChatMessage>,
    compose_text: String,
    scrollable_id: scrollable::Id,
}

#[derive(Clone, Debug)]
pub enum DeveloperChatMessage {
    Back,
    HistoryLoaded(Vec<ChatMessage>),
    ComposeChanged(String),
    QuickMessage(&'static str),
    SendMessage,
    MessageSent(Result<ChatMessage, String>),
}

impl DeveloperChatScreen {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            compose_text: String::new(),
            scrollable_id: scrollable::Id::unique(),
        }
    }

    fn snap_to_latest(&self) -> ScreenCommand<DeveloperChatMessage> {
        ScreenCommand::Message(scrollable::snap_to(
            self.scrollable_id.clone(),
            scrollable::RelativeOffset::END,
        ))
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, DeveloperChatMessage> {
        let back_button = button(icons::icon(
            icons::BACK_ICON,
            18.0,
            colors::text_primary(theme),
        ))
        .on_press(DeveloperChatMessage::Back)
        .padding(8)
        .style(styles::button_icon);
        let avatar = container(icons::icon(
            icons::CODE_ICON,
            18.0,
            colors::primary(theme),
        ))
        .center_x(Length::Fixed(36.0))
        .center_y(Length::Fixed(36.0))
        .style(styles::thumbnail);
        let identity = column![
            text("Developer")
                .size(16)
                .color(colors::text_primary(theme)),
            row![
                container(Space::new(Length::Fixed(8.0), Length::Fixed(8.0)))
                    .style(move |t: &Theme| styles::online_dot(t)),
                text("Online").size(11).color(colors::text_muted(theme)),
            ]
            .spacing(4)
            .align_y(Alignment::Center),
        ]
        .spacing(2);
        let header = row![back_button, avatar, identity, Space::with_width(Length::Fill)]
            .spacing(12)
            .align_y(Alignment::Center);
        container(header)
            .width(Length::Fill)
            .padding(16)
            .style(styles::panel_header)
            .into()
    }

    fn build_messages<'a>(&'a self, theme: &'a Theme) -> Element<'a, DeveloperChatMessage> {
        let mut list = column![].spacing(8);
        for message in &self.messages {
            list = list.push(build_message_bubble(message, theme));
        }
        scrollable(container(list).padding(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .id(self.scrollable_id.clone())
            .into()
    }

    fn build_quick_messages<'a>(&'a self) -> Element<'a, DeveloperChatMessage> {
        let mut chips = row![].spacing(8);
        for (label, content) in QUICK_MESSAGES {
            chips = chips.push(
                button(text(label).size(11))
                    .on_press(DeveloperChatMessage::QuickMessage(content))
                    .padding([6, 10])
                    .style(styles::button_chip),
            );
        }
        container(chips).width(Length::Fill).padding([4, 16]).into()
    }

    fn build_composer<'a>(&'a self, theme: &'a Theme) -> Element<'a, DeveloperChatMessage> {
        let input = text_input("Send a message to the developer...", &self.compose_text)
            .on_input(DeveloperChatMessage::ComposeChanged)
            .on_submit(DeveloperChatMessage::SendMessage)
            .padding(10)
            .size(14)
            .width(Length::Fill);
        let send_button = button(icons::icon(
            icons::SEND_ICON,
            16.0,
            colors::text_on_primary(theme),
        ))
        .on_press(DeveloperChatMessage::SendMessage)
        .padding(10)
        .style(button::primary);
        container(
            row![input, send_button]
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(16)
        .into()
    }
}

impl Screen for DeveloperChatScreen {
    type Message = DeveloperChatMessage;

    fn update(
        &mut self,
        message: Self::Message,
        ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match message {
            DeveloperChatMessage::Back => ScreenCommand::ChangeScreen(ScreenType::MyPage),
            DeveloperChatMessage::HistoryLoaded(messages) => {
                self.messages = messages;
                self.snap_to_latest()
            }
            DeveloperChatMessage::ComposeChanged(value) => {
                self.compose_text = value;
                ScreenCommand::None
            }
            DeveloperChatMessage::QuickMessage(content) => {
                self.compose_text = content.to_string();
                ScreenCommand::None
            }
            DeveloperChatMessage::SendMessage => {
                let content = self.compose_text.trim().to_string();
                if content.is_empty() {
                    return ScreenCommand::None;
                }
                self.compose_text.clear();
                let chats = ctx.chat_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let chat = chats.open_chat(PeerId::Developer).await;
                        chat.send_message(content)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    DeveloperChatMessage::MessageSent,
                ))
            }
            DeveloperChatMessage::MessageSent(Ok(message)) => {
                self.messages.push(message);
                self.snap_to_latest()
            }
            DeveloperChatMessage::MessageSent(Err(err)) => {
                tracing::error!(%err, "Cannot send message to the developer");
                ScreenCommand::None
            }
        }
    }

    fn handle_ui_event(
        &mut self,
        event: UiEvent,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match event {
            UiEvent::NewMessage {
                peer_id: PeerId::Developer,
                message,
            } => {
                self.messages.push(message);
                self.snap_to_latest()
            }
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Self::Message> {
        column![
            self.build_header(theme),
            self.build_messages(theme),
            self.build_quick_messages(),
            self.build_composer(theme),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn build_message_bubble<'a>(
    message: &'a ChatMessage,
    theme: &'a Theme,
) -> Element<'a, DeveloperChatMessage> {
    let is_mine = message.author.is_me();
    let bubble_style: fn(&Theme) -> container::Style = if is_mine {
        styles::message_outgoing
    } else {
        styles::message_incoming
    };
    let bubble = container(text(&message.text).size(14))
        .padding(10)
        .max_width(420.0)
        .style(move |t: &Theme| bubble_style(t));
    let time = text(message.send_time.clock_label())
        .size(10)
        .color(colors::text_muted(theme));
    if is_mine {
        row![
            Space::with_width(Length::Fill),
            column![bubble, time].spacing(2).align_x(Alignment::End),
        ]
        .into()
    } else {
        row![
            column![bubble, time].spacing(2).align_x(Alignment::Start),
            Space::with_width(Length::Fill),
        ]
        .into()
    }
}
