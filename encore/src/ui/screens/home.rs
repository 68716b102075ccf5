use iced::widget::{
    Space, TextInput, button, column, container, row, scrollable, stack, text, text_input,
};
use iced::{Alignment, Element, Length, Task, Theme};

use crate::models::{ChatMessage, MUSIC_GENRES, Peer, PeerId, RecommendationMode, UserProfile};
use crate::session::{SignUpDetails, SocialProvider};
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{colors, styles};
use crate::ui::{AppContext, UiEvent, icons};

pub struct HomeScreen {
    messages: Vec<ChatMessage>,
    compose_text: String,
    peers: Vec<Peer>,
    status: Option<String>,
    modal: HomeModal,
    messages_scrollable_id: scrollable::Id,
}

#[derive(Clone, Debug)]
pub enum HomeMessage {
    // Assistant conversation
    HistoryLoaded(Vec<ChatMessage>),
    ComposeChanged(String),
    SendMessage,
    MessageSent(Result<ChatMessage, String>),
    EndConversation,
    ConversationEnded(u32),
    // Header actions
    OpenMyPage,
    // Online roster
    OpenSong(String),
    OpenPeerChat(PeerId),
    PeerChatOpened(Result<(Peer, Vec<ChatMessage>), String>),
    PeerComposeChanged(String),
    PeerSendMessage,
    PeerMessageSent(Result<ChatMessage, String>),
    // Sign-in dialog
    ShowLogin,
    HideModal,
    LoginNicknameChanged(String),
    LoginPasswordChanged(String),
    ToggleShowPassword,
    LoginSubmit,
    SignedIn(String),
    SocialLogin(SocialProvider),
    // Sign-up dialog
    ShowSignUp,
    SignUpNameChanged(String),
    SignUpNicknameChanged(String),
    SignUpPasswordChanged(String),
    SignUpPasswordConfirmChanged(String),
    SignUpPhoneChanged(String),
    SignUpSubmit,
    SignUpRegistered,
    // Profile setup dialog
    UploadImage,
    GenreToggled(String),
    ModeSelected(RecommendationMode),
    ProfileSave,
    ProfileSkip,
    ProfileCompleted(Result<UserProfile, String>),
}

enum HomeModal {
    None,
    Login(LoginForm),
    SignUp(SignUpForm),
    ProfileSetup(ProfileSetupForm),
    PeerChat(PeerChatState),
}

#[derive(Default)]
struct LoginForm {
    nickname: String,
    password: String,
    show_password: bool,
}

#[derive(Default)]
struct SignUpForm {
    name: String,
    nickname: String,
    password: String,
    password_confirm: String,
    phone: String,
    show_password: bool,
    name_error: Option<String>,
    nickname_error: Option<String>,
    password_error: Option<String>,
    password_confirm_error: Option<String>,
    phone_error: Option<String>,
}

impl SignUpForm {
    fn validate(&mut self) -> bool {
        self.name_error = validate_name(&self.name);
        self.nickname_error = validate_nickname(&self.nickname);
        self.password_error = validate_password(&self.password);
        self.password_confirm_error =
            validate_password_confirm(&self.password, &self.password_confirm);
        self.phone_error = validate_phone(&self.phone);
        self.name_error.is_none()
            && self.nickname_error.is_none()
            && self.password_error.is_none()
            && self.password_confirm_error.is_none()
            && self.phone_error.is_none()
    }
}

#[derive(Default)]
struct ProfileSetupForm {
    genres: Vec<String>,
    mode: Option<RecommendationMode>,
}

struct PeerChatState {
    peer: Peer,
    messages: Vec<ChatMessage>,
    compose_text: String,
    scrollable_id: scrollable::Id,
}

impl HomeScreen {
    pub fn new(peers: Vec<Peer>) -> Self {
        Self {
            messages: Vec::new(),
            compose_text: String::new(),
            peers,
            status: None,
            modal: HomeModal::None,
            messages_scrollable_id: scrollable::Id::unique(),
        }
    }

    fn push_message(&mut self, message: ChatMessage) {
        if !self.messages.iter().any(|m| m.id == message.id) {
            self.messages.push(message);
        }
    }

    fn snap_to_latest(&self) -> Task<HomeMessage> {
        scrollable::snap_to(
            self.messages_scrollable_id.clone(),
            scrollable::RelativeOffset::END,
        )
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        let header = row![
            icons::icon(icons::MUSIC_NOTE_ICON, 24.0, colors::primary(theme)),
            text("Encore").size(20).color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            button(text("Login").size(14))
                .on_press(HomeMessage::ShowLogin)
                .padding([8, 16])
                .style(button::secondary),
            button(icons::icon(
                icons::USER_ICON,
                20.0,
                colors::text_primary(theme)
            ))
            .on_press(HomeMessage::OpenMyPage)
            .padding(8)
            .style(styles::button_icon),
        ]
        .spacing(12)
        .align_y(Alignment::Center);
        container(header)
            .width(Length::Fill)
            .padding(16)
            .style(move |t: &Theme| styles::panel_header(t))
            .into()
    }

    fn build_status<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        match &self.status {
            Some(status) => Element::from(
                container(text(status).size(12).color(colors::text_secondary(theme)))
                    .padding([4, 16]),
            ),
            None => Element::from(Space::with_height(0)),
        }
    }

    fn build_roster<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        let mut cards = row![].spacing(12);
        for peer in &self.peers {
            cards = cards.push(build_roster_card(peer, theme));
        }
        let strip = column![
            text("Online now")
                .size(13)
                .color(colors::text_secondary(theme)),
            cards,
        ]
        .spacing(8);
        container(strip).width(Length::Fill).padding(16).into()
    }

    fn build_chat_body<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        if self.messages.is_empty() {
            return container(
                text("Hello! Start a conversation with the AI Music Manager!")
                    .size(14)
                    .color(colors::text_muted(theme)),
            )
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();
        }
        let mut col = column![].spacing(8);
        for message in &self.messages {
            col = col.push(build_message_bubble(message, theme));
        }
        scrollable(col.padding(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .id(self.messages_scrollable_id.clone())
            .into()
    }

    fn build_footer<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        let can_send = !self.compose_text.trim().is_empty();
        let send_icon = icons::icon(icons::SEND_ICON, 20.0, colors::text_primary(theme));
        let mut send_button = button(send_icon).padding(8);
        if can_send {
            send_button = send_button
                .on_press(HomeMessage::SendMessage)
                .style(button::primary);
        } else {
            send_button = send_button.style(button::secondary);
        }
        let input = text_input("Type a message...", &self.compose_text)
            .on_input(HomeMessage::ComposeChanged)
            .on_submit(HomeMessage::SendMessage)
            .padding(10)
            .size(14)
            .width(Length::Fill);
        let end_button = button(
            text("End the conversation and get a music recommendation")
                .size(14)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .on_press(HomeMessage::EndConversation)
        .padding([10, 16])
        .width(Length::Fill)
        .style(button::primary);
        container(
            column![
                row![input, send_button].spacing(8).align_y(Alignment::Center),
                end_button,
            ]
            .spacing(10),
        )
        .width(Length::Fill)
        .padding(16)
        .into()
    }

    fn build_login_modal<'a>(
        &'a self,
        form: &'a LoginForm,
        theme: &'a Theme,
    ) -> Element<'a, HomeMessage> {
        let header = row![
            text("Sign In").size(20).color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            build_close_button(theme),
        ]
        .align_y(Alignment::Center);

        let nickname_field = build_field(
            "Nickname",
            text_input("Enter your nickname", &form.nickname)
                .on_input(HomeMessage::LoginNicknameChanged),
            None,
            theme,
        );
        let password_label = row![
            text("Password")
                .size(12)
                .color(colors::text_secondary(theme)),
            Space::with_width(Length::Fill),
            build_show_password_button(form.show_password),
        ]
        .align_y(Alignment::Center);
        let password_field = column![
            password_label,
            text_input("Enter your password", &form.password)
                .secure(!form.show_password)
                .on_input(HomeMessage::LoginPasswordChanged)
                .on_submit(HomeMessage::LoginSubmit)
                .padding(10)
                .size(14),
        ]
        .spacing(4);

        let can_submit = !form.nickname.trim().is_empty() && !form.password.is_empty();
        let mut submit = button(
            text("Sign In")
                .size(14)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .padding([10, 16])
        .width(Length::Fill);
        if can_submit {
            submit = submit
                .on_press(HomeMessage::LoginSubmit)
                .style(button::primary);
        } else {
            submit = submit.style(button::secondary);
        }

        let divider = text("or")
            .size(12)
            .color(colors::text_muted(theme))
            .width(Length::Fill)
            .align_x(Alignment::Center);
        let social = column![
            build_social_button("Sign in with Kakao", SocialProvider::Kakao),
            build_social_button("Sign in with Naver", SocialProvider::Naver),
        ]
        .spacing(8);

        let footer = row![
            text("Don't have an account yet?")
                .size(12)
                .color(colors::text_secondary(theme)),
            button(text("Sign Up").size(12).color(colors::primary(theme)))
                .on_press(HomeMessage::ShowSignUp)
                .padding(2)
                .style(button::text),
        ]
        .spacing(4)
        .align_y(Alignment::Center);

        let dialog = container(
            column![
                header,
                nickname_field,
                password_field,
                submit,
                divider,
                social,
                footer,
            ]
            .spacing(14),
        )
        .width(Length::Fixed(420.0))
        .padding(24)
        .style(move |t: &Theme| styles::card(t));
        build_overlay(dialog.into())
    }

    fn build_sign_up_modal<'a>(
        &'a self,
        form: &'a SignUpForm,
        theme: &'a Theme,
    ) -> Element<'a, HomeMessage> {
        let header = row![
            text("Sign Up").size(20).color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            build_close_button(theme),
        ]
        .align_y(Alignment::Center);

        let name_field = build_field(
            "Name",
            text_input("Enter your name", &form.name).on_input(HomeMessage::SignUpNameChanged),
            form.name_error.as_ref(),
            theme,
        );
        let nickname_field = build_field(
            "Nickname",
            text_input("Enter your nickname", &form.nickname)
                .on_input(HomeMessage::SignUpNicknameChanged),
            form.nickname_error.as_ref(),
            theme,
        );
        let password_label = row![
            text("Password")
                .size(12)
                .color(colors::text_secondary(theme)),
            Space::with_width(Length::Fill),
            build_show_password_button(form.show_password),
        ]
        .align_y(Alignment::Center);
        let mut password_field = column![
            password_label,
            text_input("Enter your password", &form.password)
                .secure(!form.show_password)
                .on_input(HomeMessage::SignUpPasswordChanged)
                .padding(10)
                .size(14),
        ]
        .spacing(4);
        if let Some(err) = &form.password_error {
            password_field = password_field.push(build_field_error(err, theme));
        }
        let confirm_field = build_field(
            "Confirm password",
            text_input("Enter your password again", &form.password_confirm)
                .secure(!form.show_password)
                .on_input(HomeMessage::SignUpPasswordConfirmChanged),
            form.password_confirm_error.as_ref(),
            theme,
        );
        let phone_field = build_field(
            "Phone number",
            text_input("Enter your phone number", &form.phone)
                .on_input(HomeMessage::SignUpPhoneChanged),
            form.phone_error.as_ref(),
            theme,
        );

        let submit = button(
            text("Next")
                .size(14)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .on_press(HomeMessage::SignUpSubmit)
        .padding([10, 16])
        .width(Length::Fill)
        .style(button::primary);

        let dialog = container(
            column![
                header,
                name_field,
                nickname_field,
                password_field,
                confirm_field,
                phone_field,
                submit,
            ]
            .spacing(12),
        )
        .width(Length::Fixed(420.0))
        .padding(24)
        .style(move |t: &Theme| styles::card(t));
        build_overlay(dialog.into())
    }

    fn build_profile_setup_modal<'a>(
        &'a self,
        form: &'a ProfileSetupForm,
        theme: &'a Theme,
    ) -> Element<'a, HomeMessage> {
        let header = row![
            text("Profile Setup")
                .size(20)
                .color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            build_close_button(theme),
        ]
        .align_y(Alignment::Center);

        let avatar = container(icons::icon(
            icons::USER_ICON,
            32.0,
            colors::text_secondary(theme),
        ))
        .center_x(Length::Fixed(72.0))
        .center_y(Length::Fixed(72.0))
        .style(move |t: &Theme| styles::thumbnail(t));
        let image_section = column![
            text("Profile image")
                .size(12)
                .color(colors::text_secondary(theme)),
            row![
                avatar,
                button(text("Upload image").size(12))
                    .on_press(HomeMessage::UploadImage)
                    .padding([6, 12])
                    .style(button::secondary),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        ]
        .spacing(4);

        let mut genre_section = column![
            text("Favorite music genres (select multiple)")
                .size(12)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(8);
        for chunk in MUSIC_GENRES.chunks(4) {
            let mut chips = row![].spacing(8);
            for genre in chunk {
                let selected = form.genres.iter().any(|g| g == genre);
                chips = chips.push(build_chip(
                    genre,
                    selected,
                    HomeMessage::GenreToggled(genre.to_string()),
                ));
            }
            genre_section = genre_section.push(chips);
        }
        if !form.genres.is_empty() {
            genre_section = genre_section.push(
                text(format!("Selected genres: {}", form.genres.len()))
                    .size(11)
                    .color(colors::text_muted(theme)),
            );
        }

        let mut mode_section = column![
            text("Choose a recommendation mode")
                .size(12)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(8);
        for mode in RecommendationMode::all() {
            let selected = form.mode == Some(mode);
            let style: fn(&Theme, button::Status) -> button::Style = if selected {
                styles::button_chip_selected
            } else {
                styles::button_chip
            };
            mode_section = mode_section.push(
                button(
                    column![
                        text(mode.label()).size(14),
                        text(mode.description()).size(11),
                    ]
                    .spacing(2),
                )
                .on_press(HomeMessage::ModeSelected(mode))
                .padding(10)
                .width(Length::Fill)
                .style(style),
            );
        }

        let actions = row![
            button(
                text("Skip")
                    .size(14)
                    .width(Length::Fill)
                    .align_x(Alignment::Center)
            )
            .on_press(HomeMessage::ProfileSkip)
            .padding([10, 16])
            .width(Length::Fill)
            .style(button::secondary),
            button(
                text("Save")
                    .size(14)
                    .width(Length::Fill)
                    .align_x(Alignment::Center)
            )
            .on_press(HomeMessage::ProfileSave)
            .padding([10, 16])
            .width(Length::Fill)
            .style(button::primary),
        ]
        .spacing(8);

        let dialog = container(
            scrollable(
                column![header, image_section, genre_section, mode_section, actions].spacing(16),
            )
            .height(Length::Fixed(520.0)),
        )
        .width(Length::Fixed(480.0))
        .padding(24)
        .style(move |t: &Theme| styles::card(t));
        build_overlay(dialog.into())
    }

    fn build_peer_chat_modal<'a>(
        &'a self,
        state: &'a PeerChatState,
        theme: &'a Theme,
    ) -> Element<'a, HomeMessage> {
        let avatar = container(
            text(initial_of(&state.peer.name))
                .size(14)
                .color(colors::text_primary(theme)),
        )
        .center_x(Length::Fixed(36.0))
        .center_y(Length::Fixed(36.0))
        .style(move |t: &Theme| styles::thumbnail(t));
        let header = row![
            avatar,
            column![
                text(&state.peer.name)
                    .size(15)
                    .color(colors::text_primary(theme)),
                row![
                    build_online_dot(),
                    text("Online").size(11).color(colors::text_success(theme)),
                ]
                .spacing(4)
                .align_y(Alignment::Center),
            ]
            .spacing(2),
            Space::with_width(Length::Fill),
            build_close_button(theme),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut col = column![].spacing(8);
        for message in &state.messages {
            col = col.push(build_message_bubble(message, theme));
        }
        let body = scrollable(col.padding(12))
            .width(Length::Fill)
            .height(Length::Fixed(320.0))
            .id(state.scrollable_id.clone());

        let can_send = !state.compose_text.trim().is_empty();
        let send_icon = icons::icon(icons::SEND_ICON, 18.0, colors::text_primary(theme));
        let mut send_button = button(send_icon).padding(8);
        if can_send {
            send_button = send_button
                .on_press(HomeMessage::PeerSendMessage)
                .style(button::primary);
        } else {
            send_button = send_button.style(button::secondary);
        }
        let input = text_input(
            &format!("Send a message to {}...", state.peer.name),
            &state.compose_text,
        )
        .on_input(HomeMessage::PeerComposeChanged)
        .on_submit(HomeMessage::PeerSendMessage)
        .padding(10)
        .size(14)
        .width(Length::Fill);

        let dialog = container(
            column![
                header,
                body,
                row![input, send_button].spacing(8).align_y(Alignment::Center),
            ]
            .spacing(12),
        )
        .width(Length::Fixed(460.0))
        .padding(16)
        .style(move |t: &Theme| styles::card(t));
        build_overlay(dialog.into())
    }
}

impl Screen for HomeScreen {
    type Message = HomeMessage;

    fn update(&mut self, message: HomeMessage, ctx: &mut AppContext) -> ScreenCommand<HomeMessage> {
        match message {
            HomeMessage::HistoryLoaded(messages) => {
                self.messages = messages;
                ScreenCommand::Message(self.snap_to_latest())
            }
            HomeMessage::ComposeChanged(value) => {
                self.compose_text = value;
                ScreenCommand::None
            }
            HomeMessage::SendMessage => {
                let text = self.compose_text.trim().to_string();
                if text.is_empty() {
                    return ScreenCommand::None;
                }
                self.compose_text.clear();
                let chats = ctx.chat_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let handle = chats.open_chat(PeerId::Assistant).await;
                        handle.send_message(text).await.map_err(|err| err.to_string())
                    },
                    HomeMessage::MessageSent,
                ))
            }
            HomeMessage::MessageSent(Ok(message)) => {
                self.push_message(message);
                ScreenCommand::Message(self.snap_to_latest())
            }
            HomeMessage::MessageSent(Err(err)) => {
                tracing::error!(%err, "Cannot send message");
                self.status = Some("Could not send your message.".to_string());
                ScreenCommand::None
            }
            HomeMessage::EndConversation => {
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move { session.record_recommendation().await },
                    HomeMessage::ConversationEnded,
                ))
            }
            HomeMessage::ConversationEnded(count) => {
                tracing::info!(count, "Conversation ended with picks ready");
                ScreenCommand::ChangeScreen(ScreenType::Recommendation)
            }
            HomeMessage::OpenMyPage => ScreenCommand::ChangeScreen(ScreenType::MyPage),
            HomeMessage::OpenSong(url) => {
                tracing::info!(url = %url, "Open song link");
                self.status = Some(format!("Opening {url}"));
                ScreenCommand::None
            }
            HomeMessage::OpenPeerChat(peer_id) => {
                let chats = ctx.chat_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let handle = chats.open_chat(peer_id).await;
                        let peer = handle.peer().clone();
                        match handle.history().await {
                            Ok(messages) => Ok((peer, messages)),
                            Err(err) => Err(err.to_string()),
                        }
                    },
                    HomeMessage::PeerChatOpened,
                ))
            }
            HomeMessage::PeerChatOpened(Ok((peer, messages))) => {
                let state = PeerChatState {
                    peer,
                    messages,
                    compose_text: String::new(),
                    scrollable_id: scrollable::Id::unique(),
                };
                let snap = scrollable::snap_to(
                    state.scrollable_id.clone(),
                    scrollable::RelativeOffset::END,
                );
                self.modal = HomeModal::PeerChat(state);
                ScreenCommand::Message(snap)
            }
            HomeMessage::PeerChatOpened(Err(err)) => {
                tracing::error!(%err, "Cannot open peer chat");
                self.status = Some("Could not open the conversation.".to_string());
                ScreenCommand::None
            }
            HomeMessage::PeerComposeChanged(value) => {
                if let HomeModal::PeerChat(state) = &mut self.modal {
                    state.compose_text = value;
                }
                ScreenCommand::None
            }
            HomeMessage::PeerSendMessage => {
                let HomeModal::PeerChat(state) = &mut self.modal else {
                    return ScreenCommand::None;
                };
                let text = state.compose_text.trim().to_string();
                if text.is_empty() {
                    return ScreenCommand::None;
                }
                state.compose_text.clear();
                let peer_id = state.peer.id;
                let chats = ctx.chat_manager.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        let handle = chats.open_chat(peer_id).await;
                        handle.send_message(text).await.map_err(|err| err.to_string())
                    },
                    HomeMessage::PeerMessageSent,
                ))
            }
            HomeMessage::PeerMessageSent(Ok(message)) => {
                if let HomeModal::PeerChat(state) = &mut self.modal {
                    if !state.messages.iter().any(|m| m.id == message.id) {
                        state.messages.push(message);
                    }
                    return ScreenCommand::Message(scrollable::snap_to(
                        state.scrollable_id.clone(),
                        scrollable::RelativeOffset::END,
                    ));
                }
                ScreenCommand::None
            }
            HomeMessage::PeerMessageSent(Err(err)) => {
                tracing::error!(%err, "Cannot send message");
                self.status = Some("Could not send your message.".to_string());
                ScreenCommand::None
            }
            HomeMessage::ShowLogin => {
                self.modal = HomeModal::Login(LoginForm::default());
                ScreenCommand::None
            }
            HomeMessage::HideModal => {
                self.modal = HomeModal::None;
                ScreenCommand::None
            }
            HomeMessage::LoginNicknameChanged(value) => {
                if let HomeModal::Login(form) = &mut self.modal {
                    form.nickname = value;
                }
                ScreenCommand::None
            }
            HomeMessage::LoginPasswordChanged(value) => {
                if let HomeModal::Login(form) = &mut self.modal {
                    form.password = value;
                }
                ScreenCommand::None
            }
            HomeMessage::ToggleShowPassword => {
                match &mut self.modal {
                    HomeModal::Login(form) => form.show_password = !form.show_password,
                    HomeModal::SignUp(form) => form.show_password = !form.show_password,
                    _ => {}
                }
                ScreenCommand::None
            }
            HomeMessage::LoginSubmit => {
                let HomeModal::Login(form) = &self.modal else {
                    return ScreenCommand::None;
                };
                let nickname = form.nickname.trim().to_string();
                if nickname.is_empty() || form.password.is_empty() {
                    return ScreenCommand::None;
                }
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        session.sign_in(&nickname).await;
                        nickname
                    },
                    |nickname| HomeMessage::SignedIn(format!("Signed in as {nickname}.")),
                ))
            }
            HomeMessage::SignedIn(status) => {
                self.modal = HomeModal::None;
                self.status = Some(status);
                ScreenCommand::None
            }
            HomeMessage::SocialLogin(provider) => {
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        session.sign_in_social(provider).await;
                        provider.label()
                    },
                    |label| HomeMessage::SignedIn(format!("Signed in with {label}.")),
                ))
            }
            HomeMessage::ShowSignUp => {
                self.modal = HomeModal::SignUp(SignUpForm::default());
                ScreenCommand::None
            }
            HomeMessage::SignUpNameChanged(value) => {
                if let HomeModal::SignUp(form) = &mut self.modal {
                    form.name = value;
                    form.name_error = validate_name(&form.name);
                }
                ScreenCommand::None
            }
            HomeMessage::SignUpNicknameChanged(value) => {
                if let HomeModal::SignUp(form) = &mut self.modal {
                    form.nickname = value;
                    form.nickname_error = validate_nickname(&form.nickname);
                }
                ScreenCommand::None
            }
            HomeMessage::SignUpPasswordChanged(value) => {
                if let HomeModal::SignUp(form) = &mut self.modal {
                    form.password = value;
                    form.password_error = validate_password(&form.password);
                    form.password_confirm_error =
                        validate_password_confirm(&form.password, &form.password_confirm);
                }
                ScreenCommand::None
            }
            HomeMessage::SignUpPasswordConfirmChanged(value) => {
                if let HomeModal::SignUp(form) = &mut self.modal {
                    form.password_confirm = value;
                    form.password_confirm_error =
                        validate_password_confirm(&form.password, &form.password_confirm);
                }
                ScreenCommand::None
            }
            HomeMessage::SignUpPhoneChanged(value) => {
                if let HomeModal::SignUp(form) = &mut self.modal {
                    form.phone = value;
                    form.phone_error = validate_phone(&form.phone);
                }
                ScreenCommand::None
            }
            HomeMessage::SignUpSubmit => {
                let HomeModal::SignUp(form) = &mut self.modal else {
                    return ScreenCommand::None;
                };
                if !form.validate() {
                    return ScreenCommand::None;
                }
                let details = SignUpDetails {
                    name: form.name.trim().to_string(),
                    nickname: form.nickname.trim().to_string(),
                    phone: form.phone.trim().to_string(),
                };
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move { session.sign_up(details).await },
                    |_| HomeMessage::SignUpRegistered,
                ))
            }
            HomeMessage::SignUpRegistered => {
                self.modal = HomeModal::ProfileSetup(ProfileSetupForm::default());
                ScreenCommand::None
            }
            HomeMessage::UploadImage => {
                tracing::info!("Image upload is not available yet");
                self.status = Some("Image upload is not available yet.".to_string());
                ScreenCommand::None
            }
            HomeMessage::GenreToggled(genre) => {
                if let HomeModal::ProfileSetup(form) = &mut self.modal {
                    if let Some(index) = form.genres.iter().position(|g| *g == genre) {
                        form.genres.remove(index);
                    } else {
                        form.genres.push(genre);
                    }
                }
                ScreenCommand::None
            }
            HomeMessage::ModeSelected(mode) => {
                if let HomeModal::ProfileSetup(form) = &mut self.modal {
                    form.mode = Some(mode);
                }
                ScreenCommand::None
            }
            HomeMessage::ProfileSave => {
                let HomeModal::ProfileSetup(form) = &self.modal else {
                    return ScreenCommand::None;
                };
                let genres = form.genres.clone();
                let mode = form.mode.unwrap_or_default();
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        session
                            .complete_profile(genres, mode)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    HomeMessage::ProfileCompleted,
                ))
            }
            HomeMessage::ProfileSkip => {
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move { session.skip_profile().await.map_err(|err| err.to_string()) },
                    HomeMessage::ProfileCompleted,
                ))
            }
            HomeMessage::ProfileCompleted(Ok(profile)) => {
                self.modal = HomeModal::None;
                self.status = Some(format!("Profile saved. Welcome, {}!", profile.nickname));
                ScreenCommand::None
            }
            HomeMessage::ProfileCompleted(Err(err)) => {
                tracing::error!(%err, "Cannot save profile");
                self.status = Some("Could not save your profile.".to_string());
                ScreenCommand::None
            }
        }
    }

    fn handle_ui_event(
        &mut self,
        event: UiEvent,
        _ctx: &mut AppContext,
    ) -> ScreenCommand<HomeMessage> {
        match event {
            UiEvent::NewMessage {
                peer_id: PeerId::Assistant,
                message,
            } => {
                self.push_message(message);
                ScreenCommand::Message(self.snap_to_latest())
            }
            UiEvent::NewMessage { peer_id, message } => {
                if let HomeModal::PeerChat(state) = &mut self.modal {
                    if state.peer.id == peer_id {
                        if !state.messages.iter().any(|m| m.id == message.id) {
                            state.messages.push(message);
                        }
                        return ScreenCommand::Message(scrollable::snap_to(
                            state.scrollable_id.clone(),
                            scrollable::RelativeOffset::END,
                        ));
                    }
                }
                ScreenCommand::None
            }
            _ => ScreenCommand::None,
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, HomeMessage> {
        let main_element: Element<_> = column![
            self.build_header(theme),
            self.build_status(theme),
            self.build_roster(theme),
            container(Space::with_height(1))
                .width(Length::Fill)
                .style(move |t: &Theme| styles::divider(t)),
            self.build_chat_body(theme),
            self.build_footer(theme),
        ]
        .into();
        match &self.modal {
            HomeModal::None => main_element,
            HomeModal::Login(form) => {
                stack![main_element, self.build_login_modal(form, theme)].into()
            }
            HomeModal::SignUp(form) => {
                stack![main_element, self.build_sign_up_modal(form, theme)].into()
            }
            HomeModal::ProfileSetup(form) => {
                stack![main_element, self.build_profile_setup_modal(form, theme)].into()
            }
            HomeModal::PeerChat(state) => {
                stack![main_element, self.build_peer_chat_modal(state, theme)].into()
            }
        }
    }
}

fn build_message_bubble<'a>(
    message: &'a ChatMessage,
    theme: &'a Theme,
) -> Element<'a, HomeMessage> {
    let is_mine = message.author.is_me();
    let bubble_style: fn(&Theme) -> iced::widget::container::Style = if is_mine {
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

fn build_roster_card<'a>(peer: &'a Peer, theme: &'a Theme) -> Element<'a, HomeMessage> {
    let avatar = container(
        text(initial_of(&peer.name))
            .size(16)
            .color(colors::text_primary(theme)),
    )
    .center_x(Length::Fixed(36.0))
    .center_y(Length::Fixed(36.0))
    .style(move |t: &Theme| styles::thumbnail(t));
    let name_row = row![
        text(&peer.name).size(14).color(colors::text_primary(theme)),
        build_online_dot(),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let mut card = column![
        row![avatar, name_row].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(6);
    if let Some(song) = &peer.recent_song {
        card = card.push(
            button(
                text(format!("🎵 {} - {}", song.title, song.artist))
                    .size(12)
                    .color(colors::text_secondary(theme)),
            )
            .on_press(HomeMessage::OpenSong(song.video_url.clone()))
            .padding([4, 8])
            .style(button::text),
        );
    }
    card = card.push(
        button(text("Chat").size(12))
            .on_press(HomeMessage::OpenPeerChat(peer.id))
            .padding([4, 12])
            .style(button::secondary),
    );
    container(card)
        .padding(10)
        .style(move |t: &Theme| styles::card(t))
        .into()
}

fn build_field<'a>(
    label: &'static str,
    input: TextInput<'a, HomeMessage>,
    error: Option<&'a String>,
    theme: &'a Theme,
) -> Element<'a, HomeMessage> {
    let mut group = column![
        text(label).size(12).color(colors::text_secondary(theme)),
        input.padding(10).size(14),
    ]
    .spacing(4);
    if let Some(err) = error {
        group = group.push(build_field_error(err, theme));
    }
    group.into()
}

fn build_field_error<'a>(err: &'a str, theme: &'a Theme) -> Element<'a, HomeMessage> {
    text(err).size(11).color(colors::text_error(theme)).into()
}

fn build_social_button<'a>(
    label: &'static str,
    provider: SocialProvider,
) -> Element<'a, HomeMessage> {
    button(
        text(label)
            .size(14)
            .width(Length::Fill)
            .align_x(Alignment::Center),
    )
    .on_press(HomeMessage::SocialLogin(provider))
    .padding([10, 16])
    .width(Length::Fill)
    .style(button::secondary)
    .into()
}

fn build_show_password_button<'a>(show_password: bool) -> Element<'a, HomeMessage> {
    button(text(if show_password { "Hide" } else { "Show" }).size(12))
        .on_press(HomeMessage::ToggleShowPassword)
        .padding(2)
        .style(button::text)
        .into()
}

fn build_close_button<'a>(theme: &'a Theme) -> Element<'a, HomeMessage> {
    button(icons::icon(
        icons::CLOSE_ICON,
        18.0,
        colors::text_secondary(theme),
    ))
    .on_press(HomeMessage::HideModal)
    .padding(4)
    .style(styles::button_icon)
    .into()
}

fn build_chip<'a>(
    label: &'a str,
    selected: bool,
    message: HomeMessage,
) -> Element<'a, HomeMessage> {
    let style: fn(&Theme, button::Status) -> button::Style = if selected {
        styles::button_chip_selected
    } else {
        styles::button_chip
    };
    button(text(label).size(12))
        .on_press(message)
        .padding([6, 12])
        .style(style)
        .into()
}

fn build_online_dot<'a>() -> Element<'a, HomeMessage> {
    container(Space::new(Length::Fixed(10.0), Length::Fixed(10.0)))
        .style(move |t: &Theme| styles::online_dot(t))
        .into()
}

fn build_overlay(dialog: Element<'_, HomeMessage>) -> Element<'_, HomeMessage> {
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

fn initial_of(name: &str) -> String {
    name.chars().next().map(|c| c.to_string()).unwrap_or_default()
}

fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some("Please enter your name".to_string())
    } else {
        None
    }
}

fn validate_nickname(nickname: &str) -> Option<String> {
    if nickname.trim().is_empty() {
        Some("Please enter a nickname".to_string())
    } else {
        None
    }
}

fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        Some("Please enter a password".to_string())
    } else if password.chars().count() < 6 {
        Some("Password must be at least 6 characters".to_string())
    } else {
        None
    }
}

fn validate_password_confirm(password: &str, confirm: &str) -> Option<String> {
    if password != confirm {
        Some("Passwords do not match".to_string())
    } else {
        None
    }
}

fn validate_phone(phone: &str) -> Option<String> {
    if phone.trim().is_empty() {
        Some("Please enter your phone number".to_string())
    } else {
        None
    }
}
