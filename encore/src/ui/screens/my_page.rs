use iced::widget::{Space, button, column, container, row, scrollable, stack, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

use crate::models::{
    MAX_REQUEST_CONTENT, MUSIC_GENRES, RecommendationMode, RequestKind, UserProfile,
};
use crate::ui::core::{Screen, ScreenCommand, ScreenType};
use crate::ui::theme::{ThemePreference, colors, styles};
use crate::ui::{AppContext, icons};

struct ProfileDetailState {
    editing: bool,
    name: String,
    nickname: String,
    genres: Vec<String>,
    mode: RecommendationMode,
}

impl ProfileDetailState {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            editing: false,
            name: profile.name.clone(),
            nickname: profile.nickname.clone(),
            genres: profile.genres.clone(),
            mode: profile.mode,
        }
    }
}

#[derive(Default)]
struct RequestForm {
    kind: Option<RequestKind>,
    content: String,
    submitting: bool,
    error: Option<String>,
}

pub struct MyPageScreen {
    profile: UserProfile,
    theme_preference: ThemePreference,
    detail: Option<ProfileDetailState>,
    request_form: Option<RequestForm>,
    status: Option<String>,
}

#[derive(Clone, Debug)]
pub enum MyPageMessage {
    Back,
    ProfileLoaded(UserProfile),
    // Profile detail modal
    OpenProfileDetail,
    CloseProfileDetail,
    StartEditing,
    CancelEditing,
    EditNameChanged(String),
    EditNicknameChanged(String),
    EditGenreToggled(String),
    EditModeSelected(RecommendationMode),
    ChangeImage,
    SaveProfile,
    ProfileSaved(Result<UserProfile, String>),
    // Navigation cards
    OpenChatList,
    OpenFavorites,
    OpenDeveloperChat,
    // Developer request modal
    OpenRequestForm,
    CloseRequestForm,
    RequestKindSelected(RequestKind),
    RequestContentChanged(String),
    SubmitRequest,
    RequestSubmitted(Result<(), String>),
    // Settings
    ToggleTheme,
    ThemeSaved,
    SignOut,
    SignedOut,
}

impl MyPageScreen {
    pub fn new(theme_preference: ThemePreference) -> Self {
        Self {
            profile: UserProfile::default(),
            theme_preference,
            detail: None,
            request_form: None,
            status: None,
        }
    }

    fn build_header<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let back_button = button(icons::icon(
            icons::BACK_ICON,
            18.0,
            colors::text_primary(theme),
        ))
        .on_press(MyPageMessage::Back)
        .padding(8)
        .style(styles::button_icon);
        let header = row![
            back_button,
            text("My Page")
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

    fn build_profile_card<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let avatar = container(
            text(initial_of(&self.profile.nickname))
                .size(18)
                .color(colors::text_primary(theme)),
        )
        .center_x(Length::Fixed(48.0))
        .center_y(Length::Fixed(48.0))
        .style(styles::thumbnail);
        let summary = column![
            text(&self.profile.name)
                .size(16)
                .color(colors::text_primary(theme)),
            text(format!("@{}", self.profile.nickname))
                .size(12)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(2)
        .width(Length::Fill);
        let body = button(
            row![
                avatar,
                summary,
                text("View profile")
                    .size(12)
                    .color(colors::text_muted(theme)),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
        .on_press(MyPageMessage::OpenProfileDetail)
        .padding(0)
        .style(button::text)
        .width(Length::Fill);
        container(body)
            .width(Length::Fill)
            .padding(14)
            .style(styles::card)
            .into()
    }

    fn build_info_card<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let rows = column![
            build_info_row("Nickname :", self.profile.nickname.clone(), theme),
            build_info_row("Favorite genres :", self.profile.genre_summary(), theme),
            build_info_row(
                "Recommendations used :",
                self.profile.recommendation_count.to_string(),
                theme,
            ),
            build_info_row(
                "Recommendation mode :",
                self.profile.mode.label().to_string(),
                theme,
            ),
        ]
        .spacing(8);
        container(rows)
            .width(Length::Fill)
            .padding(14)
            .style(styles::card)
            .into()
    }

    fn build_theme_card<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let switch_label = format!("Switch to {}", self.theme_preference.toggle().name());
        let body = row![
            text(format!("Theme : {}", self.theme_preference.name()))
                .size(13)
                .color(colors::text_primary(theme))
                .width(Length::Fill),
            button(text(switch_label).size(12))
                .on_press(MyPageMessage::ToggleTheme)
                .padding([6, 12])
                .style(button::secondary),
        ]
        .spacing(8)
        .align_y(Alignment::Center);
        container(body)
            .width(Length::Fill)
            .padding(14)
            .style(styles::card)
            .into()
    }

    fn build_nav_cards<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        row![
            build_nav_card(
                icons::SEARCH_ICON,
                "All Chats",
                "Every recommendation so far",
                MyPageMessage::OpenChatList,
                theme,
            ),
            build_nav_card(
                icons::STAR_FILLED_ICON,
                "Favorite Chats",
                "Songs you starred",
                MyPageMessage::OpenFavorites,
                theme,
            ),
        ]
        .spacing(10)
        .into()
    }

    fn build_developer_card<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let header = row![
            icons::icon(icons::CODE_ICON, 18.0, colors::primary(theme)),
            text("Developer")
                .size(14)
                .color(colors::text_primary(theme)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);
        let actions = row![
            button(text("Write a request").size(12))
                .on_press(MyPageMessage::OpenRequestForm)
                .padding([8, 14])
                .style(button::secondary),
            button(text("Chat with the developer").size(12))
                .on_press(MyPageMessage::OpenDeveloperChat)
                .padding([8, 14])
                .style(button::primary),
        ]
        .spacing(8);
        container(column![header, actions].spacing(10))
            .width(Length::Fill)
            .padding(14)
            .style(styles::card)
            .into()
    }

    fn build_body<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        let mut body = column![].spacing(12);
        if let Some(status) = &self.status {
            body = body.push(
                text(status)
                    .size(12)
                    .color(colors::text_success(theme))
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            );
        }
        body = body
            .push(self.build_profile_card(theme))
            .push(self.build_info_card(theme))
            .push(self.build_theme_card(theme))
            .push(self.build_nav_cards(theme))
            .push(self.build_developer_card(theme))
            .push(
                button(
                    text("Sign Out")
                        .size(13)
                        .width(Length::Fill)
                        .align_x(Alignment::Center),
                )
                .on_press(MyPageMessage::SignOut)
                .padding(10)
                .width(Length::Fill)
                .style(styles::button_danger),
            );
        scrollable(container(body).padding(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn build_profile_modal<'a>(
        &'a self,
        detail: &'a ProfileDetailState,
        theme: &'a Theme,
    ) -> Element<'a, MyPageMessage> {
        let close_button = button(icons::icon(
            icons::CLOSE_ICON,
            18.0,
            colors::text_secondary(theme),
        ))
        .on_press(MyPageMessage::CloseProfileDetail)
        .padding(4)
        .style(styles::button_icon);
        let title = if detail.editing { "Edit Profile" } else { "Profile" };
        let header = row![
            text(title).size(18).color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            close_button,
        ]
        .align_y(Alignment::Center);
        let avatar = container(
            text(initial_of(&self.profile.nickname))
                .size(24)
                .color(colors::text_primary(theme)),
        )
        .center_x(Length::Fixed(72.0))
        .center_y(Length::Fixed(72.0))
        .style(styles::thumbnail);
        let body: Element<'a, MyPageMessage> = if detail.editing {
            self.build_profile_edit_body(detail, theme)
        } else {
            self.build_profile_view_body(theme)
        };
        let dialog = container(
            scrollable(
                column![
                    header,
                    container(avatar).center_x(Length::Fill),
                    body
                ]
                .spacing(16),
            )
            .height(Length::Fixed(520.0)),
        )
        .width(Length::Fixed(480.0))
        .padding(24)
        .style(styles::card);
        build_overlay(dialog.into())
    }

    fn build_profile_view_body<'a>(&'a self, theme: &'a Theme) -> Element<'a, MyPageMessage> {
        column![
            build_info_row("Name :", self.profile.name.clone(), theme),
            build_info_row("Nickname :", self.profile.nickname.clone(), theme),
            build_info_row("Joined :", self.profile.join_date.clone(), theme),
            build_info_row("Favorite genres :", self.profile.genre_summary(), theme),
            build_info_row(
                "Recommendation mode :",
                self.profile.mode.label().to_string(),
                theme,
            ),
            build_info_row(
                "Recommendations used :",
                self.profile.recommendation_count.to_string(),
                theme,
            ),
            button(
                text("Edit Profile")
                    .size(13)
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            )
            .on_press(MyPageMessage::StartEditing)
            .padding(10)
            .width(Length::Fill)
            .style(button::primary),
        ]
        .spacing(10)
        .into()
    }

    fn build_profile_edit_body<'a>(
        &'a self,
        detail: &'a ProfileDetailState,
        theme: &'a Theme,
    ) -> Element<'a, MyPageMessage> {
        let image_button = button(text("Change image").size(12))
            .on_press(MyPageMessage::ChangeImage)
            .padding([6, 12])
            .style(button::secondary);
        let name_field = column![
            text("Name").size(12).color(colors::text_secondary(theme)),
            text_input("Your name", &detail.name)
                .on_input(MyPageMessage::EditNameChanged)
                .padding(10)
                .size(14),
        ]
        .spacing(4);
        let nickname_field = column![
            text("Nickname")
                .size(12)
                .color(colors::text_secondary(theme)),
            text_input("Your nickname", &detail.nickname)
                .on_input(MyPageMessage::EditNicknameChanged)
                .padding(10)
                .size(14),
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
                let selected = detail.genres.iter().any(|g| g == genre);
                chips = chips.push(build_chip(
                    genre,
                    selected,
                    MyPageMessage::EditGenreToggled(genre.to_string()),
                ));
            }
            genre_section = genre_section.push(chips);
        }
        let mut mode_section = column![
            text("Choose a recommendation mode")
                .size(12)
                .color(colors::text_secondary(theme)),
        ]
        .spacing(8);
        for mode in RecommendationMode::all() {
            let selected = detail.mode == mode;
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
                .on_press(MyPageMessage::EditModeSelected(mode))
                .padding(10)
                .width(Length::Fill)
                .style(style),
            );
        }
        let actions = row![
            button(
                text("Cancel")
                    .size(14)
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            )
            .on_press(MyPageMessage::CancelEditing)
            .padding([10, 16])
            .width(Length::Fill)
            .style(button::secondary),
            button(
                text("Save")
                    .size(14)
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            )
            .on_press(MyPageMessage::SaveProfile)
            .padding([10, 16])
            .width(Length::Fill)
            .style(button::primary),
        ]
        .spacing(8);
        column![
            container(image_button).center_x(Length::Fill),
            name_field,
            nickname_field,
            genre_section,
            mode_section,
            actions,
        ]
        .spacing(14)
        .into()
    }

    fn build_request_modal<'a>(
        &'a self,
        form: &'a RequestForm,
        theme: &'a Theme,
    ) -> Element<'a, MyPageMessage> {
        let close_button = button(icons::icon(
            icons::CLOSE_ICON,
            18.0,
            colors::text_secondary(theme),
        ))
        .on_press(MyPageMessage::CloseRequestForm)
        .padding(4)
        .style(styles::button_icon);
        let header = row![
            text("Send a request to the developer")
                .size(16)
                .color(colors::text_primary(theme)),
            Space::with_width(Length::Fill),
            close_button,
        ]
        .align_y(Alignment::Center);
        let mut kinds = row![].spacing(8);
        for kind in RequestKind::all() {
            kinds = kinds.push(build_chip(
                kind.label(),
                form.kind == Some(kind),
                MyPageMessage::RequestKindSelected(kind),
            ));
        }
        let counter = text(format!(
            "{}/{MAX_REQUEST_CONTENT}",
            form.content.chars().count()
        ))
        .size(10)
        .color(colors::text_muted(theme))
        .width(Length::Fill)
        .align_x(Alignment::End);
        let submit_label = if form.submitting { "Submitting..." } else { "Submit" };
        let submit = button(
            text(submit_label)
                .size(13)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .on_press_maybe((!form.submitting).then_some(MyPageMessage::SubmitRequest))
        .padding(10)
        .width(Length::Fill)
        .style(button::primary);
        let mut dialog = column![
            header,
            text("Request type")
                .size(12)
                .color(colors::text_secondary(theme)),
            kinds,
            text("Details")
                .size(12)
                .color(colors::text_secondary(theme)),
            text_input("Describe your request...", &form.content)
                .on_input(MyPageMessage::RequestContentChanged)
                .padding(10)
                .size(13),
            counter,
        ]
        .spacing(10);
        if let Some(error) = &form.error {
            dialog = dialog.push(text(error).size(11).color(colors::text_error(theme)));
        }
        dialog = dialog.push(submit);
        build_overlay(
            container(dialog)
                .width(Length::Fixed(420.0))
                .padding(20)
                .style(styles::card)
                .into(),
        )
    }
}

impl Screen for MyPageScreen {
    type Message = MyPageMessage;

    fn update(
        &mut self,
        message: Self::Message,
        ctx: &mut AppContext,
    ) -> ScreenCommand<Self::Message> {
        match message {
            MyPageMessage::Back => ScreenCommand::ChangeScreen(ScreenType::Home),
            MyPageMessage::ProfileLoaded(profile) => {
                self.profile = profile;
                ScreenCommand::None
            }
            MyPageMessage::OpenProfileDetail => {
                self.detail = Some(ProfileDetailState::from_profile(&self.profile));
                ScreenCommand::None
            }
            MyPageMessage::CloseProfileDetail => {
                self.detail = None;
                ScreenCommand::None
            }
            MyPageMessage::StartEditing => {
                self.detail = Some(ProfileDetailState {
                    editing: true,
                    ..ProfileDetailState::from_profile(&self.profile)
                });
                ScreenCommand::None
            }
            MyPageMessage::CancelEditing => {
                self.detail = Some(ProfileDetailState::from_profile(&self.profile));
                ScreenCommand::None
            }
            MyPageMessage::EditNameChanged(value) => {
                if let Some(detail) = &mut self.detail {
                    detail.name = value;
                }
                ScreenCommand::None
            }
            MyPageMessage::EditNicknameChanged(value) => {
                if let Some(detail) = &mut self.detail {
                    detail.nickname = value;
                }
                ScreenCommand::None
            }
            MyPageMessage::EditGenreToggled(genre) => {
                if let Some(detail) = &mut self.detail {
                    if let Some(index) = detail.genres.iter().position(|g| *g == genre) {
                        detail.genres.remove(index);
                    } else {
                        detail.genres.push(genre);
                    }
                }
                ScreenCommand::None
            }
            MyPageMessage::EditModeSelected(mode) => {
                if let Some(detail) = &mut self.detail {
                    detail.mode = mode;
                }
                ScreenCommand::None
            }
            MyPageMessage::ChangeImage => {
                tracing::info!("Profile image upload requested");
                ScreenCommand::None
            }
            MyPageMessage::SaveProfile => {
                let Some(detail) = &self.detail else {
                    return ScreenCommand::None;
                };
                let updated = UserProfile {
                    name: detail.name.trim().to_string(),
                    nickname: detail.nickname.trim().to_string(),
                    genres: detail.genres.clone(),
                    mode: detail.mode,
                    ..self.profile.clone()
                };
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        session
                            .update_profile(updated.clone())
                            .await
                            .map(|_| updated)
                            .map_err(|err| err.to_string())
                    },
                    MyPageMessage::ProfileSaved,
                ))
            }
            MyPageMessage::ProfileSaved(Ok(profile)) => {
                self.profile = profile;
                self.detail = Some(ProfileDetailState::from_profile(&self.profile));
                self.status = Some("Profile updated!".to_string());
                ScreenCommand::None
            }
            MyPageMessage::ProfileSaved(Err(err)) => {
                tracing::error!(%err, "Cannot save profile");
                self.status = Some("Could not save the profile.".to_string());
                ScreenCommand::None
            }
            MyPageMessage::OpenChatList => ScreenCommand::ChangeScreen(ScreenType::ChatList),
            MyPageMessage::OpenFavorites => ScreenCommand::ChangeScreen(ScreenType::Favorites),
            MyPageMessage::OpenDeveloperChat => {
                ScreenCommand::ChangeScreen(ScreenType::DeveloperChat)
            }
            MyPageMessage::OpenRequestForm => {
                self.request_form = Some(RequestForm::default());
                ScreenCommand::None
            }
            MyPageMessage::CloseRequestForm => {
                self.request_form = None;
                ScreenCommand::None
            }
            MyPageMessage::RequestKindSelected(kind) => {
                if let Some(form) = &mut self.request_form {
                    form.kind = Some(kind);
                    form.error = None;
                }
                ScreenCommand::None
            }
            MyPageMessage::RequestContentChanged(value) => {
                if let Some(form) = &mut self.request_form {
                    if value.chars().count() <= MAX_REQUEST_CONTENT {
                        form.content = value;
                    }
                }
                ScreenCommand::None
            }
            MyPageMessage::SubmitRequest => {
                let Some(form) = &mut self.request_form else {
                    return ScreenCommand::None;
                };
                let content = form.content.trim().to_string();
                let Some(kind) = form.kind.filter(|_| !content.is_empty()) else {
                    form.error =
                        Some("Please choose a request type and enter the details.".to_string());
                    return ScreenCommand::None;
                };
                form.submitting = true;
                form.error = None;
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move {
                        session
                            .submit_request(kind, content)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    MyPageMessage::RequestSubmitted,
                ))
            }
            MyPageMessage::RequestSubmitted(Ok(())) => {
                self.request_form = None;
                self.status = Some("Your request has been submitted!".to_string());
                ScreenCommand::None
            }
            MyPageMessage::RequestSubmitted(Err(err)) => {
                if let Some(form) = &mut self.request_form {
                    form.submitting = false;
                    form.error = Some(err);
                }
                ScreenCommand::None
            }
            MyPageMessage::ToggleTheme => {
                ctx.theme = ctx.theme.toggle();
                self.theme_preference = ctx.theme;
                let config = ctx.config.clone();
                let preference = ctx.theme;
                ScreenCommand::Message(Task::perform(
                    async move {
                        if let Err(err) = config.set_theme(preference) {
                            tracing::warn!(?err, "Cannot persist theme choice");
                        }
                    },
                    |_| MyPageMessage::ThemeSaved,
                ))
            }
            MyPageMessage::ThemeSaved => ScreenCommand::None,
            MyPageMessage::SignOut => {
                let session = ctx.session.clone();
                ScreenCommand::Message(Task::perform(
                    async move { session.sign_out().await },
                    |_| MyPageMessage::SignedOut,
                ))
            }
            MyPageMessage::SignedOut => {
                self.status = Some("You have been signed out.".to_string());
                ScreenCommand::None
            }
        }
    }

    fn view<'a>(&'a self, theme: &'a Theme) -> Element<'a, Self::Message> {
        let base: Element<'a, MyPageMessage> =
            column![self.build_header(theme), self.build_body(theme)]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        if let Some(form) = &self.request_form {
            return stack![base, self.build_request_modal(form, theme)].into();
        }
        if let Some(detail) = &self.detail {
            return stack![base, self.build_profile_modal(detail, theme)].into();
        }
        base
    }
}

fn build_info_row<'a>(
    label: &'a str,
    value: String,
    theme: &'a Theme,
) -> Element<'a, MyPageMessage> {
    row![
        text(label).size(12).color(colors::text_secondary(theme)),
        text(value)
            .size(12)
            .color(colors::text_primary(theme))
            .width(Length::Fill),
    ]
    .spacing(8)
    .into()
}

fn build_nav_card<'a>(
    icon_source: &'static str,
    title: &'a str,
    subtitle: &'a str,
    message: MyPageMessage,
    theme: &'a Theme,
) -> Element<'a, MyPageMessage> {
    let body = button(
        column![
            icons::icon(icon_source, 20.0, colors::primary(theme)),
            text(title).size(13).color(colors::text_primary(theme)),
            text(subtitle).size(10).color(colors::text_muted(theme)),
        ]
        .spacing(4),
    )
    .on_press(message)
    .padding(0)
    .style(button::text)
    .width(Length::Fill);
    container(body)
        .width(Length::Fill)
        .padding(14)
        .style(styles::card)
        .into()
}

fn build_chip<'a>(
    label: &'a str,
    selected: bool,
    message: MyPageMessage,
) -> Element<'a, MyPageMessage> {
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

fn build_overlay(dialog: Element<'_, MyPageMessage>) -> Element<'_, MyPageMessage> {
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
