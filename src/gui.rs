use iced::widget::{rule, Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Border, Color, Element, Length, Task};

use std::path::PathBuf;

use rfd::AsyncFileDialog;
use tracing::{info, warn};

use crate::engine::{self, CancelToken};
use crate::models::{Algorithm, ChecksumError, ChecksumSet};

const GENERIC_FAILURE: &str =
    "Failed to calculate checksums. The file may not exist or is unreadable.";

#[derive(Debug, Clone, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub enum Message {
    ChooseFile,
    FileChosen(Option<PathBuf>),
    PathChanged(String),
    Calculate,
    Completed(Result<ChecksumSet, String>),
    Cancelled,
    CancelCalculation,
    CopyDigest(Algorithm),
    Clear,
    ToggleTheme,
    ToggleAbout,
}

pub struct QuadSumApp {
    file_path: String,
    checksums: Option<ChecksumSet>,
    is_calculating: bool,
    error_message: Option<String>,
    cancel: Option<CancelToken>,
    theme: Theme,
    show_about: bool,
}

impl QuadSumApp {
    pub fn new() -> (Self, Task<Message>) {
        (
            QuadSumApp {
                file_path: String::new(),
                checksums: None,
                is_calculating: false,
                error_message: None,
                cancel: None,
                theme: Theme::Light,
                show_about: false,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseFile => {
                return Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .set_directory(".")
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FileChosen,
                );
            }
            Message::FileChosen(Some(path)) => {
                self.file_path = path.display().to_string();
                return self.start_calculation();
            }
            Message::FileChosen(None) => { /* dialog dismissed */ }
            Message::PathChanged(path) => {
                if !self.is_calculating {
                    self.file_path = path;
                }
            }
            Message::Calculate => {
                return self.start_calculation();
            }
            Message::Completed(Ok(set)) => {
                info!("checksums ready");
                self.is_calculating = false;
                self.cancel = None;
                self.checksums = Some(set);
            }
            Message::Completed(Err(reason)) => {
                warn!(%reason, "checksum run failed");
                self.is_calculating = false;
                self.cancel = None;
                self.error_message = Some(GENERIC_FAILURE.to_string());
            }
            Message::Cancelled => {
                self.is_calculating = false;
                self.cancel = None;
            }
            Message::CancelCalculation => {
                if let Some(token) = &self.cancel {
                    token.cancel();
                }
            }
            Message::CopyDigest(algorithm) => {
                if let Some(set) = &self.checksums {
                    return iced::clipboard::write(set.digest(algorithm).to_string());
                }
            }
            Message::Clear => {
                self.checksums = None;
                self.error_message = None;
            }
            Message::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            }
            Message::ToggleAbout => {
                self.show_about = !self.show_about;
            }
        }
        Task::none()
    }

    fn start_calculation(&mut self) -> Task<Message> {
        let path = self.file_path.trim().to_string();
        if path.is_empty() || self.is_calculating {
            return Task::none();
        }
        info!(%path, "starting checksum calculation");
        self.checksums = None;
        self.error_message = None;
        self.is_calculating = true;
        let token = CancelToken::new();
        self.cancel = Some(token.clone());
        Task::perform(
            engine::compute_checksums_with_cancel(PathBuf::from(path), token),
            |result| match result {
                Ok(set) => Message::Completed(Ok(set)),
                Err(ChecksumError::Cancelled) => Message::Cancelled,
                Err(err) => Message::Completed(Err(err.to_string())),
            },
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = if self.show_about {
            self.view_about()
        } else {
            self.view_main()
        };

        let bg_color = self.bg_color();
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(bg_color)),
                border: Border::default(),
                ..Default::default()
            })
            .into()
    }

    fn view_main(&self) -> Element<'_, Message> {
        let mut column = Column::new()
            .padding(20)
            .spacing(15)
            .width(Length::Fill)
            .push(self.view_path_row())
            .push(rule::Rule::horizontal(1));

        for algorithm in Algorithm::all() {
            column = column.push(self.view_digest_row(algorithm));
        }

        column = column.push(rule::Rule::horizontal(1));

        if self.is_calculating {
            column = column.push(self.view_progress_row());
        } else if let Some(error) = &self.error_message {
            let error_text = Text::new(error.clone()).size(14).style(|_theme| {
                iced::widget::text::Style {
                    color: Some(Color::from_rgb(0.9, 0.2, 0.2)),
                }
            });
            column = column.push(error_text);
        }

        column = column.push(Space::with_height(Length::Fill));
        column = column.push(self.view_toolbar_row());

        column.into()
    }

    fn view_path_row(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let label = Text::new("File:")
            .size(16)
            .width(Length::Fixed(70.0))
            .style(move |_theme| iced::widget::text::Style {
                color: Some(text_color),
            });

        let mut path_input = TextInput::new("Choose a file...", &self.file_path)
            .padding(10)
            .size(14)
            .width(Length::Fill);
        if !self.is_calculating {
            path_input = path_input
                .on_input(Message::PathChanged)
                .on_submit(Message::Calculate);
        }

        let mut browse_btn = Button::new(Text::new("Browse...").size(14)).padding(10);
        if !self.is_calculating {
            browse_btn = browse_btn.on_press(Message::ChooseFile);
        }

        let mut calculate_btn = Button::new(Text::new("Calculate").size(14)).padding(10);
        if !self.is_calculating && !self.file_path.trim().is_empty() {
            calculate_btn = calculate_btn.on_press(Message::Calculate);
        }

        Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(label)
            .push(path_input)
            .push(browse_btn)
            .push(calculate_btn)
            .into()
    }

    fn view_digest_row(&self, algorithm: Algorithm) -> Element<'_, Message> {
        let text_color = self.text_color();
        let tertiary_text = self.tertiary_text_color();
        let container_bg = self.container_bg_color();
        let border_color = self.border_color();

        let label = Text::new(algorithm.name())
            .size(14)
            .width(Length::Fixed(70.0))
            .style(move |_theme| iced::widget::text::Style {
                color: Some(text_color),
            });

        let digest = self
            .checksums
            .as_ref()
            .map(|set| set.digest(algorithm).to_string());

        let value_text = match &digest {
            Some(hex) => Text::new(hex.clone())
                .size(13)
                .font(iced::Font::MONOSPACE)
                .style(move |_theme| iced::widget::text::Style {
                    color: Some(text_color),
                }),
            None => Text::new("not calculated").size(13).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(tertiary_text),
                }
            }),
        };

        let value_box = Container::new(value_text)
            .padding(10)
            .width(Length::Fill)
            .style(move |_theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(container_bg)),
                border: Border {
                    color: border_color,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            });

        let mut copy_btn = Button::new(Text::new("Copy").size(14)).padding(10);
        if digest.is_some() && !self.is_calculating {
            copy_btn = copy_btn.on_press(Message::CopyDigest(algorithm));
        }

        Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(label)
            .push(value_box)
            .push(copy_btn)
            .into()
    }

    fn view_progress_row(&self) -> Element<'_, Message> {
        let accent = self.accent_color();
        let secondary_text = self.secondary_text_color();

        let spinner = Text::new("⟳")
            .size(20)
            .style(move |_theme| iced::widget::text::Style {
                color: Some(accent),
            });

        let status = Text::new("Calculating...")
            .size(14)
            .style(move |_theme| iced::widget::text::Style {
                color: Some(secondary_text),
            });

        let cancel_btn = Button::new(Text::new("Cancel").size(14))
            .on_press(Message::CancelCalculation)
            .padding(10);

        Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(spinner)
            .push(status)
            .push(Space::with_width(Length::Fill))
            .push(cancel_btn)
            .into()
    }

    fn view_toolbar_row(&self) -> Element<'_, Message> {
        let mut clear_btn = Button::new(Text::new("Clear").size(14)).padding(10);
        if !self.is_calculating && (self.checksums.is_some() || self.error_message.is_some()) {
            clear_btn = clear_btn.on_press(Message::Clear);
        }

        let theme_btn = Button::new(
            Text::new(match self.theme {
                Theme::Light => "Dark Mode",
                Theme::Dark => "Light Mode",
            })
            .size(14),
        )
        .on_press(Message::ToggleTheme)
        .padding(10);

        let about_btn = Button::new(Text::new("About").size(14))
            .on_press(Message::ToggleAbout)
            .padding(10);

        Row::new()
            .spacing(10)
            .push(clear_btn)
            .push(Space::with_width(Length::Fill))
            .push(theme_btn)
            .push(about_btn)
            .into()
    }

    fn view_about(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let secondary_text = self.secondary_text_color();
        let accent = self.accent_color();

        let title = Text::new("QuadSum")
            .size(32)
            .style(move |_theme| iced::widget::text::Style {
                color: Some(accent),
            });

        let version = Text::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
            .size(14)
            .style(move |_theme| iced::widget::text::Style {
                color: Some(secondary_text),
            });

        let blurb = Text::new(
            "Computes the MD5, SHA-1, SHA-256 and SHA-512 checksums of a file \
             in a single pass, for integrity verification.",
        )
        .size(14)
        .style(move |_theme| iced::widget::text::Style {
            color: Some(text_color),
        });

        let back_btn = Button::new(Text::new("Back").size(14))
            .on_press(Message::ToggleAbout)
            .padding(10);

        let content = Column::new()
            .padding(40)
            .spacing(15)
            .width(Length::Fill)
            .align_x(Alignment::Center)
            .push(title)
            .push(version)
            .push(Space::with_height(10))
            .push(blurb)
            .push(Space::with_height(20))
            .push(back_btn);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    // Theme color helpers
    fn bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(1.0, 1.0, 1.0),
            Theme::Dark => Color::from_rgb(0.11, 0.11, 0.13),
        }
    }

    fn text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.1, 0.1, 0.1),
            Theme::Dark => Color::from_rgb(0.9, 0.9, 0.9),
        }
    }

    fn secondary_text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.4, 0.4, 0.4),
            Theme::Dark => Color::from_rgb(0.6, 0.6, 0.6),
        }
    }

    fn tertiary_text_color(&self) -> Color {
        Color::from_rgb(0.5, 0.5, 0.5)
    }

    fn container_bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.95, 0.95, 0.95),
            Theme::Dark => Color::from_rgb(0.2, 0.2, 0.22),
        }
    }

    fn border_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.8, 0.8, 0.8),
            Theme::Dark => Color::from_rgb(0.3, 0.3, 0.32),
        }
    }

    fn accent_color(&self) -> Color {
        Color::from_rgb(0.2, 0.5, 0.8)
    }
}
