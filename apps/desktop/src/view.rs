use iced::{
    Alignment, Border, Element, Length, Theme,
    widget::{button, column, container, progress_bar, row, scrollable, text, text_input},
};
use vidask_core::{AnswerSection, Failure};

use crate::app::{App, Message};

pub fn view(app: &App) -> Element<'_, Message> {
    let mut content = column![
        header(),
        row![drop_zone(app.hovering), preview(app)]
            .spacing(40)
            .align_y(Alignment::Center),
    ]
    .spacing(24)
    .padding(30)
    .align_x(Alignment::Center)
    .width(Length::Fill);

    if let Some(notice) = &app.notice {
        content = content.push(text(notice).style(text::danger));
    }

    if app.session.is_question_visible() {
        content = content.push(question_input(app.session.question()));
    }

    if let Some(answer) = answer_section(app) {
        content = content.push(answer);
    }

    scrollable(container(content).center_x(Length::Fill)).into()
}

fn header<'a>() -> Element<'a, Message> {
    column![
        text("Video Q&A").size(26),
        text("Upload a video & ask questions").size(16),
    ]
    .spacing(4)
    .align_x(Alignment::Center)
    .into()
}

fn drop_zone<'a>(hovering: bool) -> Element<'a, Message> {
    let inner = column![
        text("⬆").size(48),
        text("Drag file to upload").size(20),
        text("Or").size(15),
        button(text("Browse Files"))
            .padding([6, 20])
            .on_press(Message::BrowseFiles),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    container(inner)
        .padding([60, 40])
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let color = if hovering {
                palette.primary.strong.color
            } else {
                palette.background.strong.color
            };
            container::Style {
                background: hovering.then(|| palette.primary.weak.color.scale_alpha(0.15).into()),
                border: Border {
                    color,
                    width: 3.0,
                    radius: 20.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

fn preview(app: &App) -> Element<'_, Message> {
    let previews = app.session.previews();
    let source = app
        .session
        .preview()
        .and_then(|handle| previews.resolve(&handle));

    match (app.session.selected_file(), source) {
        (Some(file), Some(source)) => column![
            container(text("▶").size(48))
                .padding([50, 90])
                .style(container::rounded_box),
            text(file.name()).size(15),
            text(file.display_size()).size(12),
            text(source.display().to_string())
                .size(10)
                .style(text::secondary),
        ]
        .spacing(6)
        .into(),
        _ => column![].into(),
    }
}

fn question_input(question: &str) -> Element<'_, Message> {
    row![
        text_input("Type your question here...", question)
            .on_input(Message::QuestionChanged)
            .padding(12)
            .width(Length::Fill),
        button(text("Send")).padding([10, 16]).on_press(Message::SendPressed),
    ]
    .spacing(8)
    .width(Length::Fill)
    .align_y(Alignment::Center)
    .into()
}

fn answer_section(app: &App) -> Option<Element<'_, Message>> {
    match app.session.answer_section() {
        AnswerSection::Hidden => None,
        AnswerSection::Progress => Some(
            column![
                progress_bar(0.0..=1.0, app.progress),
                text("Waiting for the answer...").size(14),
            ]
            .spacing(8)
            .width(Length::Fixed(320.0))
            .align_x(Alignment::Center)
            .into(),
        ),
        AnswerSection::Answer(answer) => Some(answer_box(text(answer).size(15).into())),
        AnswerSection::Error(failure) => Some(answer_box(error_text(failure))),
    }
}

fn error_text(failure: &Failure) -> Element<'_, Message> {
    column![
        text("The question could not be answered").size(15),
        text(&failure.message).size(13).style(text::danger),
    ]
    .spacing(6)
    .into()
}

fn answer_box(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
