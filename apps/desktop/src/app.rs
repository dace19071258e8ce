use std::{path::PathBuf, time::Duration};

use iced::{
    Event, Size, Subscription, Task, event,
    keyboard::{self, Key, Modifiers, key::Named},
    time, window,
};
use vidask_core::{AskClient, Failure, SelectedFile, Session, VIDEO_EXTENSIONS};

use crate::view;

pub fn run(client: AskClient, initial_video: Option<PathBuf>) -> iced::Result {
    let boot = move || App::new(client.clone(), initial_video.clone());

    iced::application(boot, App::update, view::view)
        .title(App::title)
        .window(window::Settings {
            size: Size::new(900.0, 720.0),
            min_size: Some(Size::new(520.0, 480.0)),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

pub struct App {
    pub(crate) session: Session,
    pub(crate) client: AskClient,
    pub(crate) hovering: bool,
    pub(crate) progress: f32,
    pub(crate) notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    BrowseFiles,
    FilePicked(Option<PathBuf>),
    FileDropped(PathBuf),
    FileHovered,
    FilesHoveredLeft,
    FileOpened(Result<SelectedFile, Failure>),
    QuestionChanged(String),
    SendPressed,
    SubmitKeyPressed,
    AnswerReceived(u64, Result<String, Failure>),
    Tick,
}

impl App {
    pub fn new(client: AskClient, initial_video: Option<PathBuf>) -> (Self, Task<Message>) {
        let app = Self {
            session: Session::new(),
            client,
            hovering: false,
            progress: 0.0,
            notice: None,
        };
        let task = initial_video.map_or_else(Task::none, open_file);
        (app, task)
    }

    pub fn title(&self) -> String {
        match self.session.selected_file() {
            Some(file) => format!("{} - Vidask", file.name()),
            None => "Vidask".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseFiles => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select a video")
                            .add_filter("Video", VIDEO_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FilePicked,
                );
            }
            Message::FilePicked(None) => {}
            Message::FilePicked(Some(path)) | Message::FileDropped(path) => {
                self.hovering = false;
                return open_file(path);
            }
            Message::FileHovered => self.hovering = true,
            Message::FilesHoveredLeft => self.hovering = false,
            Message::FileOpened(Ok(file)) => {
                self.notice = None;
                self.session.select_file(file);
            }
            Message::FileOpened(Err(failure)) => {
                tracing::warn!("could not open video: {}", failure.message);
                self.notice = Some(failure.message);
            }
            Message::QuestionChanged(question) => self.session.set_question(question),
            Message::SendPressed => return self.submit(),
            Message::SubmitKeyPressed => {
                if self.session.is_question_visible() {
                    return self.submit();
                }
            }
            Message::AnswerReceived(generation, outcome) => {
                self.session.complete(generation, outcome);
            }
            Message::Tick => self.progress = (self.progress + 0.02) % 1.0,
        }
        Task::none()
    }

    fn submit(&mut self) -> Task<Message> {
        let submission = self.session.submit();
        let generation = submission.generation;
        let client = self.client.clone();
        self.progress = 0.0;

        Task::perform(
            async move { client.ask(&submission).await.map_err(Failure::from) },
            move |outcome| Message::AnswerReceived(generation, outcome),
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(handle_event);

        if self.session.is_loading() {
            Subscription::batch([
                events,
                time::every(Duration::from_millis(30)).map(|_| Message::Tick),
            ])
        } else {
            events
        }
    }
}

fn open_file(path: PathBuf) -> Task<Message> {
    Task::perform(
        async move { SelectedFile::open(&path).await.map_err(Failure::from) },
        Message::FileOpened,
    )
}

/// Enter submits; Shift+Enter and auto-repeat from a held key do not
pub fn is_submit_key(key: &Key, modifiers: Modifiers, repeat: bool) -> bool {
    matches!(key, Key::Named(Named::Enter)) && !modifiers.shift() && !repeat
}

fn handle_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Keyboard(keyboard::Event::KeyPressed {
            key,
            modifiers,
            repeat,
            ..
        }) if is_submit_key(&key, modifiers, repeat) =>
        {
            Some(Message::SubmitKeyPressed)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidask_core::{AnswerSection, Config, FailureKind, SubmissionStatus};

    fn app() -> App {
        let client = AskClient::new(&Config::default()).unwrap();
        App::new(client, None).0
    }

    fn with_file(name: &str) -> App {
        let mut app = app();
        let _ = app.update(Message::FileOpened(Ok(SelectedFile::from_parts(
            format!("/videos/{name}"),
            5_000_000,
        ))));
        app
    }

    #[test]
    fn question_entry_appears_after_a_file_is_opened() {
        let app_without = app();
        assert!(!app_without.session.is_question_visible());
        assert_eq!(app_without.title(), "Vidask");

        let app = with_file("talk.mp4");
        assert!(app.session.is_question_visible());
        assert_eq!(app.title(), "talk.mp4 - Vidask");
    }

    #[test]
    fn send_button_and_enter_submit_the_same_thing() {
        let mut clicked = with_file("talk.mp4");
        let mut typed = with_file("talk.mp4");
        for app in [&mut clicked, &mut typed] {
            let _ = app.update(Message::QuestionChanged("who speaks?".to_string()));
        }

        let _ = clicked.update(Message::SendPressed);
        let _ = typed.update(Message::SubmitKeyPressed);

        assert_eq!(clicked.session.status(), &SubmissionStatus::Loading);
        assert_eq!(typed.session.status(), clicked.session.status());
        assert_eq!(typed.session.generation(), clicked.session.generation());
        assert_eq!(typed.session.question(), clicked.session.question());
    }

    #[test]
    fn enter_without_a_file_does_nothing() {
        let mut app = app();
        let _ = app.update(Message::SubmitKeyPressed);
        assert_eq!(app.session.answer_section(), AnswerSection::Hidden);
    }

    #[test]
    fn shift_enter_is_not_a_submit() {
        let enter = Key::Named(Named::Enter);
        assert!(is_submit_key(&enter, Modifiers::empty(), false));
        assert!(is_submit_key(&enter, Modifiers::CTRL, false));
        assert!(!is_submit_key(&enter, Modifiers::SHIFT, false));
        assert!(!is_submit_key(&Key::Named(Named::Tab), Modifiers::empty(), false));
    }

    #[test]
    fn held_enter_does_not_resubmit() {
        let enter = Key::Named(Named::Enter);
        assert!(is_submit_key(&enter, Modifiers::empty(), false));
        assert!(!is_submit_key(&enter, Modifiers::empty(), true));
    }

    #[test]
    fn answer_replaces_progress() {
        let mut app = with_file("talk.mp4");
        let _ = app.update(Message::SendPressed);
        let generation = app.session.generation();

        let _ = app.update(Message::AnswerReceived(
            generation,
            Ok("Two people.\nBoth British.".to_string()),
        ));

        assert_eq!(
            app.session.answer_section(),
            AnswerSection::Answer("Two people.\nBoth British.")
        );
    }

    #[test]
    fn superseded_answer_is_ignored() {
        let mut app = with_file("talk.mp4");
        let _ = app.update(Message::SendPressed);
        let first = app.session.generation();
        let _ = app.update(Message::SendPressed);
        let second = app.session.generation();

        let _ = app.update(Message::AnswerReceived(second, Ok("new".to_string())));
        let _ = app.update(Message::AnswerReceived(first, Ok("old".to_string())));

        assert_eq!(app.session.answer_section(), AnswerSection::Answer("new"));
    }

    #[test]
    fn new_file_hides_answer() {
        let mut app = with_file("talk.mp4");
        let _ = app.update(Message::SendPressed);
        let generation = app.session.generation();
        let _ = app.update(Message::AnswerReceived(generation, Ok("answer".to_string())));

        let _ = app.update(Message::FileOpened(Ok(SelectedFile::from_parts(
            "/videos/other.mkv",
            1,
        ))));

        assert_eq!(app.session.answer_section(), AnswerSection::Hidden);
        assert_eq!(app.session.previews().live_count(), 1);
    }

    #[test]
    fn failed_open_keeps_current_selection() {
        let mut app = with_file("talk.mp4");
        let _ = app.update(Message::FileOpened(Err(Failure {
            kind: FailureKind::File,
            message: "/videos is not a regular file".to_string(),
        })));

        assert_eq!(app.session.selected_file().unwrap().name(), "talk.mp4");
        assert_eq!(app.notice.as_deref(), Some("/videos is not a regular file"));
    }

    #[test]
    fn hover_state_tracks_drag() {
        let mut app = app();
        let _ = app.update(Message::FileHovered);
        assert!(app.hovering);
        let _ = app.update(Message::FilesHoveredLeft);
        assert!(!app.hovering);
    }

    #[test]
    fn window_events_become_messages() {
        let id = window::Id::unique();
        let path = PathBuf::from("/videos/dropped.webm");

        assert_eq!(
            handle_event(
                Event::Window(window::Event::FileDropped(path.clone())),
                event::Status::Ignored,
                id
            ),
            Some(Message::FileDropped(path.clone()))
        );
        assert_eq!(
            handle_event(
                Event::Window(window::Event::FileHovered(path)),
                event::Status::Ignored,
                id
            ),
            Some(Message::FileHovered)
        );
        assert_eq!(
            handle_event(
                Event::Window(window::Event::FilesHoveredLeft),
                event::Status::Ignored,
                id
            ),
            Some(Message::FilesHoveredLeft)
        );
    }
}
