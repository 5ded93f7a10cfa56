use crate::quiz::{QuizSession, QuizState};
use crate::ui::layout::{calculate_quiz_chunks, calculate_screen_chunks};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    match session.state {
        QuizState::Loading => draw_wait_screen(
            f,
            session,
            "Generating questions...",
            "The AI is reading your document.",
        ),
        QuizState::Submitting => draw_wait_screen(
            f,
            session,
            "Submitting answers...",
            "Waiting for the server to grade your quiz.",
        ),
        QuizState::Failed => draw_failed_screen(f, session),
        QuizState::InProgress => draw_in_progress(f, session),
        // Results has its own screen
        QuizState::Results => {}
    }
}

fn draw_wait_screen(f: &mut Frame, session: &QuizSession, title: &str, detail: &str) {
    let layout = calculate_screen_chunks(f.area());

    let header = Paragraph::new(format!("Quiz - {}", session.document_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(detail.to_string()));
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_help(f, layout.help_area, &[("Esc", " Back to menu")]);
}

fn draw_failed_screen(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_screen_chunks(f.area());

    let header = Paragraph::new(format!("Quiz - {}", session.document_name))
        .style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Something went wrong",
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    if let Some(error) = &session.error {
        text.push_line(Line::from(error.as_str()));
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from("Your answers are kept; retrying picks up where you left off."));
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    draw_help(f, layout.help_area, &[("r", " Retry  "), ("Esc", " Back to menu")]);
}

fn draw_in_progress(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());

    let answered = session.answers.len();
    let progress = format!(
        "Question {} / {} - {}  ({} answered)",
        session.current_index + 1,
        session.questions.len(),
        session.document_name,
        answered
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_text = session
        .current_question()
        .map(|q| q.text.clone())
        .unwrap_or_default();
    let question = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let chosen = session.current_answer().cloned();
    let items: Vec<ListItem> = session
        .current_question()
        .map(|q| q.options.clone())
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if chosen.as_deref() == Some(option.as_str()) {
                "(•) "
            } else {
                "( ) "
            };
            let style = if i == session.selected_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", marker, option)).style(style)
        })
        .collect();
    let options = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    if session.all_answered() {
        draw_help(
            f,
            layout.help_area,
            &[
                ("Enter", " Choose  "),
                ("←/→", " Question  "),
                ("s", " Submit  "),
                ("Esc", " Menu"),
            ],
        );
    } else {
        draw_help(
            f,
            layout.help_area,
            &[
                ("↑/↓", " Option  "),
                ("Enter", " Choose  "),
                ("←/→", " Question  "),
                ("Esc", " Menu"),
            ],
        );
    }
}

fn draw_help(f: &mut Frame, area: ratatui::layout::Rect, entries: &[(&str, &str)]) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (k, label) in entries {
        spans.push(Span::styled(k.to_string(), key_style));
        spans.push(Span::from(label.to_string()));
    }
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
