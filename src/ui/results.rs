use crate::quiz::QuizSession;
use crate::ui::layout::calculate_screen_chunks;
use crate::utils::{format_percentage, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_results(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_screen_chunks(f.area());

    let title = Paragraph::new(format!("Quiz Results - {}", session.document_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut text = Text::default();
    if let Some(result) = &session.result {
        let verdict_style = if result.percentage >= 60.0 {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD)
        };
        text.push_line(Line::from(Span::styled(
            format!(
                "Score: {} / {}  ({})",
                result.score,
                result.total,
                format_percentage(result.percentage)
            ),
            verdict_style,
        )));
        text.push_line(Line::from(""));

        for (i, entry) in result.results.iter().enumerate() {
            let marker = if entry.is_correct { "[✓]" } else { "[✗]" };
            text.push_line(Line::from(format!(
                "{} {}. {}",
                marker,
                i + 1,
                truncate_string(&entry.question, 60)
            )));
            text.push_line(Line::from(format!("    Your Answer: {}", entry.user_answer)));
            if !entry.is_correct {
                text.push_line(Line::from(Span::styled(
                    format!("    Correct Answer: {}", entry.correct_answer),
                    Style::default().fg(Color::Green),
                )));
            }
            if !entry.explanation.is_empty() {
                let rendered = tui_markdown::from_str(&entry.explanation);
                for line in rendered.lines {
                    let spans: Vec<Span> = line
                        .spans
                        .iter()
                        .map(|s| Span::styled(s.content.to_string(), s.style))
                        .collect();
                    let mut padded = vec![Span::from("    ")];
                    padded.extend(spans);
                    text.push_line(Line::from(padded));
                }
            }
            text.push_line(Line::from(""));
        }
    }

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.body_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("r", key_style),
        Span::from(" Retake (new questions)  "),
        Span::styled("Esc", key_style),
        Span::from(" Back to menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
