pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    difficulty::DifficultyLevel,
    scorer::{AnalysisResult, FeedbackTier},
    report,
    waveform::{self, AMPLITUDE_BOUND},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn tier_color(tier: FeedbackTier) -> Color {
    match tier {
        FeedbackTier::Excellent => Color::Green,
        FeedbackTier::Good => Color::Yellow,
        FeedbackTier::KeepPracticing => Color::Red,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Height of a bordered block holding `rows` lines
fn bordered_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, bold().fg(Color::Cyan)))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, italic()))
}

pub(crate) fn render_practice(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),                                  // title
            Constraint::Length(bordered_height(app.phrases.len())), // phrase picker
            Constraint::Length(3),                                  // difficulty
            Constraint::Length(4),                                  // practice box
            Constraint::Length(1),                                  // status
            Constraint::Min(0),
            Constraint::Length(1),                                  // legend
        ])
        .split(area);

    title("PronunciAId - interactive demo").render(chunks[0], buf);

    let phrase_lines: Vec<Line> = app
        .phrases
        .iter()
        .enumerate()
        .map(|(idx, phrase)| {
            if idx == app.selected {
                Line::from(Span::styled(
                    format!("> {}", phrase.label),
                    bold().fg(Color::Magenta),
                ))
            } else {
                Line::from(format!("  {}", phrase.label))
            }
        })
        .collect();
    Paragraph::new(phrase_lines)
        .block(Block::default().borders(Borders::ALL).title("Phrase"))
        .render(chunks[1], buf);

    let mut levels = Vec::new();
    for level in DifficultyLevel::ALL {
        let label = format!(" {level} ");
        levels.push(if level == app.difficulty() {
            Span::styled(label, bold().fg(Color::Black).bg(Color::Cyan))
        } else {
            Span::styled(label, Style::default().add_modifier(Modifier::DIM))
        });
        levels.push(Span::raw("  "));
    }
    Paragraph::new(Line::from(levels))
        .block(Block::default().borders(Borders::ALL).title("Difficulty"))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let target = format!("\"{}\"", app.current_phrase().text);
    let inner_width = chunks[3].width.saturating_sub(2) as usize;
    Paragraph::new(Span::styled(target.clone(), bold().fg(Color::Blue)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Phrase to practice"),
        )
        .alignment(if target.width() <= inner_width {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    if let Some(status) = &app.status {
        Paragraph::new(Span::styled(status.as_str(), italic().fg(Color::Green)))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    legend("(↑↓) phrase / (←→) difficulty / (l)isten / (enter) record / (a)bout / (esc)ape")
        .render(chunks[6], buf);
}

pub(crate) fn render_processing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled("Processing your audio...", bold().fg(Color::Yellow)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let wave = waveform::default_waveform();
    let span = charting::waveform_span(&wave);
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Blue))
        .graph_type(GraphType::Line)
        .data(&wave)];
    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your recording (simulated)"),
        )
        .x_axis(Axis::default().bounds([0.0, span]))
        .y_axis(Axis::default().bounds([-AMPLITUDE_BOUND, AMPLITUDE_BOUND]))
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("{:.1}", app.processing_remaining.as_secs_f64()),
        bold().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

fn word_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let pad = result
        .outcomes
        .iter()
        .map(|o| o.target.width())
        .max()
        .unwrap_or(0);

    result
        .outcomes
        .iter()
        .map(|o| {
            let fill = " ".repeat(pad - o.target.width());
            if o.correct {
                Line::from(Span::styled(
                    format!("✓ {}{fill}  Correct", o.target),
                    Style::default().fg(Color::Green),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("✗ {}", o.target),
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                    Span::styled(
                        format!("{fill}  -> {}  Needs practice", o.recognized),
                        Style::default().fg(Color::Red),
                    ),
                ])
            }
        })
        .collect()
}

pub(crate) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.session.result.as_ref() else {
        render_practice(app, area, buf);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(4),                                  // score card
            Constraint::Length(1),                                  // metrics
            Constraint::Length(1),                                  // recognized
            Constraint::Length(1),                                  // feedback
            Constraint::Length(bordered_height(result.outcomes.len())), // per word
            Constraint::Min(4),                                     // progress
            Constraint::Length(1),                                  // legend
        ])
        .split(area);

    let card = vec![
        Line::from(Span::styled(format!("Score: {}%", result.score), bold())),
        Line::from(format!("Correct words: {}", result.correct_words())),
    ];
    Paragraph::new(card)
        .block(Block::default().borders(Borders::ALL).title("Analysis"))
        .style(Style::default().fg(Color::White).bg(Color::Indexed(61)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(format!(
        "Difficulty: {}   Analysis time: {:.1} s",
        result.difficulty,
        app.processing_delay.as_secs_f64()
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::styled("Recognized: ", bold()),
        Span::raw(result.recognized_text.as_str()),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        result.feedback.message(),
        bold().fg(tier_color(result.feedback)),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(word_lines(result))
        .block(Block::default().borders(Borders::ALL).title("Word by word"))
        .render(chunks[4], buf);

    if let Some(series) = app.progress_series() {
        let coords = series.coords();
        let (overall, ceiling) = charting::compute_chart_params(&coords);
        let datasets = vec![Dataset::default()
            .marker(ratatui::symbols::Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&coords)];
        let day_labels: Vec<Span> = series
            .points
            .iter()
            .map(|p| Span::styled(p.label.clone(), bold()))
            .collect();

        let chart_title = match report::progress_summary(&series) {
            Some(summary) => format!("Your progress (simulated): {summary}"),
            None => "Your progress (simulated)".to_string(),
        };

        Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(chart_title))
            .x_axis(Axis::default().bounds([1.0, overall]).labels(day_labels))
            .y_axis(
                Axis::default()
                    .title("score")
                    .bounds([0.0, ceiling])
                    .labels(vec![
                        Span::styled("0", bold()),
                        Span::styled(charting::format_label(ceiling), bold()),
                    ]),
            )
            .render(chunks[5], buf);
    }

    legend("(r)ecord again / (n)ew phrase / (a)bout / (esc)ape").render(chunks[6], buf);
}

pub(crate) fn render_about(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from("This is a simulated demonstration of PronunciAId, an AI English tutor."),
        Line::from("No audio is captured: the transcript is fabricated from common mistakes."),
        Line::from(""),
        Line::from(Span::styled("Planned for the full version:", bold())),
        Line::from("  - real voice analysis with a speech recognition model"),
        Line::from("  - real audio recording from your microphone"),
        Line::from("  - precise feedback on sounds and phonemes"),
        Line::from("  - personalized progress tracking"),
        Line::from("  - adaptive lessons for your level"),
        Line::from(""),
        Line::from(Span::styled("press any key to go back", italic())),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("About this demo"))
        .wrap(Wrap { trim: false })
        .render(
            area.inner(ratatui::layout::Margin {
                horizontal: HORIZONTAL_MARGIN,
                vertical: VERTICAL_MARGIN,
            }),
            buf,
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{tests::settings, AppState},
        catalog::Phrase,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_practice_screen_shows_phrase_and_levels() {
        let app = App::new(settings(0));
        let content = rendered(&app, 100, 30);

        assert!(content.contains("Hello how are you today"));
        assert!(content.contains("Basic greeting"));
        assert!(content.contains("Medium"));
        assert!(content.contains("(l)isten"));
    }

    #[test]
    fn test_practice_screen_shows_status() {
        let mut app = App::new(settings(0));
        app.listen();
        assert!(rendered(&app, 100, 30).contains("Playing model pronunciation"));
    }

    #[test]
    fn test_processing_screen() {
        let mut app = App::new(settings(1500));
        app.record();
        assert_eq!(app.state, AppState::Processing);

        let content = rendered(&app, 100, 30);
        assert!(content.contains("Processing your audio"));
        assert!(content.contains("1.5"));
    }

    #[test]
    fn test_results_screen() {
        let mut app = App::new(settings(0));
        app.record();
        let result = app.session.result.clone().unwrap();

        let content = rendered(&app, 100, 40);
        assert!(content.contains(&format!("Score: {}%", result.score)));
        assert!(content.contains(&format!("Correct words: {}", result.correct_words())));
        assert!(content.contains("Word by word"));
        assert!(content.contains("Mon"));
        assert!(content.contains("average 75.6, best 88"));
    }

    #[test]
    fn test_results_screen_with_huge_prompt() {
        let text = vec!["zz"; 65_534].join(" ");
        let mut s = settings(0);
        s.phrases = vec![Phrase::custom(&text).unwrap()];
        let mut app = App::new(s);
        app.record();
        assert_eq!(app.session.result.as_ref().unwrap().total, 65_534);

        rendered(&app, 100, 40);
    }

    #[test]
    fn test_bordered_height_saturates() {
        assert_eq!(bordered_height(4), 6);
        assert_eq!(bordered_height(65_534), u16::MAX);
        assert_eq!(bordered_height(usize::MAX), u16::MAX);
    }

    #[test]
    fn test_results_screen_marks_mistakes() {
        let mut app = App::new(settings(0));
        // hard difficulty on a fully known phrase eventually produces a mistake
        app.set_difficulty(DifficultyLevel::Hard);
        for _ in 0..50 {
            app.record();
            if app.session.result.as_ref().unwrap().score < 100 {
                break;
            }
        }

        let content = rendered(&app, 100, 40);
        assert!(content.contains("Needs practice"));
    }

    #[test]
    fn test_about_screen() {
        let mut app = App::new(settings(0));
        app.state = AppState::About;
        assert!(rendered(&app, 100, 30).contains("Planned for the full version"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let mut app = App::new(settings(0));
        for state in [AppState::Practice, AppState::About] {
            app.state = state;
            rendered(&app, 20, 5);
        }
        app.record();
        rendered(&app, 20, 5);
    }

    #[test]
    fn test_draw_through_terminal() {
        let app = App::new(settings(0));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("PronunciAId"));
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(tier_color(FeedbackTier::Excellent), Color::Green);
        assert_eq!(tier_color(FeedbackTier::Good), Color::Yellow);
        assert_eq!(tier_color(FeedbackTier::KeepPracticing), Color::Red);
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 1);
    }
}
