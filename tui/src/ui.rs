//! Per-frame rendering.
//!
//! Pure functions from [`App`] state to ratatui widgets. Every asynchronous
//! concern renders its four states the same way: nothing or a hint when
//! Idle, a spinner while Loading, content on Success, and the concern's
//! notice in the error color on Failure.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use quotes_core::{Quote, RequestState, CATEGORIES};

use crate::app::{App, GeneratorFocus, Overlay, View};
use crate::theme;

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header);

    match app.view {
        View::Home => draw_home(frame, app, body),
        View::Category => draw_category(frame, app, body),
        View::Generator => draw_generator(frame, app, body),
    }

    draw_footer(frame, app, footer);

    match &app.overlay {
        Overlay::Explain { quote } => draw_explain_overlay(frame, app, quote),
        Overlay::Visualize { quote } => draw_visualize_overlay(frame, app, quote),
        Overlay::None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " ALPHA QUOTES ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "· Powered by Generative AI",
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.view, &app.overlay) {
        (_, Overlay::Explain { .. } | Overlay::Visualize { .. }) => " Esc close",
        (View::Home, _) => {
            " j/k quotes · h/l shelves · Enter browse · g generate · e explain · v visualize · y copy · r refresh · q quit"
        }
        (View::Category, _) => " j/k quotes · e explain · v visualize · y copy · g generate · Esc home",
        (View::Generator, _) => match app.generator_focus {
            GeneratorFocus::Input => " type a topic · Enter generate · Tab result card · Esc home",
            GeneratorFocus::Result => " e explain · v visualize · y copy · Tab input · Esc home",
        },
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(theme::TEXT_DIM))];
    if app.copied_flash() {
        spans.push(Span::styled(
            "  Copied!",
            Style::default()
                .fg(theme::SUCCESS)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// =============================================================================
// Home
// =============================================================================

fn draw_home(frame: &mut Frame, app: &App, area: Rect) {
    let [hero, feed, shelves] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    draw_hero(frame, app, hero);
    draw_feed(frame, app, feed);
    draw_shelves(frame, app, shelves);
}

fn draw_hero(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.feed_selected == 0 && app.home.value().is_some_and(|feed| !feed.is_empty());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(selected))
        .title(Span::styled(
            " Quote of the Day ",
            Style::default().fg(theme::ACCENT),
        ));

    let content = match app.home.state() {
        RequestState::Idle | RequestState::Loading => loading_text(app, ""),
        RequestState::Failure(notice) => failure_text(notice),
        RequestState::Success(feed) => match feed.first() {
            Some(quote) => quote_text(quote),
            None => Text::styled(
                "Nothing on this shelf right now. Press r for a fresh one.",
                Style::default().fg(theme::TEXT_MUTED),
            ),
        },
    };

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_feed(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            " Explore More Quotes ",
            Style::default().fg(theme::TEXT_PRIMARY),
        ));

    match app.home.state() {
        RequestState::Success(feed) if feed.len() > 1 => {
            let items: Vec<ListItem> = feed
                .iter()
                .skip(1)
                .map(|quote| ListItem::new(quote_line(quote)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("❯ ");

            // Selection 0 is the hero card; the list starts at entry 1.
            let mut state = ListState::default();
            state.select(app.feed_selected.checked_sub(1));
            frame.render_stateful_widget(list, area, &mut state);
        }
        RequestState::Success(_) => {
            frame.render_widget(block, area);
        }
        // The hero card already shows the loader or the notice.
        _ => frame.render_widget(block, area),
    }
}

fn draw_shelves(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            " Browse by Category ",
            Style::default().fg(theme::TEXT_PRIMARY),
        ));

    let mut spans = Vec::with_capacity(CATEGORIES.len() * 2);
    for (i, category) in CATEGORIES.iter().enumerate() {
        let style = if i == app.shelf_selected {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_MUTED)
        };
        spans.push(Span::styled(
            format!(" {} {} ", category.icon, category.name),
            style,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

// =============================================================================
// Category
// =============================================================================

fn draw_category(frame: &mut Frame, app: &App, area: Rect) {
    let (name, icon) = app
        .active_category
        .map_or(("?", " "), |category| (category.name, category.icon));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(theme::ACCENT_DIM)),
            Span::styled("Quotes on ", Style::default().fg(theme::TEXT_PRIMARY)),
            Span::styled(
                format!("{name} "),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

    match app.category.state() {
        RequestState::Idle | RequestState::Loading => {
            frame.render_widget(
                Paragraph::new(loading_text(app, ""))
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
        }
        RequestState::Failure(notice) => {
            frame.render_widget(
                Paragraph::new(failure_text(notice))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block),
                area,
            );
        }
        RequestState::Success(listing) if listing.is_empty() => {
            frame.render_widget(
                Paragraph::new(Text::styled(
                    "No quotes came back for this category.",
                    Style::default().fg(theme::TEXT_MUTED),
                ))
                .alignment(Alignment::Center)
                .block(block),
                area,
            );
        }
        RequestState::Success(listing) => {
            let items: Vec<ListItem> = listing
                .iter()
                .map(|quote| ListItem::new(quote_line(quote)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("❯ ");

            let mut state = ListState::default();
            state.select(Some(app.listing_selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

// =============================================================================
// Generator
// =============================================================================

fn draw_generator(frame: &mut Frame, app: &App, area: Rect) {
    let [intro, input, result] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let intro_text = Text::from(vec![
        Line::styled(
            "AI Quote Generator",
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Enter a topic, mood, or name to generate a unique quote.",
            Style::default().fg(theme::TEXT_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(intro_text).alignment(Alignment::Center), intro);

    let input_focused = app.generator_focus == GeneratorFocus::Input;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(input_focused))
        .title(Span::styled(" Topic ", Style::default().fg(theme::ACCENT)));

    let input_line = if app.topic_input.is_empty() && !input_focused {
        Line::styled(
            "e.g., 'The Future', 'Inner Peace', 'Elon Musk'",
            Style::default().fg(theme::TEXT_DIM),
        )
    } else {
        let cursor = if input_focused { "_" } else { "" };
        Line::styled(
            format!("{}{cursor}", app.topic_input),
            Style::default().fg(theme::TEXT_PRIMARY),
        )
    };
    frame.render_widget(Paragraph::new(input_line).block(input_block), input);

    let result_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.generator_focus == GeneratorFocus::Result))
        .title(Span::styled(
            " Your Quote ",
            Style::default().fg(theme::TEXT_PRIMARY),
        ));

    let content = match app.generator.state() {
        RequestState::Idle => Text::styled(
            "The generated quote will appear here.",
            Style::default().fg(theme::TEXT_DIM),
        ),
        RequestState::Loading => loading_text(app, quotes_core::notices::loading::GENERATOR),
        RequestState::Failure(notice) => failure_text(notice),
        RequestState::Success(quote) => quote_text(quote),
    };

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(result_block),
        result,
    );
}

// =============================================================================
// Overlays
// =============================================================================

fn draw_explain_overlay(frame: &mut Frame, app: &App, quote: &Quote) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    // Same truncated title as the original product's modal.
    let glimpse: String = quote.text().chars().take(20).collect();
    let block = overlay_block(format!(" The Meaning Behind \"{glimpse}...\" "));

    let content = match app.explain.state() {
        RequestState::Idle | RequestState::Loading => loading_text(app, ""),
        RequestState::Failure(notice) => failure_text(notice),
        RequestState::Success(explanation) => Text::styled(
            explanation.clone(),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
    };

    frame.render_widget(
        Paragraph::new(content).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_visualize_overlay(frame: &mut Frame, app: &App, quote: &Quote) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = overlay_block(" Visualize Quote ".to_string());

    let content = match app.visualize.state() {
        RequestState::Idle | RequestState::Loading => {
            loading_text(app, quotes_core::notices::loading::VISUALIZE)
        }
        RequestState::Failure(notice) => failure_text(notice),
        RequestState::Success(path) => {
            let mut text = quote_text(quote);
            text.push_line(Line::default());
            text.push_line(Line::styled(
                format!("Saved to {}", path.display()),
                Style::default().fg(theme::SUCCESS),
            ));
            text
        }
    };

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn overlay_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(title, Style::default().fg(theme::ACCENT)))
        .title_bottom(Span::styled(
            " Esc close ",
            Style::default().fg(theme::TEXT_DIM),
        ))
}

// =============================================================================
// Shared fragments
// =============================================================================

/// A quote as a multi-line card body.
fn quote_text(quote: &Quote) -> Text<'static> {
    Text::from(vec![
        Line::default(),
        Line::styled(
            format!("“{}”", quote.text()),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        Line::default(),
        Line::styled(
            format!("- {}", quote.author()),
            Style::default().fg(theme::ACCENT_DIM),
        ),
    ])
}

/// A quote as a single feed line.
fn quote_line(quote: &Quote) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("“{}” ", quote.text()),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        Span::styled(
            format!("- {}", quote.author()),
            Style::default().fg(theme::TEXT_MUTED),
        ),
    ])
}

fn loading_text(app: &App, flavor: &str) -> Text<'static> {
    let glyph = theme::spinner_glyph(app.spinner_frame);
    let line = if flavor.is_empty() {
        glyph.to_string()
    } else {
        format!("{glyph} {flavor}")
    };
    Text::from(vec![
        Line::default(),
        Line::styled(line, Style::default().fg(theme::TEXT_MUTED)),
    ])
}

fn failure_text(notice: &str) -> Text<'static> {
    Text::from(vec![
        Line::default(),
        Line::styled(notice.to_string(), Style::default().fg(theme::ERROR)),
    ])
}

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::BORDER)
    }
}

/// A rect centered in `area`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(70, 60, area);
        assert!(rect.x >= area.x && rect.y >= area.y);
        assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        assert_eq!(rect.width, 70);
        assert_eq!(rect.height, 24);
    }

    #[test]
    fn quote_line_uses_the_share_format_pieces() {
        let quote = Quote::validated("Know thyself.", "Socrates").unwrap();
        let line = quote_line(&quote);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "“Know thyself.” - Socrates");
    }
}
