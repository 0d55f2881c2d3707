use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
    Frame,
};

use leave_call::{
    hitbox::{self, button_rect, theme_toggle_rect},
    theme::Theme,
    timers::Severity,
    view::{ButtonView, GameView},
};

use crate::App;

struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    pill: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::White,
                muted: Color::Rgb(156, 163, 175),
                pill: Color::Rgb(31, 41, 55),
            },
            Theme::Light => Self {
                bg: Color::Rgb(239, 246, 255),
                fg: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(75, 85, 99),
                pill: Color::White,
            },
        }
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Single row at `y`, or nothing if it falls off the area
fn row(area: Rect, y: u16) -> Option<Rect> {
    (y >= area.y && y < area.y + area.height).then(|| Rect::new(area.x, y, area.width, 1))
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Normal => Style::default().fg(Color::Green),
    }
}

fn render_button(button: &ButtonView, area: Rect, buf: &mut Buffer) {
    let (r, g, b) = button.color.rgb();
    let mut style = Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White);
    if button.is_target() {
        style = style.add_modifier(Modifier::BOLD);
    }
    Paragraph::new(button.label.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .render(button_rect(button, area), buf);
}

fn render_header(view: &GameView, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let top = area.y + area.height / 2 - 1;
    let lines = vec![
        Line::from("📞"),
        Line::from(Span::styled(
            "Call in Progress",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Duration: {}", view.elapsed),
            Style::default().fg(palette.muted),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, top, area.width, 3), buf);
}

fn render_overlay(palette: &Palette, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    Block::default()
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .render(area, buf);

    let top = area.y + area.height / 2 - 1;
    let lines = vec![
        Line::from("🎉"),
        Line::from(Span::styled(
            "You did it!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Leaving call...",
            Style::default().fg(palette.muted),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, top, area.width, 3), buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.theme);
        let view = self.game.view();

        Block::default()
            .style(Style::default().bg(palette.bg).fg(palette.fg))
            .render(area, buf);

        if !hitbox::fits(area) {
            Paragraph::new("window too small to leave this call")
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        render_header(&view, &palette, area, buf);

        let bottom = area.y + area.height;
        if let Some(r) = row(area, bottom - 2) {
            Paragraph::new(Span::styled(
                "⚠ This call is very important. Are you sure you want to leave?",
                Style::default().fg(palette.muted),
            ))
            .alignment(Alignment::Center)
            .render(r, buf);
        }
        if let Some(r) = row(area, bottom - 1) {
            Paragraph::new(Span::styled(
                "(click) buttons / (t)heme / (esc)ape",
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(r, buf);
        }

        if view.is_terminal {
            render_overlay(&palette, area, buf);
        } else {
            for decoy in &view.decoys {
                render_button(decoy, area, buf);
            }

            if let Some(r) = hitbox::progress_rect(&view, area) {
                Paragraph::new(view.progress_label())
                    .style(
                        Style::default()
                            .bg(palette.pill)
                            .add_modifier(Modifier::BOLD),
                    )
                    .render(r, buf);
            }
            let timer = view.countdown.zip(hitbox::countdown_rect(&view, area));
            if let Some((countdown, r)) = timer {
                Paragraph::new(countdown.label())
                    .style(severity_style(countdown.severity).bg(palette.bg))
                    .render(r, buf);
            }

            render_button(&view.target, area, buf);
        }

        let icon = if self.theme.is_dark() { "☾" } else { "☀" };
        Paragraph::new(icon)
            .style(Style::default().bg(palette.pill).fg(palette.fg))
            .alignment(Alignment::Center)
            .render(theme_toggle_rect(area), buf);
    }
}
