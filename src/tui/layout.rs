//! Screen layout.
//!
//! ```text
//! ┌─ Preview ───────────────────────────────────────┐
//! │ ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀ │
//! └─────────────────────────────────────────────────┘
//! ┌─ Stops 3/10 ──────────┐┌─ Gradient ─────────────┐
//! │ > 1 ██ #ff8c00   [x]  ││ Type  (•) Linear ( ) … │
//! │   2 ██ #ff0080   [x]  ││ Angle 90°  ━━━━●────── │
//! └───────────────────────┘└────────────────────────┘
//! ┌─ CSS ───────────────────────── [Copy to Clipboard]┐
//! │ background: linear-gradient(90deg, …);           │
//! └─────────────────────────────────────────────────┘
//!  status / shortcuts
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::gradient::{GradientKind, MAX_ANGLE, MAX_STOPS};

use super::app::{CopyLabel, GradientApp};
use super::preview::GradientPreview;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &GradientApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                          // preview
            Constraint::Length(MAX_STOPS as u16 + 2),    // stops + settings
            Constraint::Length(4),                       // css text
            Constraint::Length(1),                       // status bar
        ])
        .split(f.area());

    draw_preview(f, app, outer[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[1]);
    draw_stops(f, app, middle[0]);
    draw_settings(f, app, middle[1]);

    draw_css(f, app, outer[2]);
    draw_status(f, app, outer[3]);
}

fn draw_preview(f: &mut Frame, app: &GradientApp, area: Rect) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(GradientPreview::new(&app.state), inner);
}

fn draw_stops(f: &mut Frame, app: &GradientApp, area: Rect) {
    let stops = app.state.stops();
    let items: Vec<ListItem> = app
        .stops
        .controls()
        .iter()
        .map(|control| {
            let color = stops[control.index];
            let selected = control.index == app.stops.selected();
            let marker = if selected { "> " } else { "  " };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:>2} ", control.index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    "\u{2588}\u{2588}",
                    Style::default().fg(Color::Rgb(color.r(), color.g(), color.b())),
                ),
                Span::raw(" "),
            ];

            match &control.draft {
                Some(draft) => {
                    spans.push(Span::styled(
                        format!("{:<7}", draft.text),
                        Style::default().fg(Color::Black).bg(Color::Yellow),
                    ));
                    spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
                }
                None => {
                    let style = if selected {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(color.to_string(), style));
                }
            }

            if control.removable {
                spans.push(Span::styled("  [x]", Style::default().fg(Color::Red)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Stops {}/{} ", app.state.len(), MAX_STOPS);
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

fn radio(label: &str, on: bool) -> Span<'static> {
    let text = if on {
        format!("(\u{2022}) {label}")
    } else {
        format!("( ) {label}")
    };
    let style = if on {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(text, style)
}

/// Slider track for the angle, `width` cells wide.
fn angle_track(angle: u16, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = (angle as usize * (width - 1)) / MAX_ANGLE as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '\u{2501}',
            std::cmp::Ordering::Equal => '\u{25CF}',
            std::cmp::Ordering::Greater => '\u{2500}',
        })
        .collect()
}

fn draw_settings(f: &mut Frame, app: &GradientApp, area: Rect) {
    let kind = app.state.kind();
    let mut lines = vec![Line::from(vec![
        Span::styled("Type   ", Style::default().fg(Color::DarkGray)),
        radio("Linear", kind == GradientKind::Linear),
        Span::raw("  "),
        radio("Radial", kind == GradientKind::Radial),
    ])];

    // Angle control only exists for linear gradients
    if app.angle_visible() {
        let track_width = (area.width as usize).saturating_sub(18).min(36);
        lines.push(Line::from(vec![
            Span::styled("Angle  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<5}", app.angle_label()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                angle_track(app.state.angle(), track_width),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    let block = Block::default()
        .title(" Gradient ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_css(f: &mut Frame, app: &GradientApp, area: Rect) {
    let label_style = match app.copy_label {
        CopyLabel::Idle => Style::default().fg(Color::Cyan),
        CopyLabel::Copied => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        CopyLabel::Failed => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let block = Block::default()
        .title(" CSS ")
        .title(
            Line::from(Span::styled(format!(" [{}] ", app.copy_label.text()), label_style))
                .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let para = Paragraph::new(app.css_text())
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &GradientApp, area: Rect) {
    let mut spans = Vec::new();

    if let Some(status) = &app.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        spans.push(Span::styled(format!(" [{}]", status.text), Style::default().fg(color)));
        spans.push(Span::raw("  "));
    }

    let shortcuts = if app.stops.editing().is_some() {
        " 0-9a-f:Hex  Bksp:Delete  Enter:Done  Esc:Cancel"
    } else {
        " \u{2191}\u{2193}:Stop  Enter:Edit  a:Add  d:Remove  t:Type  \u{2190}\u{2192}:Rotate  r:Random  c:Copy  s:Save  q:Quit"
    };
    spans.push(Span::styled(shortcuts, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GradientConfig;
    use crate::tui::event::AppMessage;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> GradientApp {
        GradientApp::from_config(&GradientConfig::default(), Some(5))
    }

    fn screen(app: &GradientApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_css_and_angle() {
        let text = screen(&app());
        assert!(text.contains("background: linear-gradient(90deg, #ff8c00, #ff0080);"));
        assert!(text.contains("90\u{00B0}"));
        assert!(text.contains("[Copy to Clipboard]"));
        assert!(text.contains("Stops 2/10"));
    }

    #[test]
    fn radial_hides_angle() {
        let mut app = app();
        app.toggle_kind();
        let text = screen(&app);
        assert!(text.contains("radial-gradient(circle, #ff8c00, #ff0080)"));
        assert!(!text.contains("Angle"));
    }

    #[test]
    fn remove_marker_only_above_floor() {
        let mut app = app();
        assert!(!screen(&app).contains("[x]"));
        app.add_stop();
        assert_eq!(screen(&app).matches("[x]").count(), 3);
    }

    #[test]
    fn copied_label_rendered() {
        let mut app = app();
        app.update(AppMessage::CopyFinished(Ok(())));
        assert!(screen(&app).contains("[Copied!]"));
    }

    #[test]
    fn angle_track_positions_knob() {
        assert_eq!(angle_track(0, 5), "\u{25CF}\u{2500}\u{2500}\u{2500}\u{2500}");
        assert_eq!(angle_track(360, 5), "\u{2501}\u{2501}\u{2501}\u{2501}\u{25CF}");
        assert_eq!(angle_track(90, 0), "");
    }
}
