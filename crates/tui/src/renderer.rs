use std::io::stdout;
use std::ops::RangeInclusive;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tidemap_core::config::ThemeMode;
use tidemap_core::state::Screen;
use tidemap_protocol::{Point, RenderCommand, TextAlign, ThemeToken};

use crate::app::{App, MapCanvas, PX_PER_COL};

const SAMPLES_PER_SEGMENT: usize = 48;
/// Strokes fainter than this (the path glow) are not drawn in cells.
const MIN_VISIBLE_OPACITY: f64 = 0.25;

fn theme_to_color(token: ThemeToken, mode: ThemeMode) -> Color {
    match token {
        ThemeToken::Background | ThemeToken::OverlayScrim => match mode {
            ThemeMode::Dark => Color::Black,
            ThemeMode::Light => Color::White,
        },
        ThemeToken::PathGlow => Color::Magenta,
        ThemeToken::PathDash => Color::LightMagenta,
        ThemeToken::NodeLockedFill => Color::DarkGray,
        ThemeToken::NodeLockedBorder | ThemeToken::LockGlyph => Color::Gray,
        ThemeToken::NodeCurrentFill | ThemeToken::CurrentRipple => Color::Rgb(249, 115, 22),
        ThemeToken::NodeCurrentBorder | ThemeToken::NodeGlyph => Color::White,
        ThemeToken::NodeCompletedFill => Color::Rgb(147, 51, 234),
        ThemeToken::NodeCompletedBorder => Color::Rgb(216, 180, 254),
        ThemeToken::Star => Color::Yellow,
        ThemeToken::LabelBackground | ThemeToken::OverlaySurface => Color::Rgb(17, 24, 39),
        ThemeToken::LabelBorder => Color::DarkGray,
        ThemeToken::LabelCurrent => Color::Rgb(254, 215, 170),
        ThemeToken::LabelText | ThemeToken::TextPrimary => match mode {
            ThemeMode::Dark => Color::White,
            ThemeMode::Light => Color::Black,
        },
        ThemeToken::TextMuted => Color::Gray,
    }
}

/// Projects map coordinates into the cells of `area`, scrolled by `scroll_x`.
struct Projection {
    area: Rect,
    scroll_x: f64,
    px_per_row: f64,
}

impl Projection {
    fn new(area: Rect, scroll_x: f64, track_height: f64) -> Self {
        let rows = f64::from(area.height.max(1));
        Self {
            area,
            scroll_x,
            px_per_row: (track_height / rows).max(f64::EPSILON),
        }
    }

    /// Cell coordinates relative to the area, possibly outside it.
    fn cell(&self, p: Point) -> (i64, i64) {
        (
            ((p.x - self.scroll_x) / PX_PER_COL).floor() as i64,
            (p.y / self.px_per_row).floor() as i64,
        )
    }

    /// Columns of `lo..=hi` that fall inside the area.
    fn visible_cols(&self, lo: i64, hi: i64) -> RangeInclusive<i64> {
        lo.max(0)..=hi.min(i64::from(self.area.width) - 1)
    }

    /// Rows of `lo..=hi` that fall inside the area.
    fn visible_rows(&self, lo: i64, hi: i64) -> RangeInclusive<i64> {
        lo.max(0)..=hi.min(i64::from(self.area.height) - 1)
    }

    fn contains(&self, col: i64, row: i64) -> bool {
        col >= 0
            && row >= 0
            && col < i64::from(self.area.width)
            && row < i64::from(self.area.height)
    }

    fn absolute(&self, col: i64, row: i64) -> (u16, u16) {
        (self.area.x + col as u16, self.area.y + row as u16)
    }

    /// Map-space centre of a cell.
    fn cell_center(&self, col: i64, row: i64) -> Point {
        Point::new(
            (col as f64 + 0.5) * PX_PER_COL + self.scroll_x,
            (row as f64 + 0.5) * self.px_per_row,
        )
    }
}

fn put_str(buf: &mut Buffer, proj: &Projection, col: i64, row: i64, text: &str, style: Style) {
    if row < 0 || row >= i64::from(proj.area.height) {
        return;
    }
    let skip = usize::try_from(-col).unwrap_or(0);
    let col = col.max(0);
    if col >= i64::from(proj.area.width) {
        return;
    }
    let visible: String = text.chars().skip(skip).collect();
    let (x, y) = proj.absolute(col, row);
    let max_width = usize::from(proj.area.right().saturating_sub(x));
    let _ = buf.set_stringn(x, y, visible, max_width, style);
}

/// Draw the map's render commands into `buf` within `area`.
pub fn draw_map(buf: &mut Buffer, area: Rect, canvas: &MapCanvas, scroll_x: f64, mode: ThemeMode) {
    let proj = Projection::new(area, scroll_x, canvas.track_height);

    for cmd in &canvas.commands {
        match cmd {
            RenderCommand::DrawPath {
                start,
                segments,
                stroke,
            } if stroke.opacity >= MIN_VISIBLE_OPACITY => {
                let fg = theme_to_color(stroke.color, mode);
                let mut from = *start;
                for seg in segments {
                    for step in 0..=SAMPLES_PER_SEGMENT {
                        let t = step as f64 / SAMPLES_PER_SEGMENT as f64;
                        let (col, row) = proj.cell(seg.point_at(from, t));
                        if proj.contains(col, row) {
                            buf[proj.absolute(col, row)].set_char('·').set_fg(fg);
                        }
                    }
                    from = seg.end;
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill: Some(fill),
                ..
            } => {
                let bg = theme_to_color(*fill, mode);
                let (min_col, min_row) =
                    proj.cell(Point::new(center.x - radius, center.y - radius));
                let (max_col, max_row) =
                    proj.cell(Point::new(center.x + radius, center.y + radius));
                for row in proj.visible_rows(min_row, max_row) {
                    for col in proj.visible_cols(min_col, max_col) {
                        let c = proj.cell_center(col, row);
                        if (c.x - center.x).hypot(c.y - center.y) <= *radius {
                            buf[proj.absolute(col, row)].set_char(' ').set_bg(bg);
                        }
                    }
                }
            }
            RenderCommand::DrawRect { rect, color, .. } => {
                let bg = theme_to_color(*color, mode);
                let (min_col, row) = proj.cell(Point::new(rect.x, rect.y + rect.h / 2.0));
                let (max_col, _) = proj.cell(Point::new(rect.x + rect.w, rect.y));
                for row in proj.visible_rows(row, row) {
                    for col in proj.visible_cols(min_col, max_col) {
                        buf[proj.absolute(col, row)].set_char(' ').set_bg(bg);
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let (col, row) = proj.cell(*position);
                let width = text.chars().count() as i64;
                let col = match align {
                    TextAlign::Left => col,
                    TextAlign::Center => col - width / 2,
                    TextAlign::Right => col - width,
                };
                let style = Style::default().fg(theme_to_color(*color, mode));
                put_str(buf, &proj, col, row, text, style);
            }
            // Glow passes, ripple outlines, and groups have no cell form.
            _ => {}
        }
    }
}

fn draw_landing(buf: &mut Buffer, area: Rect, mode: ThemeMode) {
    let title = Style::default()
        .fg(theme_to_color(ThemeToken::NodeCurrentFill, mode))
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme_to_color(ThemeToken::TextPrimary, mode));
    let muted = Style::default().fg(theme_to_color(ThemeToken::TextMuted, mode));

    let mut lines = vec![Line::default(); usize::from(area.height.saturating_sub(9) / 2)];
    lines.extend([
        Line::styled("T I D E M A P", title),
        Line::default(),
        Line::styled("[Enter] Start", text),
        Line::styled("[s] Settings    [q] Quit", text),
        Line::default(),
        Line::default(),
        Line::styled("v1.0.6-live • MASTER BAIT STUDIOS", muted),
        Line::styled("FISHING FOR COMPLIMENTS", muted),
    ]);
    ratatui::widgets::Widget::render(Paragraph::new(lines).alignment(Alignment::Center), area, buf);
}

fn draw_settings(buf: &mut Buffer, area: Rect, mode: ThemeMode) {
    let w = area.width.min(40);
    let h = area.height.min(10);
    let panel = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    );
    let surface = Style::default()
        .bg(theme_to_color(ThemeToken::OverlaySurface, mode))
        .fg(theme_to_color(ThemeToken::TextPrimary, mode));
    let lines = vec![
        Line::from("Master Volume"),
        Line::from("Music"),
        Line::from("SFX"),
        Line::from("Graphics Quality"),
        Line::default(),
        Line::styled(
            "[Esc] Close",
            Style::default().fg(theme_to_color(ThemeToken::TextMuted, mode)),
        ),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" SETTINGS ")
        .style(surface);
    ratatui::widgets::Widget::render(Clear, panel, buf);
    ratatui::widgets::Widget::render(Paragraph::new(lines).block(block), panel, buf);
}

fn header_text(screen: Screen, scroll_suspended: bool) -> &'static str {
    match (screen, scroll_suspended) {
        (Screen::Landing, _) => " tidemap | Enter start | s settings | q quit ",
        (Screen::Map, false) => " tidemap — Map View | ←→ scroll | b back | s settings | q quit ",
        (Screen::Map, true) => " tidemap — Map View | Esc close settings | q quit ",
    }
}

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit() {
        app.set_viewport_cols(terminal.size()?.width);
        terminal.draw(|frame| {
            let area = frame.area();
            let mode = app.theme;
            let machine = app.machine();

            let header_area = Rect::new(area.x, area.y, area.width, 1.min(area.height));
            let header = Block::default()
                .title(header_text(
                    machine.screen(),
                    machine.scroll_lock().is_suspended(),
                ))
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(theme_to_color(ThemeToken::NodeCompletedFill, mode)),
                );
            frame.render_widget(header, header_area);

            let content = Rect::new(
                area.x,
                area.y + 1,
                area.width,
                area.height.saturating_sub(1),
            );
            let bg = Block::default()
                .style(Style::default().bg(theme_to_color(ThemeToken::Background, mode)));
            frame.render_widget(bg, content);

            let buf = frame.buffer_mut();
            match machine.screen() {
                Screen::Landing => draw_landing(buf, content, mode),
                Screen::Map => draw_map(
                    buf,
                    content,
                    machine.renderer(),
                    machine.scroll_lock().offset(),
                    mode,
                ),
            }
            if machine.overlay_open() {
                draw_settings(buf, content, mode);
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }
    }
    Ok(())
}
