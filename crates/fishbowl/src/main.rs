use std::io::stdout;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use fishbowl_config::Config;
use fishbowl_core::{IntroPhase, fade};
use fishbowl_letters::{ScrambleWord, SlotSequence, Ticker, TypingLine};
use fishbowl_trail::TrailEngine;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::content::{
    FILES, FOOTER_AUTHOR, FOOTER_FACE, FOOTER_LEAD, HERO_TITLE, INTRO_PHRASE, TICKER_MESSAGES,
    TYPING_LINE, WORD_DEFAULT, WORD_HOVER,
};
use crate::shell::{IntroShell, Toast, Zone};
use crate::weather::{WeatherMonitor, deg_to_cardinal, weather_color, weather_icon};

mod content;
mod shell;
mod weather;

/// Frame poll timeout; roughly a 60 Hz refresh.
const FRAME_MS: u64 = 16;

/// Page palette.
const FG: Color = Color::Rgb(232, 230, 227);
const GREY: Color = Color::Rgb(128, 126, 122);
const ACCENT: Color = Color::Rgb(244, 163, 187);
const PEAK: Color = Color::Rgb(255, 255, 255);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load();
    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = App::new(config).run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The page: intro loader, content, and the animation engines.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Animation clock epoch.
    started: Instant,
    shell: IntroShell,
    slot: SlotSequence,
    typing: TypingLine,
    swim: ScrambleWord,
    swim_hovered: bool,
    ticker: Ticker,
    trail: TrailEngine,
    weather: WeatherMonitor,
    /// Interactive zones laid out by the previous frame.
    zones: Vec<(Rect, Zone)>,
    selected: Vec<bool>,
    toast: Toast,
    progress_hover: bool,
    tooltip_pos: (u16, u16),
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let messages: Vec<String> = if config.messages.is_empty() {
            TICKER_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            config.messages.clone()
        };
        let swim_width = ScrambleWord::padded_width(WORD_DEFAULT, WORD_HOVER);
        Self {
            running: false,
            started: Instant::now(),
            shell: IntroShell::new(),
            slot: SlotSequence::new(INTRO_PHRASE, 0),
            typing: TypingLine::new(TYPING_LINE),
            swim: ScrambleWord::new(WORD_DEFAULT, swim_width),
            swim_hovered: false,
            ticker: Ticker::new(messages, 0),
            trail: TrailEngine::new(),
            weather: WeatherMonitor::new(config.location.clone()),
            zones: Vec::new(),
            selected: vec![false; FILES.len()],
            toast: Toast::new(),
            progress_hover: false,
            tooltip_pos: (0, 0),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.weather.start();
        while self.running {
            let now_ms = self.now_ms();
            self.update(now_ms);
            terminal.draw(|frame| self.render(frame, now_ms))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Advance every animation to `now_ms`.
    fn update(&mut self, now_ms: u64) {
        if self.shell.phase() == IntroPhase::Slot && self.slot.advance(now_ms) {
            self.shell.slot_finished(now_ms);
        }
        for phase in self.shell.advance(now_ms) {
            if phase == IntroPhase::Typing {
                self.typing.start(now_ms);
            }
        }
        if self.shell.phase() == IntroPhase::Typing && self.typing.advance(now_ms) {
            self.shell.typing_finished(now_ms);
        }
        self.swim.advance(now_ms);
        self.ticker.advance(now_ms);
        self.trail.update();
        self.toast.expire(now_ms);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the frame loop keeps ticking.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(FRAME_MS))? {
            let now_ms = self.now_ms();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse, now_ms),
                // The terminal reprovisions its buffers itself; petal
                // state survives and is clipped to the new area.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) if self.shell.phase().loader_visible() => self.skip_intro(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, now_ms: u64) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.on_pointer(x, y, now_ms),
            MouseEventKind::Down(MouseButton::Left) => self.on_click(x, y, now_ms),
            _ => {}
        }
    }

    /// Pointer motion: feed the trail, then hit-test the interactive
    /// zones for marker expansion, scramble retargets and the lens.
    fn on_pointer(&mut self, x: u16, y: u16, now_ms: u64) {
        self.trail.pointer_moved(x as f32, y as f32);

        let hit = self.hit(x, y);
        self.trail.set_expanded(hit.is_some());

        let over_swim = matches!(hit, Some((_, Zone::SwimWord)));
        if over_swim != self.swim_hovered {
            self.swim_hovered = over_swim;
            let target = if over_swim { WORD_HOVER } else { WORD_DEFAULT };
            self.swim.retarget(target, now_ms);
        }

        if let Some((rect, Zone::Ticker)) = hit {
            let norm = x.saturating_sub(rect.x) as f32 / rect.width.max(1) as f32;
            self.ticker.set_pointer(norm);
        } else {
            self.ticker.clear_pointer();
        }

        self.progress_hover = matches!(hit, Some((_, Zone::ProgressTrack)));
        if self.progress_hover {
            self.tooltip_pos = (x, y);
        }
    }

    fn on_click(&mut self, x: u16, y: u16, now_ms: u64) {
        match self.hit(x, y) {
            Some((_, Zone::FileRow(i))) => {
                if let Some(selected) = self.selected.get_mut(i) {
                    *selected = !*selected;
                }
            }
            Some((_, Zone::DownloadButton)) => {
                let count = self.selected.iter().filter(|s| **s).count();
                let message = if count == 0 {
                    "select a file first".to_string()
                } else {
                    format!(
                        "downloading {count} file{}",
                        if count == 1 { "" } else { "s" }
                    )
                };
                self.toast.show(message, now_ms);
            }
            _ => {}
        }
    }

    /// First interactive zone containing the pointer, if any.
    fn hit(&self, x: u16, y: u16) -> Option<(Rect, Zone)> {
        let pos = Position::new(x, y);
        self.zones
            .iter()
            .copied()
            .find(|(rect, _)| rect.contains(pos))
    }

    fn skip_intro(&mut self) {
        self.slot.cancel();
        self.typing.cancel();
        self.shell.skip();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, now_ms: u64) {
        self.zones.clear();
        if self.shell.phase().loader_visible() {
            self.render_loader(frame, now_ms);
        } else {
            self.render_page(frame, now_ms);
        }
        // The trail draws last, over loader and page alike.
        let area = frame.area();
        self.trail.render(area, frame.buffer_mut());
    }

    /// Loader overlay: slot letters, then the typed line, fading between.
    fn render_loader(&self, frame: &mut Frame, now_ms: u64) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

        let line = match self.shell.phase() {
            IntroPhase::Slot => self.slot.line(FG),
            IntroPhase::FadeSlot => self.slot.line(fade(FG, 0.45)),
            IntroPhase::Typing => self.typing.line(now_ms, FG),
            IntroPhase::FadeOut => self.typing.line(now_ms, fade(FG, 0.4)),
            IntroPhase::Done => Line::default(),
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), chunks[1]);

        let hint = Line::from("s skip".dark_gray()).centered();
        frame.render_widget(hint, chunks[3]);
    }

    /// The page proper: header band, hero, progress, files, footer.
    fn render_page(&mut self, frame: &mut Frame, now_ms: u64) {
        let rows = Layout::vertical([
            Constraint::Length(1),                       // Top rule
            Constraint::Length(4),                       // Weather / ticker band
            Constraint::Fill(1),                         // Padding
            Constraint::Length(1),                       // Hero title
            Constraint::Length(1),                       // Spacing
            Constraint::Length(1),                       // Scramble word
            Constraint::Length(2),                       // Spacing
            Constraint::Length(1),                       // Progress track
            Constraint::Length(2),                       // Spacing
            Constraint::Length(FILES.len() as u16 + 1),  // File list + download
            Constraint::Fill(1),                         // Padding
            Constraint::Length(1),                       // Toast
            Constraint::Length(1),                       // Footer
        ])
        .split(frame.area());

        self.render_top_rule(frame, rows[0]);
        self.render_header(frame, rows[1], now_ms);
        self.render_hero(frame, rows[3]);
        self.render_swim(frame, rows[5]);
        self.render_progress(frame, rows[7]);
        self.render_files(frame, rows[9]);
        self.render_toast(frame, rows[11]);
        self.render_footer(frame, rows[12]);
        if self.progress_hover {
            self.render_tooltip(frame);
        }
    }

    fn render_top_rule(&self, frame: &mut Frame, area: Rect) {
        let rule = "─".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(rule).style(Style::new().fg(GREY).add_modifier(Modifier::DIM)),
            area,
        );
    }

    /// Weather top-left, ticker top-right.
    fn render_header(&mut self, frame: &mut Frame, area: Rect, now_ms: u64) {
        let ticker_width = (self.ticker.width() as u16).min(area.width / 2);
        let cols = Layout::horizontal([
            Constraint::Length(2),
            Constraint::Length(24),
            Constraint::Fill(1),
            Constraint::Length(ticker_width),
            Constraint::Length(2),
        ])
        .split(area);

        self.render_weather(frame, cols[1], now_ms);

        let ticker_rect = Rect {
            height: 1,
            ..cols[3]
        };
        self.zones.push((ticker_rect, Zone::Ticker));
        frame.render_widget(Paragraph::new(self.ticker.line(GREY, PEAK)), ticker_rect);
    }

    fn render_weather(&self, frame: &mut Frame, area: Rect, now_ms: u64) {
        let lines: Vec<Line> = match self.weather.get_current() {
            Some(data) => {
                let colon = if (now_ms / 1000) % 2 == 0 { ":" } else { " " };
                let clock = Local::now();
                let lat = self.config.location.latitude;
                let lon = self.config.location.longitude;
                vec![
                    Line::from(vec![
                        Span::styled(
                            weather_icon(data.weather_code).to_string(),
                            Style::new().fg(weather_color(data.weather_code)),
                        ),
                        Span::raw(" "),
                        Span::styled(
                            format!("{}°C", data.temp_c),
                            Style::new().fg(FG).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "WIND {} KM/H {}",
                            data.wind_kmph,
                            deg_to_cardinal(data.wind_dir_deg)
                        ),
                        Style::new().fg(GREY),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "{}{colon}{} HRS {}",
                            clock.format("%H"),
                            clock.format("%M"),
                            self.config.location.zone_label
                        ),
                        Style::new().fg(FG),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "{:.2}°{}  {:.2}°{}",
                            lat.abs(),
                            if lat >= 0.0 { "N" } else { "S" },
                            lon.abs(),
                            if lon >= 0.0 { "E" } else { "W" },
                        ),
                        Style::new().fg(GREY).add_modifier(Modifier::DIM),
                    )),
                ]
            }
            // Skeleton until the first successful fetch.
            None => [6usize, 10, 8, 9]
                .iter()
                .map(|width| {
                    Line::from(Span::styled(
                        "─".repeat(*width),
                        Style::new().fg(GREY).add_modifier(Modifier::DIM),
                    ))
                })
                .collect(),
        };
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect) {
        // Letterspaced, like the uppercase hero on the page.
        let spaced: String = HERO_TITLE
            .chars()
            .flat_map(|c| [c, ' '])
            .collect::<String>()
            .trim_end()
            .to_string();
        frame.render_widget(
            Paragraph::new(spaced)
                .style(Style::new().fg(FG).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            area,
        );
    }

    fn render_swim(&mut self, frame: &mut Frame, area: Rect) {
        let width = self.swim.glyphs().count() as u16;
        let rect = centered(area, width);
        self.zones.push((rect, Zone::SwimWord));
        frame.render_widget(Paragraph::new(self.swim.line(ACCENT, GREY)), rect);
    }

    fn render_progress(&mut self, frame: &mut Frame, area: Rect) {
        let (percent, _, _) = self.progress_stats();
        let track_width = 40u16.min(area.width.saturating_sub(12));
        let label = format!("  {:.0}% left", 100.0 - percent);
        let rect = centered(area, track_width + label.len() as u16);

        let track_rect = Rect {
            width: track_width,
            ..rect
        };
        self.zones.push((track_rect, Zone::ProgressTrack));

        let filled = (track_width as f64 * percent / 100.0).round() as usize;
        let line = Line::from(vec![
            Span::styled("━".repeat(filled), Style::new().fg(ACCENT)),
            Span::styled(
                "─".repeat(track_width as usize - filled),
                Style::new().fg(GREY).add_modifier(Modifier::DIM),
            ),
            Span::styled(label, Style::new().fg(GREY)),
        ]);
        frame.render_widget(Paragraph::new(line), rect);
    }

    /// Percent complete plus day counts for the configured window.
    fn progress_stats(&self) -> (f64, i64, i64) {
        let today = Local::now().date_naive();
        let start = NaiveDate::parse_from_str(&self.config.progress.start, "%Y-%m-%d")
            .unwrap_or(today);
        let end = NaiveDate::parse_from_str(&self.config.progress.end, "%Y-%m-%d").unwrap_or(today);
        let total = (end - start).num_days().max(1);
        let done = (today - start).num_days().clamp(0, total);
        let percent = done as f64 / total as f64 * 100.0;
        let left = (end - today).num_days().max(0);
        (percent, done, left)
    }

    fn render_files(&mut self, frame: &mut Frame, area: Rect) {
        let rect = centered(area, 54u16.min(area.width));
        for (i, file) in FILES.iter().enumerate() {
            let row = Rect {
                x: rect.x,
                y: rect.y + i as u16,
                width: rect.width,
                height: 1,
            };
            self.zones.push((row, Zone::FileRow(i)));
            let mark = if self.selected[i] { '◼' } else { '◻' };
            let line = Line::from(vec![
                Span::styled(format!("{mark} "), Style::new().fg(ACCENT)),
                Span::styled(format!("{:<20}", file.name), Style::new().fg(FG)),
                Span::styled(format!("{:<24}", file.description), Style::new().fg(GREY)),
                Span::styled(file.size, Style::new().fg(GREY).add_modifier(Modifier::DIM)),
            ]);
            frame.render_widget(Paragraph::new(line), row);
        }

        let label = "[ download ]";
        let button = Rect {
            x: rect.x,
            y: rect.y + FILES.len() as u16,
            width: label.len() as u16,
            height: 1,
        };
        self.zones.push((button, Zone::DownloadButton));
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            button,
        );
    }

    fn render_toast(&self, frame: &mut Frame, area: Rect) {
        if let Some(message) = self.toast.message() {
            frame.render_widget(
                Paragraph::new(message.to_string())
                    .style(Style::new().fg(ACCENT))
                    .alignment(Alignment::Center),
                area,
            );
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = Line::from(vec![
            Span::styled(FOOTER_LEAD, Style::new().fg(GREY).add_modifier(Modifier::DIM)),
            Span::styled(FOOTER_AUTHOR, Style::new().fg(FG)),
            Span::styled(FOOTER_FACE, Style::new().fg(GREY)),
        ])
        .centered();
        frame.render_widget(footer, area);
    }

    /// Tooltip following the pointer over the progress track.
    fn render_tooltip(&self, frame: &mut Frame) {
        let area = frame.area();
        let (_, done, left) = self.progress_stats();
        let (w, h) = (22u16, 3u16);
        if area.width < w || area.height < h {
            return;
        }
        let x = (self.tooltip_pos.0 + 2).min(area.width - w);
        let y = (self.tooltip_pos.1 + 1).min(area.height - h);
        let rect = Rect::new(x, y, w, h);
        let lines = vec![
            Line::from(format!("days completed  {done:>4}")),
            Line::from(format!("days left       {left:>4}")),
            Line::from("performance   9.1/10".to_string()),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::new().fg(FG).bg(Color::Rgb(32, 32, 36))),
            rect,
        );
    }
}

/// Horizontally center a `width`-wide, full-height rect inside `area`.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 3, 100, 1);
        let rect = centered(area, 20);
        assert_eq!(rect, Rect::new(40, 3, 20, 1));
        // Wider than the area clamps instead of overflowing.
        let clamped = centered(area, 200);
        assert_eq!(clamped, Rect::new(0, 3, 100, 1));
    }

    #[test]
    fn test_app_intro_runs_to_done() {
        let mut app = App::new(Config::default());
        // Drive the full intro on the synthetic clock: slot (~2.3 s) +
        // fades + typing (~2.5 s) with generous margin.
        for now in (0..=20_000u64).step_by(16) {
            app.update(now);
        }
        assert_eq!(app.shell.phase(), IntroPhase::Done);
        assert!(app.slot.is_complete());
        assert!(app.typing.is_done());
    }

    #[test]
    fn test_skip_intro_is_immediate_and_idempotent() {
        let mut app = App::new(Config::default());
        app.update(0);
        app.skip_intro();
        app.skip_intro();
        assert_eq!(app.shell.phase(), IntroPhase::Done);
        // Cancelled intro timers never resurface.
        app.update(60_000);
        assert_eq!(app.shell.phase(), IntroPhase::Done);
        assert!(!app.slot.is_complete());
    }

    #[test]
    fn test_pointer_over_zone_expands_marker_and_retargets() {
        let mut app = App::new(Config::default());
        app.zones
            .push((Rect::new(10, 5, 7, 1), Zone::SwimWord));
        app.on_pointer(12, 5, 1_000);
        assert!(app.trail.expanded());
        assert!(app.swim_hovered);

        app.on_pointer(40, 20, 1_100);
        assert!(!app.trail.expanded());
        assert!(!app.swim_hovered);

        // Let the scramble settle back; it must show the default word.
        for now in (1_100..=4_000u64).step_by(16) {
            app.swim.advance(now);
        }
        let shown: String = app.swim.glyphs().map(|(c, _)| c).collect();
        assert_eq!(shown.trim_end(), WORD_DEFAULT);
    }

    #[test]
    fn test_click_selects_and_toasts() {
        let mut app = App::new(Config::default());
        app.zones.push((Rect::new(0, 0, 54, 1), Zone::FileRow(0)));
        app.zones
            .push((Rect::new(0, 3, 12, 1), Zone::DownloadButton));

        app.on_click(5, 0, 100);
        assert!(app.selected[0]);
        app.on_click(5, 3, 200);
        assert_eq!(app.toast.message(), Some("downloading 1 file"));
        app.on_click(5, 0, 300);
        assert!(!app.selected[0]);
    }
}
