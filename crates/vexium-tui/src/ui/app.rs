use super::{footer::render_footer, header::render_header, needs::render_needs};
use crate::export::export_page;
use crate::layout::AppLayout;
use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    widgets::{Block, Borders},
    Terminal,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use vexium_core::{
    settings::save_theme,
    theme::{Element, Theme},
    NeedBar, Settings,
};

/// How far one key press moves a need's value.
pub const ADJUST_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    SelectPrevious,
    SelectNext,
    Adjust(f64),
    ToggleTheme,
    Export,
}

pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Left | KeyCode::Char('-') => Some(Action::Adjust(-ADJUST_STEP)),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(Action::Adjust(ADJUST_STEP))
        }
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::ToggleTheme),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Action::Export),
        _ => None,
    }
}

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    config_path: PathBuf,
    bars: Vec<NeedBar>,
    selected: usize,
    message: Option<String>,
    layout: AppLayout,
}

impl App {
    pub fn new(settings: Settings, config_path: PathBuf) -> Result<Self> {
        let layout = AppLayout::new().map_err(|e| anyhow!("layout setup failed: {e:?}"))?;
        Ok(Self {
            should_quit: false,
            theme: Theme::new(settings.theme),
            bars: settings.bars(),
            settings,
            config_path,
            selected: 0,
            message: None,
            layout,
        })
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.draw(terminal)?;
            if let Some(action) = self.next_action()? {
                self.update(action).await;
            }
        }
        Ok(())
    }

    fn next_action(&self) -> Result<Option<Action>> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(action_for(key.code)),
            _ => Ok(None),
        }
    }

    pub async fn update(&mut self, action: Action) {
        debug!(?action, "applying action");
        self.message = None;

        match action {
            Action::Quit => self.should_quit = true,
            Action::SelectPrevious => {
                if !self.bars.is_empty() {
                    self.selected = (self.selected + self.bars.len() - 1) % self.bars.len();
                }
            }
            Action::SelectNext => {
                if !self.bars.is_empty() {
                    self.selected = (self.selected + 1) % self.bars.len();
                }
            }
            Action::Adjust(delta) => {
                if let Some(bar) = self.bars.get_mut(self.selected) {
                    bar.value += delta;
                }
            }
            Action::ToggleTheme => {
                self.theme.toggle();
                self.settings.theme = self.theme.variant();
                if let Err(e) = save_theme(&self.config_path, self.settings.theme) {
                    warn!(error = %e, "failed to persist theme");
                    self.message = Some(format!("Could not save settings: {}", e));
                }
            }
            Action::Export => {
                let path = self.settings.output.clone();
                self.message = Some(
                    match export_page(&self.settings.shell, &self.bars, &path).await {
                        Ok(()) => format!("Exported to {}", path.display()),
                        Err(e) => {
                            warn!(error = %e, "export failed");
                            format!("Export failed: {:#}", e)
                        }
                    },
                );
            }
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let area = terminal.size()?;
        let rects = self
            .layout
            .compute(area)
            .map_err(|e| anyhow!("layout failed: {e:?}"))?;

        terminal.draw(|frame| {
            let background = Block::new()
                .borders(Borders::NONE)
                .style(self.theme.ratatui_style(Element::Text));
            frame.render_widget(background, area);

            render_header(
                frame,
                rects.header,
                &self.theme,
                &self.settings.shell.metadata.title,
                &self.bars,
            );
            render_needs(frame, rects.body, &self.theme, &self.bars, self.selected);
            render_footer(frame, rects.footer, &self.theme, self.message.as_deref());
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use vexium_core::theme::ThemeVariant;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vexium-{}-{}", name, std::process::id()))
    }

    fn app(name: &str) -> App {
        let dir = scratch_dir(name);
        let mut settings = Settings::default();
        settings.output = dir.join("page.html");
        App::new(settings, dir.join("config.toml")).unwrap()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Up), Some(Action::SelectPrevious));
        assert_eq!(action_for(KeyCode::Char('j')), Some(Action::SelectNext));
        assert_eq!(action_for(KeyCode::Left), Some(Action::Adjust(-ADJUST_STEP)));
        assert_eq!(action_for(KeyCode::Char('+')), Some(Action::Adjust(ADJUST_STEP)));
        assert_eq!(action_for(KeyCode::Char('t')), Some(Action::ToggleTheme));
        assert_eq!(action_for(KeyCode::Char('e')), Some(Action::Export));
        assert_eq!(action_for(KeyCode::Char('x')), None);
    }

    #[tokio::test]
    async fn test_selection_wraps() {
        let mut app = app("select");
        assert_eq!(app.selected, 0);

        app.update(Action::SelectPrevious).await;
        assert_eq!(app.selected, 2);

        app.update(Action::SelectNext).await;
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_adjust_crosses_critical_threshold() {
        let mut app = app("adjust");
        app.update(Action::SelectNext).await;
        app.update(Action::SelectNext).await;

        // Sleep starts at 20 of 100.
        assert!(app.bars[2].is_critical());
        app.update(Action::Adjust(ADJUST_STEP)).await;
        assert_eq!(app.bars[2].value, 25.0);
        assert!(!app.bars[2].is_critical());
    }

    #[tokio::test]
    async fn test_adjust_is_not_clamped() {
        let mut app = app("clamp");
        for _ in 0..5 {
            app.update(Action::Adjust(ADJUST_STEP)).await;
        }
        assert_eq!(app.bars[0].value, 105.0);
    }

    #[tokio::test]
    async fn test_toggle_theme_persists() {
        let dir = scratch_dir("theme");
        let mut app = app("theme");

        app.update(Action::ToggleTheme).await;
        assert_eq!(app.theme.variant(), ThemeVariant::EverforestLight);
        assert_eq!(app.message.as_deref(), None);

        let saved = Settings::load_from(dir.join("config.toml")).unwrap();
        assert_eq!(saved.theme, ThemeVariant::EverforestLight);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_toggle_theme_keeps_rejected_config() {
        let dir = scratch_dir("rejected");
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("config.toml");
        let original = "[[needs]]\nlabel = \"Rations\"\nvalue = 10.0\nmax_value = 0.0\ncategory = \"food\"\n";
        std::fs::write(&config, original).unwrap();
        assert!(Settings::load_from(&config).is_err());

        // Startup falls back to defaults when the file is rejected.
        let mut app = App::new(Settings::default(), config.clone()).unwrap();
        app.update(Action::ToggleTheme).await;
        assert_eq!(app.message.as_deref(), None);

        let written = std::fs::read_to_string(&config).unwrap();
        assert!(written.contains("Rations"));
        assert!(written.contains("max_value = 0.0"));
        assert!(written.contains("theme = \"EverforestLight\""));
        assert!(!written.contains("Water"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_toggle_theme_reports_unwritable_config() {
        let dir = scratch_dir("unparseable");
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("config.toml");
        std::fs::write(&config, "theme = [broken").unwrap();

        let mut app = App::new(Settings::default(), config.clone()).unwrap();
        app.update(Action::ToggleTheme).await;

        assert_eq!(app.theme.variant(), ThemeVariant::EverforestLight);
        let message = app.message.as_deref().unwrap();
        assert!(message.starts_with("Could not save settings"), "{}", message);
        assert_eq!(std::fs::read_to_string(&config).unwrap(), "theme = [broken");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_export_uses_current_values() {
        let dir = scratch_dir("export");
        let mut app = app("export");
        app.update(Action::Adjust(-ADJUST_STEP)).await;
        app.update(Action::Export).await;

        let message = app.message.as_deref().unwrap();
        assert!(message.starts_with("Exported to"), "{}", message);

        let html = std::fs::read_to_string(dir.join("page.html")).unwrap();
        assert!(html.contains("<span class=\"need-bar__value\">75/100</span>"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = app("quit");
        assert!(!app.should_quit);
        app.update(Action::Quit).await;
        assert!(app.should_quit);
    }

    #[test]
    fn test_draw_shows_every_need() {
        let mut app = app("draw");
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        app.draw(&mut terminal).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Vexium Verse"));
        assert!(screen.contains("1 critical: Sleep"));
        assert!(screen.contains("80/100"));
        assert!(screen.contains("60/100"));
        assert!(screen.contains("20/100"));
    }
}
