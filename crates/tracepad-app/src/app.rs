//! Headless application shell: configuration, script replay and the
//! summary printed afterwards.

use crate::script::{ElementRef, HostCommand, parse_script};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracepad_core::{
    Canvas, CanvasConfig, CanvasStatus, ClickTracker, ElementId, Key, KeyEvent, Mode, Modifiers,
    PointerEvent,
};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Script error: {0}")]
    Script(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    /// Mode before the script selects one.
    pub initial_mode: Mode,
    /// Turn two quick `click` commands into a double-click.
    pub synthesize_double_clicks: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            initial_mode: Mode::Draw,
            synthesize_double_clicks: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// One element in the summary.
#[derive(Debug, Clone, Serialize)]
pub struct ElementSummary {
    pub id: ElementId,
    pub kind: &'static str,
    pub position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Observable state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub mode: Mode,
    pub status: CanvasStatus,
    pub elements: Vec<ElementSummary>,
    pub painted_pixels: usize,
}

/// The host application.
pub struct App {
    config: AppConfig,
    canvas: Canvas,
    mode: Mode,
    clicks: ClickTracker,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            canvas: Canvas::new(&config.canvas),
            mode: config.initial_mode,
            clicks: ClickTracker::new(),
            config,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Read a script file and replay it.
    pub fn run_file(&mut self, path: &Path) -> Result<Summary, AppError> {
        let json = std::fs::read_to_string(path)?;
        let commands = parse_script(&json)?;
        log::info!("Replaying {} commands from {}", commands.len(), path.display());
        self.run(&commands)
    }

    /// Replay commands in order and summarize the result.
    pub fn run(&mut self, commands: &[HostCommand]) -> Result<Summary, AppError> {
        for (index, command) in commands.iter().enumerate() {
            self.apply(command)
                .map_err(|err| AppError::Script(format!("command {index}: {err}")))?;
        }
        Ok(self.summary())
    }

    /// Apply one command.
    pub fn apply(&mut self, command: &HostCommand) -> Result<(), AppError> {
        log::debug!("{command:?}");
        match command {
            HostCommand::Mode { mode } => {
                log::info!("Mode: {}", mode.name());
                self.mode = *mode;
            }
            HostCommand::Pointer(event) => self.canvas.handle_pointer(self.mode, event.clone()),
            HostCommand::Click { x, y } => self.click(Point::new(*x, *y)),
            HostCommand::Drag { points } => self.drag(points),
            HostCommand::Key {
                key,
                ctrl,
                meta,
                in_text_input,
            } => {
                let parsed = Key::from_name(key)
                    .ok_or_else(|| AppError::Script(format!("unknown key {key:?}")))?;
                let mut event = KeyEvent::new(parsed).with_modifiers(Modifiers {
                    ctrl: *ctrl,
                    meta: *meta,
                    ..Modifiers::default()
                });
                if *in_text_input {
                    event = event.in_text_input();
                }
                self.canvas.handle_key(self.mode, event);
            }
            HostCommand::Text { content } => self.canvas.text_input(content.clone()),
            HostCommand::FocusLost => self.canvas.focus_lost(),
            HostCommand::AddText => {
                if let Some(id) = self.canvas.add_text() {
                    log::info!("Added text label {id}");
                }
            }
            HostCommand::Pan { dx, dy } => self.canvas.pan_by(Vec2::new(*dx, *dy)),
            HostCommand::ResetView => self.canvas.reset_view(),
            HostCommand::Resize { width, height } => self.canvas.resize_viewport(*width, *height),
            HostCommand::TransformEnd { element, transform } => {
                let id = self.resolve(element)?;
                self.canvas.on_transform_end(self.mode, &id, *transform);
            }
            HostCommand::DragEnd { element, x, y } => {
                let id = self.resolve(element)?;
                self.canvas.on_drag_end(self.mode, &id, Point::new(*x, *y));
            }
            HostCommand::DeleteSelected => {
                self.canvas.delete_selected();
            }
            HostCommand::ClearAll => self.canvas.clear_all(),
            HostCommand::Style { style } => self.canvas.set_style(style.clone()),
        }
        Ok(())
    }

    /// Observable state for printing.
    pub fn summary(&self) -> Summary {
        let elements = self
            .canvas
            .store()
            .all()
            .map(|element| ElementSummary {
                id: element.id().clone(),
                kind: element.kind().name(),
                position: element.position(),
                content: element.as_text().map(|t| t.content.clone()),
            })
            .collect();
        Summary {
            mode: self.mode,
            status: self.canvas.status(),
            elements,
            painted_pixels: self.canvas.raster().painted_pixel_count(),
        }
    }

    fn click(&mut self, position: Point) {
        self.canvas
            .handle_pointer(self.mode, PointerEvent::down(position));
        self.canvas.handle_pointer(self.mode, PointerEvent::Up);
        if self.config.synthesize_double_clicks && self.clicks.register_down(position) {
            self.canvas
                .handle_pointer(self.mode, PointerEvent::double_click(position));
        }
    }

    fn drag(&mut self, points: &[[f64; 2]]) {
        let mut points = points.iter().map(|&[x, y]| Point::new(x, y));
        let Some(start) = points.next() else {
            return;
        };
        self.clicks.reset();
        self.canvas.handle_pointer(self.mode, PointerEvent::down(start));
        for position in points {
            self.canvas
                .handle_pointer(self.mode, PointerEvent::Move { position });
        }
        self.canvas.handle_pointer(self.mode, PointerEvent::Up);
    }

    fn resolve(&self, element: &ElementRef) -> Result<ElementId, AppError> {
        match element {
            ElementRef::Id(id) => Ok(id.clone()),
            ElementRef::Index(index) => self
                .canvas
                .store()
                .all()
                .nth(*index)
                .map(|e| e.id().clone())
                .ok_or_else(|| AppError::Script(format!("no element at index {index}"))),
        }
    }
}
