//! The canvas: mode-aware routing of host input onto the raster layer,
//! the element store, the selection and the text editor.

use crate::config::CanvasConfig;
use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{CanvasError, CanvasResult};
use crate::input::{Key, KeyEvent, PointerEvent};
use crate::raster::{Brush, RasterSurface};
use crate::selection::{NodeTransform, SelectionController};
use crate::store::ElementStore;
use crate::style::{SerializableColor, StyleConfig};
use crate::text_edit::{EditExit, EditSession, TextEditor};
use crate::tools::{Mode, RasterTool};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use serde::Serialize;

/// Offset from the visible center to the top-left of a new text label.
const NEW_TEXT_OFFSET: Vec2 = Vec2::new(100.0, 15.0);

/// One element as a renderer should draw it.
#[derive(Debug, Clone, Copy)]
pub struct SceneNode<'a> {
    pub element: &'a Element,
    /// Element anchor in screen space.
    pub screen_position: Point,
    pub selected: bool,
    pub editing: bool,
    /// Uncommitted text shown in place of the label's content while editing.
    pub draft: Option<&'a str>,
}

/// Snapshot of observable canvas state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasStatus {
    pub element_count: usize,
    pub shape_count: usize,
    pub text_count: usize,
    pub selected: Option<ElementId>,
    pub editing: Option<ElementId>,
    pub is_drawing: bool,
    pub raster_tool: RasterTool,
    pub viewport_offset: Vec2,
    pub viewport_size: Size,
    pub document_size: Size,
}

/// Runtime canvas state.
///
/// The interaction mode is owned by the host and passed with every event.
#[derive(Debug, Clone)]
pub struct Canvas {
    viewport: Viewport,
    raster: RasterSurface,
    store: ElementStore,
    selection: SelectionController,
    editor: TextEditor,
    /// Style settings, read whenever an operation starts.
    style: StyleConfig,
    hit_tolerance: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            viewport: Viewport::new(config.viewport_size),
            raster: RasterSurface::new(
                config.document_width,
                config.document_height,
                config.background,
            ),
            store: ElementStore::new(),
            selection: SelectionController::new(),
            editor: TextEditor::new(),
            style: config.style.clone(),
            hit_tolerance: config.hit_tolerance,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the style settings.
    ///
    /// Changed shape fields (fill, stroke, stroke width) are written into a
    /// selected shape. Changed text fields (font size, font family, color)
    /// are written into a selected text label unless an edit is open.
    pub fn set_style(&mut self, style: StyleConfig) {
        let previous = std::mem::replace(&mut self.style, style);
        let Some(id) = self.selection.selected().cloned() else {
            return;
        };
        let Some(element) = self.store.get(&id) else {
            return;
        };
        let style = &self.style;
        let changed =
            |old: SerializableColor, new: SerializableColor| (old != new).then_some(new);
        let patch = match element {
            Element::Shape(_) => ElementPatch {
                fill: changed(previous.shape_fill, style.shape_fill),
                stroke: changed(previous.shape_stroke, style.shape_stroke),
                stroke_width: (previous.stroke_width != style.stroke_width)
                    .then_some(style.stroke_width),
                ..ElementPatch::default()
            },
            Element::Text(_) if self.editor.is_open() => return,
            Element::Text(_) => ElementPatch {
                fill: changed(previous.text_color, style.text_color),
                font_size: (previous.font_size != style.font_size).then_some(style.font_size),
                font_family: (previous.font_family != style.font_family)
                    .then(|| style.font_family.clone()),
                ..ElementPatch::default()
            },
        };
        if patch != ElementPatch::default() {
            log::debug!("Restyling {id}");
            absorb(self.store.update(&id, &patch));
        }
    }

    /// Currently selected element.
    pub fn selected(&self) -> Option<&ElementId> {
        self.selection.selected()
    }

    /// The open edit session, if any.
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    /// Route a pointer event (screen coordinates).
    pub fn handle_pointer(&mut self, mode: Mode, event: PointerEvent) {
        match event {
            // A stroke never outlives the press, whatever mode the host is in now.
            PointerEvent::Up | PointerEvent::Leave => self.raster.end_stroke(),
            PointerEvent::Down { position, target } => {
                let point = self.viewport.screen_to_document(position);
                match mode {
                    Mode::Draw => self.begin_stroke(point),
                    Mode::Write => self.write_down(point, target),
                    Mode::Shapes => self.shapes_down(point, target),
                }
            }
            PointerEvent::Move { position } => {
                if mode == Mode::Draw && self.raster.is_drawing() {
                    let point = self.viewport.screen_to_document(position);
                    self.raster.extend_stroke(point);
                }
            }
            PointerEvent::DoubleClick { position, target } => {
                let point = self.viewport.screen_to_document(position);
                match mode {
                    Mode::Draw => {}
                    Mode::Write => self.write_double_click(point, target),
                    Mode::Shapes => self.shapes_double_click(point, target),
                }
            }
        }
    }

    /// Route a key press.
    pub fn handle_key(&mut self, mode: Mode, event: KeyEvent) {
        match event.key {
            Key::Escape => {
                self.selection.clear();
                absorb(self.editor.finish(EditExit::Escape, &mut self.store));
            }
            Key::Delete | Key::Backspace => {
                if event.focus_in_text_input || self.editor.is_open() {
                    return;
                }
                self.delete_selected();
            }
            Key::Enter if event.is_save_gesture() => {
                absorb(self.editor.finish(EditExit::SaveGesture, &mut self.store));
            }
            Key::Digit(digit) => {
                if mode != Mode::Draw || event.focus_in_text_input {
                    return;
                }
                if let Some(tool) = RasterTool::from_digit(digit) {
                    log::debug!("Raster tool: {tool:?}");
                    self.style.raster_tool = tool;
                }
            }
            _ => {}
        }
    }

    /// Host callback: a transform gesture on `id` finished with `node`.
    pub fn on_transform_end(&mut self, mode: Mode, id: &ElementId, node: NodeTransform) {
        if !self.accepts_manipulation(mode, id) {
            return;
        }
        let result = self.selection.start_transform(id, &self.store).and_then(|()| {
            self.selection
                .update_transform(node.scale_x, node.scale_y, node.rotation, node.position);
            self.selection.commit_transform(&mut self.store)
        });
        absorb(result);
    }

    /// Host callback: a drag of `id` finished at `position` (document space).
    pub fn on_drag_end(&mut self, mode: Mode, id: &ElementId, position: Point) {
        if !self.accepts_manipulation(mode, id) {
            return;
        }
        absorb(self.store.move_to(id, position));
    }

    /// Create an empty text label in the middle of the visible area and
    /// start editing it.
    pub fn add_text(&mut self) -> Option<ElementId> {
        let position = self.viewport.document_center() - NEW_TEXT_OFFSET;
        absorb(
            self.editor
                .start_new(&mut self.store, &mut self.selection, position, &self.style),
        )
    }

    /// Replace the draft of the open edit session.
    pub fn text_input(&mut self, content: impl Into<String>) {
        if !self.editor.update_draft(content) {
            log::debug!("Text input without an open edit session");
        }
    }

    /// The host's text input lost focus.
    pub fn focus_lost(&mut self) {
        absorb(self.editor.finish(EditExit::FocusLost, &mut self.store));
    }

    /// Delete the selected element. Returns true if something was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.selected().cloned() else {
            return false;
        };
        self.delete(&id)
    }

    /// Delete an element and drop every reference to it.
    pub fn delete(&mut self, id: &ElementId) -> bool {
        self.selection.forget(id);
        self.editor.forget(id);
        self.store.delete(id).is_some()
    }

    /// Wipe the raster layer and every element.
    pub fn clear_all(&mut self) {
        log::info!("Clearing canvas ({} elements)", self.store.len());
        self.raster.clear();
        self.store.clear();
        self.selection.clear();
        self.editor.discard_and_close();
    }

    /// Pan the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    /// Return the view to the document origin.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// The host surface changed size. The document is unaffected.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
    }

    /// Elements in draw order, mapped for a renderer.
    pub fn scene(&self) -> Vec<SceneNode<'_>> {
        let session = self.editor.session();
        self.store
            .all()
            .map(|element| {
                let editing = session.is_some_and(|s| s.id() == element.id());
                SceneNode {
                    element,
                    screen_position: self.viewport.document_to_screen(element.position()),
                    selected: self.selection.is_selected(element.id()),
                    editing,
                    draft: session.filter(|_| editing).map(EditSession::draft),
                }
            })
            .collect()
    }

    pub fn status(&self) -> CanvasStatus {
        CanvasStatus {
            element_count: self.store.len(),
            shape_count: self.store.shape_count(),
            text_count: self.store.text_count(),
            selected: self.selection.selected().cloned(),
            editing: self.editor.editing_id().cloned(),
            is_drawing: self.raster.is_drawing(),
            raster_tool: self.style.raster_tool,
            viewport_offset: self.viewport.offset,
            viewport_size: self.viewport.size,
            document_size: self.raster.extent().size(),
        }
    }

    fn begin_stroke(&mut self, point: Point) {
        self.raster.begin_stroke(point, Brush::from_style(&self.style));
    }

    fn write_down(&mut self, point: Point, target: Option<ElementId>) {
        let target = self.resolve_target(point, target, Element::is_text);
        match target {
            Some(id) => {
                if self.editor.is_editing(&id) {
                    return;
                }
                absorb(self.editor.finish(EditExit::CanvasClick, &mut self.store));
                absorb(self.selection.select(Some(&id), Mode::Write, &self.store));
            }
            None => {
                absorb(self.editor.finish(EditExit::CanvasClick, &mut self.store));
            }
        }
    }

    fn shapes_down(&mut self, point: Point, target: Option<ElementId>) {
        let target = self.resolve_target(point, target, Element::is_shape);
        absorb(self.selection.select(target.as_ref(), Mode::Shapes, &self.store));
    }

    fn write_double_click(&mut self, point: Point, target: Option<ElementId>) {
        if let Some(id) = self.resolve_target(point, target, Element::is_text) {
            absorb(
                self.editor
                    .start_editing_existing(&id, &mut self.store, &mut self.selection),
            );
        }
    }

    fn shapes_double_click(&mut self, point: Point, target: Option<ElementId>) {
        if self.resolve_target(point, target, Element::is_shape).is_some() {
            return;
        }
        let shape = self
            .style
            .shape_preset
            .create(ElementId::generate("shape"), point, &self.style);
        if let Some(id) = absorb(self.store.insert(shape)) {
            log::debug!("Created {} {id}", self.style.shape_preset.display_name());
            self.selection.set_selected(Some(id));
        }
    }

    /// The element an event refers to, restricted to the family the mode
    /// works with. A host-supplied id wins over hit testing.
    fn resolve_target(
        &self,
        point: Point,
        target: Option<ElementId>,
        family: fn(&Element) -> bool,
    ) -> Option<ElementId> {
        match target {
            Some(id) => match self.store.get(&id) {
                Some(element) if family(element) => Some(id),
                Some(_) => None,
                None => {
                    log::debug!("Ignoring stale pointer target {id}");
                    None
                }
            },
            None => self
                .store
                .all()
                .rev()
                .find(|element| family(element) && element.hit_test(point, self.hit_tolerance))
                .map(|element| element.id().clone()),
        }
    }

    /// Whether the host may drag or transform `id` in `mode`.
    fn accepts_manipulation(&self, mode: Mode, id: &ElementId) -> bool {
        let Some(element) = self.store.get(id) else {
            log::debug!("Ignoring manipulation of missing element {id}");
            return false;
        };
        match mode {
            Mode::Write => element.is_text() && !self.editor.is_open(),
            Mode::Shapes => element.is_shape(),
            Mode::Draw => false,
        }
    }
}

/// Swallow stale-reference errors; they are expected when events race deletes.
fn absorb<T>(result: CanvasResult<T>) -> Option<T> {
    debug_assert!(
        !matches!(result, Err(CanvasError::DuplicateId(_))),
        "duplicate element id"
    );
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("Ignoring stale operation: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::shapes::{Rectangle, Shape};
    use crate::style::BACKGROUND_COLOR;
    use crate::text_edit::PLACEHOLDER_TEXT;

    fn canvas() -> Canvas {
        Canvas::new(&CanvasConfig {
            document_width: 200,
            document_height: 200,
            viewport_size: Size::new(100.0, 100.0),
            ..CanvasConfig::default()
        })
    }

    fn key(canvas: &mut Canvas, mode: Mode, key: Key) {
        canvas.handle_key(mode, KeyEvent::new(key));
    }

    fn add_rect(canvas: &mut Canvas, id: &str, x: f64, y: f64) -> ElementId {
        canvas
            .store
            .insert(Shape::Rectangle(Rectangle::new(
                ElementId::from(id),
                Point::new(x, y),
                40.0,
                40.0,
            )))
            .unwrap()
    }

    fn stroke(canvas: &mut Canvas, points: &[Point]) {
        canvas.handle_pointer(Mode::Draw, PointerEvent::down(points[0]));
        for &p in &points[1..] {
            canvas.handle_pointer(Mode::Draw, PointerEvent::Move { position: p });
        }
        canvas.handle_pointer(Mode::Draw, PointerEvent::Up);
    }

    #[test]
    fn test_add_text_edit_and_save() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        // Visible center (50, 50) minus (100, 15).
        assert_eq!(label.position, Point::new(-50.0, 35.0));

        canvas.text_input("Hello");
        canvas.handle_key(
            Mode::Write,
            KeyEvent::new(Key::Enter)
                .with_modifiers(Modifiers::CTRL)
                .in_text_input(),
        );

        assert!(canvas.edit_session().is_none());
        assert_eq!(canvas.store().text_count(), 1);
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert_eq!(label.content, "Hello");
        assert_eq!(canvas.selected(), Some(&id));
    }

    #[test]
    fn test_plain_enter_does_not_commit() {
        let mut canvas = canvas();
        canvas.add_text();
        canvas.text_input("line");
        canvas.handle_key(Mode::Write, KeyEvent::new(Key::Enter).in_text_input());
        assert!(canvas.edit_session().is_some());
    }

    #[test]
    fn test_double_click_creates_shape_at_offset() {
        let mut canvas = Canvas::default();
        canvas.handle_pointer(
            Mode::Shapes,
            PointerEvent::double_click(Point::new(200.0, 150.0)),
        );

        let shapes: Vec<&Element> = canvas.store().all().collect();
        assert_eq!(shapes.len(), 1);
        match shapes[0] {
            Element::Shape(Shape::Rectangle(r)) => {
                assert_eq!(r.position, Point::new(150.0, 100.0));
                assert!((r.width - 100.0).abs() < f64::EPSILON);
                assert!((r.height - 80.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected Rectangle"),
        }
        assert!(shapes[0].id().as_str().starts_with("shape_"));
        assert_eq!(canvas.selected(), Some(shapes[0].id()));
    }

    #[test]
    fn test_style_change_restyles_selected_shape() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.handle_pointer(Mode::Shapes, PointerEvent::down(Point::new(20.0, 20.0)));

        let red = SerializableColor::rgb(255, 0, 0);
        canvas.set_style(StyleConfig {
            shape_fill: red,
            stroke_width: 6.0,
            text_color: red,
            ..canvas.style().clone()
        });

        let style = canvas.store().get(&a).unwrap().as_shape().unwrap().style();
        assert_eq!(style.fill, red);
        assert_eq!(style.stroke, SerializableColor::white());
        assert!((style.stroke_width - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_change_restyles_selected_text() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.focus_lost();
        assert_eq!(canvas.selected(), Some(&id));

        let green = SerializableColor::rgb(0, 255, 0);
        canvas.set_style(StyleConfig {
            font_size: 32.0,
            font_family: "Courier".to_string(),
            text_color: green,
            shape_fill: green,
            ..canvas.style().clone()
        });

        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert!((label.font_size - 32.0).abs() < f64::EPSILON);
        assert_eq!(label.font_family, "Courier");
        assert_eq!(label.fill, green);
    }

    #[test]
    fn test_style_change_leaves_edited_text_alone() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.set_style(StyleConfig {
            font_size: 48.0,
            ..canvas.style().clone()
        });

        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert!((label.font_size - 20.0).abs() < f64::EPSILON);
        assert!((canvas.style().font_size - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_change_without_selection_touches_nothing() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.set_style(StyleConfig {
            shape_fill: SerializableColor::rgb(255, 0, 0),
            ..canvas.style().clone()
        });
        let style = canvas.store().get(&a).unwrap().as_shape().unwrap().style();
        assert_eq!(style.fill, StyleConfig::default().shape_fill);
    }

    #[test]
    fn test_double_click_on_shape_creates_nothing() {
        let mut canvas = canvas();
        add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.handle_pointer(Mode::Shapes, PointerEvent::double_click(Point::new(10.0, 10.0)));
        assert_eq!(canvas.store().len(), 1);
    }

    #[test]
    fn test_double_click_uses_pan_offset() {
        let mut canvas = Canvas::default();
        canvas.pan_by(Vec2::new(30.0, -20.0));
        canvas.handle_pointer(
            Mode::Shapes,
            PointerEvent::double_click(Point::new(200.0, 150.0)),
        );
        let element = canvas.store().all().next().unwrap();
        assert_eq!(element.position(), Point::new(120.0, 120.0));
    }

    #[test]
    fn test_l_stroke_then_clear() {
        let mut canvas = canvas();
        canvas.style.brush_size = 2.0;
        stroke(
            &mut canvas,
            &[
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(20.0, 20.0),
            ],
        );
        let white = SerializableColor::white();
        assert_eq!(canvas.raster().pixel(15, 10), Some(white));
        assert_eq!(canvas.raster().pixel(20, 15), Some(white));
        assert!(canvas.raster().is_background(15, 15));

        canvas.clear_all();
        assert_eq!(canvas.raster().painted_pixel_count(), 0);
    }

    #[test]
    fn test_stroke_maps_through_pan() {
        let mut canvas = canvas();
        canvas.style.brush_size = 2.0;
        canvas.pan_by(Vec2::new(50.0, 50.0));
        stroke(&mut canvas, &[Point::new(60.0, 60.0), Point::new(70.0, 60.0)]);
        // Screen (60, 60) is document (10, 10).
        assert!(!canvas.raster().is_background(15, 10));
        assert!(canvas.raster().is_background(65, 60));
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut canvas = canvas();
        canvas.handle_pointer(Mode::Draw, PointerEvent::down(Point::new(10.0, 10.0)));
        assert!(canvas.status().is_drawing);
        canvas.handle_pointer(Mode::Draw, PointerEvent::Leave);
        assert!(!canvas.status().is_drawing);
        canvas.handle_pointer(
            Mode::Draw,
            PointerEvent::Move {
                position: Point::new(90.0, 90.0),
            },
        );
        assert_eq!(canvas.raster().painted_pixel_count(), 0);
    }

    #[test]
    fn test_style_change_mid_stroke_is_ignored() {
        let mut canvas = canvas();
        canvas.style.brush_size = 2.0;
        canvas.handle_pointer(Mode::Draw, PointerEvent::down(Point::new(10.0, 10.0)));
        canvas.style.brush_color = SerializableColor::rgb(255, 0, 0);
        canvas.style.raster_tool = RasterTool::Eraser;
        canvas.handle_pointer(
            Mode::Draw,
            PointerEvent::Move {
                position: Point::new(30.0, 10.0),
            },
        );
        assert_eq!(canvas.raster().pixel(20, 10), Some(SerializableColor::white()));
    }

    #[test]
    fn test_eraser_restores_background() {
        let mut canvas = canvas();
        let path = [Point::new(10.0, 40.0), Point::new(80.0, 45.0)];
        stroke(&mut canvas, &path);
        assert!(canvas.raster().painted_pixel_count() > 0);

        key(&mut canvas, Mode::Draw, Key::Digit(2));
        canvas.style.eraser_size = canvas.style.brush_size;
        stroke(&mut canvas, &path);
        assert_eq!(canvas.raster().painted_pixel_count(), 0);
        assert_eq!(canvas.raster().pixel(40, 42), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_tool_keys() {
        let mut canvas = canvas();
        key(&mut canvas, Mode::Draw, Key::Digit(2));
        assert_eq!(canvas.style.raster_tool, RasterTool::Eraser);

        key(&mut canvas, Mode::Write, Key::Digit(1));
        assert_eq!(canvas.style.raster_tool, RasterTool::Eraser);

        canvas.handle_key(Mode::Draw, KeyEvent::new(Key::Digit(1)).in_text_input());
        assert_eq!(canvas.style.raster_tool, RasterTool::Eraser);

        key(&mut canvas, Mode::Draw, Key::Digit(1));
        assert_eq!(canvas.style.raster_tool, RasterTool::Brush);

        key(&mut canvas, Mode::Draw, Key::Digit(7));
        assert_eq!(canvas.style.raster_tool, RasterTool::Brush);
    }

    #[test]
    fn test_select_then_delete() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        add_rect(&mut canvas, "b", 100.0, 100.0);

        canvas.handle_pointer(Mode::Shapes, PointerEvent::down(Point::new(20.0, 20.0)));
        assert_eq!(canvas.selected(), Some(&a));

        key(&mut canvas, Mode::Shapes, Key::Delete);
        assert!(!canvas.store().contains(&a));
        assert!(canvas.selected().is_none());

        key(&mut canvas, Mode::Shapes, Key::Delete);
        assert_eq!(canvas.store().len(), 1);
    }

    #[test]
    fn test_click_empty_canvas_deselects_in_shapes_mode() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.handle_pointer(Mode::Shapes, PointerEvent::down(Point::new(20.0, 20.0)));
        assert_eq!(canvas.selected(), Some(&a));
        canvas.handle_pointer(Mode::Shapes, PointerEvent::down(Point::new(90.0, 90.0)));
        assert!(canvas.selected().is_none());
    }

    #[test]
    fn test_draw_mode_never_selects() {
        let mut canvas = canvas();
        add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.handle_pointer(
            Mode::Draw,
            PointerEvent::Down {
                position: Point::new(20.0, 20.0),
                target: Some(ElementId::from("a")),
            },
        );
        assert!(canvas.selected().is_none());
        assert!(canvas.status().is_drawing);
    }

    #[test]
    fn test_delete_ignored_while_editing() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        key(&mut canvas, Mode::Write, Key::Backspace);
        assert!(canvas.store().contains(&id));

        canvas.focus_lost();
        canvas.handle_key(Mode::Write, KeyEvent::new(Key::Delete).in_text_input());
        assert!(canvas.store().contains(&id));

        key(&mut canvas, Mode::Write, Key::Delete);
        assert!(!canvas.store().contains(&id));
    }

    #[test]
    fn test_escape_discards_and_deselects() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.text_input("draft");
        key(&mut canvas, Mode::Write, Key::Escape);

        assert!(canvas.edit_session().is_none());
        assert!(canvas.selected().is_none());
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert_eq!(label.content, "");
    }

    #[test]
    fn test_write_click_empty_commits() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.handle_pointer(Mode::Write, PointerEvent::down(Point::new(95.0, 95.0)));
        assert!(canvas.edit_session().is_none());
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert_eq!(label.content, PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_write_click_on_other_text_commits_and_selects() {
        let mut canvas = canvas();
        let first = canvas.add_text().unwrap();
        canvas.text_input("first");
        canvas.focus_lost();
        canvas.on_drag_end(Mode::Write, &first, Point::new(0.0, 0.0));

        let second = canvas.add_text().unwrap();
        canvas.text_input("second");
        canvas.handle_pointer(Mode::Write, PointerEvent::down(Point::new(10.0, 10.0)));

        assert!(canvas.edit_session().is_none());
        assert_eq!(canvas.selected(), Some(&first));
        let label = canvas.store().get(&second).unwrap().as_text().unwrap();
        assert_eq!(label.content, "second");
    }

    #[test]
    fn test_write_click_on_edited_label_keeps_session() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.text_input("typing");
        canvas.handle_pointer(
            Mode::Write,
            PointerEvent::Down {
                position: Point::ZERO,
                target: Some(id.clone()),
            },
        );
        assert_eq!(canvas.edit_session().unwrap().draft(), "typing");
    }

    #[test]
    fn test_double_click_text_starts_edit() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        canvas.text_input("Hello");
        canvas.focus_lost();
        key(&mut canvas, Mode::Write, Key::Escape);

        canvas.handle_pointer(
            Mode::Write,
            PointerEvent::DoubleClick {
                position: Point::ZERO,
                target: Some(id.clone()),
            },
        );
        let session = canvas.edit_session().unwrap();
        assert_eq!(session.id(), &id);
        assert_eq!(session.draft(), "Hello");
        assert_eq!(canvas.selected(), Some(&id));
    }

    #[test]
    fn test_transform_end_applies_floors() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        let node = NodeTransform {
            position: Point::new(5.0, 6.0),
            rotation: 45.0,
            scale_x: 0.01,
            scale_y: 2.0,
        };

        canvas.on_transform_end(Mode::Draw, &a, node);
        assert_eq!(canvas.store().get(&a).unwrap().position(), Point::ZERO);

        canvas.on_transform_end(Mode::Shapes, &a, node);
        match canvas.store().get(&a).unwrap() {
            Element::Shape(Shape::Rectangle(r)) => {
                assert!((r.width - 5.0).abs() < f64::EPSILON);
                assert!((r.height - 80.0).abs() < f64::EPSILON);
                assert!((r.rotation - 45.0).abs() < f64::EPSILON);
                assert_eq!(r.position, Point::new(5.0, 6.0));
            }
            _ => panic!("Expected Rectangle"),
        }
        assert_eq!(canvas.selected(), Some(&a));
    }

    #[test]
    fn test_text_transform_only_without_session() {
        let mut canvas = canvas();
        let id = canvas.add_text().unwrap();
        let node = NodeTransform {
            scale_x: 0.01,
            scale_y: 0.01,
            ..NodeTransform::identity(Point::ZERO, 0.0)
        };
        canvas.on_transform_end(Mode::Write, &id, node);
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert!((label.width - 200.0).abs() < f64::EPSILON);

        canvas.focus_lost();
        canvas.on_transform_end(Mode::Write, &id, node);
        let label = canvas.store().get(&id).unwrap().as_text().unwrap();
        assert!((label.width - 30.0).abs() < f64::EPSILON);
        assert!((label.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stale_ids_are_absorbed() {
        let mut canvas = canvas();
        let ghost = ElementId::from("ghost");
        canvas.handle_pointer(
            Mode::Shapes,
            PointerEvent::Down {
                position: Point::ZERO,
                target: Some(ghost.clone()),
            },
        );
        canvas.on_drag_end(Mode::Shapes, &ghost, Point::ZERO);
        canvas.on_transform_end(
            Mode::Shapes,
            &ghost,
            NodeTransform::identity(Point::ZERO, 0.0),
        );
        assert!(canvas.selected().is_none());
        assert!(canvas.store().is_empty());
    }

    #[test]
    fn test_drag_end_moves_shape() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.on_drag_end(Mode::Write, &a, Point::new(9.0, 9.0));
        assert_eq!(canvas.store().get(&a).unwrap().position(), Point::ZERO);
        canvas.on_drag_end(Mode::Shapes, &a, Point::new(9.0, 9.0));
        assert_eq!(canvas.store().get(&a).unwrap().position(), Point::new(9.0, 9.0));
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut canvas = canvas();
        add_rect(&mut canvas, "a", 0.0, 0.0);
        canvas.add_text();
        stroke(&mut canvas, &[Point::new(10.0, 90.0), Point::new(90.0, 90.0)]);

        canvas.clear_all();
        let status = canvas.status();
        assert_eq!(status.element_count, 0);
        assert!(status.selected.is_none());
        assert!(status.editing.is_none());
        assert_eq!(canvas.raster().painted_pixel_count(), 0);
    }

    #[test]
    fn test_scene_reflects_view_state() {
        let mut canvas = canvas();
        let a = add_rect(&mut canvas, "a", 10.0, 10.0);
        let t = canvas.add_text().unwrap();
        canvas.text_input("draft");
        canvas.pan_by(Vec2::new(5.0, 5.0));

        let scene = canvas.scene();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene[0].element.id(), &a);
        assert_eq!(scene[0].screen_position, Point::new(15.0, 15.0));
        assert!(!scene[0].selected);
        assert!(scene[0].draft.is_none());
        assert_eq!(scene[1].element.id(), &t);
        assert!(scene[1].selected);
        assert!(scene[1].editing);
        assert_eq!(scene[1].draft, Some("draft"));
    }

    #[test]
    fn test_view_operations() {
        let mut canvas = canvas();
        canvas.pan_by(Vec2::new(10.0, 0.0));
        canvas.pan_by(Vec2::new(0.0, 4.0));
        assert_eq!(canvas.status().viewport_offset, Vec2::new(10.0, 4.0));
        canvas.resize_viewport(640.0, 480.0);
        let status = canvas.status();
        assert_eq!(status.viewport_size, Size::new(640.0, 480.0));
        assert_eq!(status.document_size, Size::new(200.0, 200.0));
        canvas.reset_view();
        assert_eq!(canvas.status().viewport_offset, Vec2::ZERO);
    }
}
