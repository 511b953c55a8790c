//! Immediate-mode preview renderer.
//!
//! Draws the in-progress entity of the active drawing gesture. Unlike the
//! document layers, which repaint through a batched frame scheduler, this
//! renderer paints synchronously on every call: routing the preview
//! through the shared scheduler left a one-visible-frame gap between the
//! pointer and the rubber band, so the synchronous render here is an
//! invariant, not an oversight.
//!
//! Every call does a full clear-then-redraw, which makes `draw_preview`
//! and `clear` idempotent: repeating either with identical inputs
//! reproduces the same canvas.

use crate::grips::{DEFAULT_GRIP_SIZE, GRIP_FILL, GRIP_OUTLINE, GripPathCache};
use crate::labels::DistanceLabelRenderer;
use crate::surface::{PhysicalSize, StrokePaint, Surface};
use draftlens_core::entity::{
    AnglePreview, ArcConstruction, ArcGeometry, ArcPreview, CirclePreview, LinePreview,
    PointPreview, PolylinePreview, PreviewEntity, RectanglePreview,
};
use draftlens_core::style::store::StyleSettings;
use draftlens_core::style::{InteractionMode, LinePattern, MarkerShape, StyleColor};
use draftlens_core::viewport::{ViewTransform, Viewport};
use kurbo::{Affine, BezPath, Point, Shape as KurboShape, Vec2};
use std::f64::consts::{PI, TAU};

/// Curve flattening tolerance for arcs and circles.
const ARC_TOLERANCE: f64 = 0.1;

/// Stroke width of rubber-band construction lines.
const CONSTRUCTION_WIDTH: f64 = 1.0;

/// Stroke width of point markers.
const MARKER_WIDTH: f64 = 1.5;

/// State of the preview renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// No active preview; the canvas is blank.
    #[default]
    Idle,
    /// A preview entity is painted on the canvas.
    Active,
}

/// Per-call rendering options.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    /// Interaction mode the effective style is resolved under.
    pub mode: InteractionMode,
    /// Grip square size in logical pixels.
    pub grip_size: f64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Draft,
            grip_size: DEFAULT_GRIP_SIZE,
        }
    }
}

impl PreviewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interaction mode styles resolve under.
    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the grip size.
    pub fn with_grip_size(mut self, grip_size: f64) -> Self {
        self.grip_size = grip_size;
        self
    }
}

/// Immediate-mode renderer for the preview canvas layer.
///
/// Owns its surface exclusively; nothing else draws to it. Before a
/// surface is attached every draw operation is a silent no-op, which is
/// the expected transient state before the hosting view mounts.
pub struct PreviewRenderer<S: Surface> {
    surface: Option<S>,
    /// Logical (CSS) size of the canvas.
    logical_width: f64,
    logical_height: f64,
    /// Device pixel ratio of the hosting surface.
    scale_factor: f64,
    /// Color the canvas is blanked to on clear and before each redraw.
    background: StyleColor,
    state: PreviewState,
    current: Option<PreviewEntity>,
    dirty: bool,
    grips: GripPathCache,
    labels: DistanceLabelRenderer,
}

impl<S: Surface> Default for PreviewRenderer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> PreviewRenderer<S> {
    /// Create a renderer with no surface attached.
    pub fn new() -> Self {
        Self {
            surface: None,
            logical_width: 0.0,
            logical_height: 0.0,
            scale_factor: 1.0,
            background: StyleColor::TRANSPARENT,
            state: PreviewState::Idle,
            current: None,
            dirty: false,
            grips: GripPathCache::new(),
            labels: DistanceLabelRenderer::default(),
        }
    }

    /// Attach the canvas surface and configure its backing buffer.
    pub fn attach(&mut self, mut surface: S, width: f64, height: f64, scale_factor: f64) {
        surface.resize(PhysicalSize::from_logical(width, height, scale_factor));
        self.surface = Some(surface);
        self.logical_width = width;
        self.logical_height = height;
        self.scale_factor = scale_factor;
        self.state = PreviewState::Idle;
        self.current = None;
        self.dirty = true;
        log::debug!("preview surface attached at {width}x{height}@{scale_factor}");
    }

    /// Detach and return the surface; the renderer goes back to the
    /// pre-mount no-op state.
    pub fn dispose(&mut self) -> Option<S> {
        self.state = PreviewState::Idle;
        self.current = None;
        self.dirty = false;
        self.surface.take()
    }

    /// Whether a surface is attached.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Read access to the attached surface (e.g. to replay a recorded
    /// command stream). All mutation stays inside the renderer.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Current renderer state.
    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// The entity painted by the most recent draw call, if any.
    pub fn current_preview(&self) -> Option<&PreviewEntity> {
        self.current.as_ref()
    }

    /// Whether the surface content is stale (resized since the last draw).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the color the canvas is blanked to.
    pub fn set_background(&mut self, background: StyleColor) {
        self.background = background;
    }

    /// Reconfigure the backing buffer after the canvas display box
    /// changed. The logical size updates, the buffer is reallocated at
    /// device-pixel resolution, and the renderer is marked dirty; the host
    /// triggers the repaint.
    pub fn update_size(&mut self, width: f64, height: f64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.logical_width = width;
        self.logical_height = height;
        surface.resize(PhysicalSize::from_logical(width, height, self.scale_factor));
        self.dirty = true;
    }

    /// Synchronously render one preview entity.
    ///
    /// Clears the canvas and repaints it from scratch with the effective
    /// style of (`entity.class()`, `options.mode`). Never deferred to a
    /// frame scheduler; the visible preview must not lag the pointer event
    /// that produced it.
    pub fn draw_preview(
        &mut self,
        entity: &PreviewEntity,
        transform: ViewTransform,
        viewport: Viewport,
        options: &PreviewOptions,
        styles: &StyleSettings,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            log::trace!("draw_preview before surface attach, ignoring");
            return;
        };

        surface.clear(self.background);

        let mut ctx = DrawCtx {
            surface,
            grips: &mut self.grips,
            labels: &self.labels,
            transform,
            viewport,
            mode: options.mode,
            grip_size: options.grip_size,
        };

        match entity {
            PreviewEntity::Line(e) => ctx.line(e, styles),
            PreviewEntity::Circle(e) => ctx.circle(e, styles),
            PreviewEntity::Polyline(e) => ctx.polyline(e, styles),
            PreviewEntity::Rectangle(e) => ctx.rectangle(e, styles),
            PreviewEntity::Arc(e) => ctx.arc(e, styles),
            PreviewEntity::AngleMeasurement(e) => ctx.angle(e, styles),
            PreviewEntity::Point(e) => ctx.point(e, styles),
        }

        self.state = PreviewState::Active;
        self.current = Some(entity.clone());
        self.dirty = false;
    }

    /// Synchronously blank the canvas and drop the active preview.
    pub fn clear(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear(self.background);
        self.state = PreviewState::Idle;
        self.current = None;
        self.dirty = false;
    }
}

/// Borrowed drawing state for one `draw_preview` call.
struct DrawCtx<'a, S: Surface> {
    surface: &'a mut S,
    grips: &'a mut GripPathCache,
    labels: &'a DistanceLabelRenderer,
    transform: ViewTransform,
    viewport: Viewport,
    mode: InteractionMode,
    grip_size: f64,
}

impl<S: Surface> DrawCtx<'_, S> {
    fn map(&self, p: Point) -> Point {
        self.transform.world_to_screen(p, self.viewport)
    }

    fn stroke(&mut self, path: &BezPath, color: StyleColor, width: f64, pattern: LinePattern) {
        if color.is_transparent() || width <= 0.0 {
            return;
        }
        self.surface
            .stroke_path(path, &StrokePaint::patterned(color, width, pattern));
    }

    fn fill(&mut self, path: &BezPath, color: StyleColor) {
        if color.is_transparent() {
            return;
        }
        self.surface.fill_path(path, color);
    }

    /// Screen-space path through mapped world points.
    fn path_through(&self, points: &[Point], closed: bool) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(self.map(*first));
            for p in iter {
                path.line_to(self.map(*p));
            }
            if closed && points.len() > 2 {
                path.close_path();
            }
        }
        path
    }

    fn segment_path(&self, a: Point, b: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.map(a));
        path.line_to(self.map(b));
        path
    }

    /// Screen-space path of an already screen-mapped arc.
    fn arc_path(arc: &ArcGeometry) -> BezPath {
        kurbo::Arc::new(
            arc.center,
            Vec2::new(arc.radius, arc.radius),
            arc.start_angle,
            arc.sweep(),
            0.0,
        )
        .to_path(ARC_TOLERANCE)
    }

    /// Fill-and-outline grips at the given world points.
    fn grips_at(&mut self, world_points: &[Point]) {
        let grip = self.grips.path(self.grip_size).clone();
        let outline = StrokePaint::solid(GRIP_OUTLINE, 1.0);
        for wp in world_points {
            let sp = self.map(*wp);
            let mut path = grip.clone();
            path.apply_affine(Affine::translate(sp.to_vec2()));
            self.surface.fill_path(&path, GRIP_FILL);
            self.surface.stroke_path(&path, &outline);
        }
    }

    fn distance_label(&mut self, a: Point, b: Point, color: StyleColor) {
        self.labels
            .distance_label(self.surface, a, b, &self.transform, self.viewport, color);
    }

    fn line(&mut self, e: &LinePreview, styles: &StyleSettings) {
        let style = styles.effective_line(self.mode);
        let path = self.segment_path(e.start, e.end);
        self.stroke(&path, style.color, style.width, style.pattern);

        if e.show_distance {
            self.distance_label(e.start, e.end, style.color);
        }
        if e.show_grips {
            self.grips_at(&[e.start, e.midpoint(), e.end]);
        }
    }

    fn circle(&mut self, e: &CirclePreview, styles: &StyleSettings) {
        let style = styles.effective_circle(self.mode);
        let center = self.map(e.center);
        let radius = self.transform.length_to_screen(e.radius);
        let path = kurbo::Circle::new(center, radius).to_path(ARC_TOLERANCE);

        self.fill(&path, style.fill);
        self.stroke(&path, style.color, style.width, style.pattern);

        // Radius rubber band from the center to the picked rim point.
        if let Some(anchor) = e.radius_anchor {
            let radius_path = self.segment_path(e.center, anchor);
            self.stroke(
                &radius_path,
                style.color,
                CONSTRUCTION_WIDTH,
                LinePattern::Dashed,
            );
            if e.show_distance {
                self.distance_label(e.center, anchor, style.color);
            }
        } else if e.show_distance {
            let [east, _, _, _] = e.quadrant_points();
            self.distance_label(e.center, east, style.color);
        }

        if e.show_grips {
            let mut grips = vec![e.center];
            grips.extend(e.quadrant_points());
            self.grips_at(&grips);
        }
    }

    fn polyline(&mut self, e: &PolylinePreview, styles: &StyleSettings) {
        if e.points.is_empty() {
            return;
        }
        let style = styles.effective_polyline(self.mode);
        let path = self.path_through(&e.points, e.closed);
        self.stroke(&path, style.color, style.width, style.pattern);

        if e.show_distances {
            for (a, b) in e.segments() {
                self.distance_label(a, b, style.color);
            }
        }
        if e.show_grips {
            self.grips_at(&e.points);
        }
    }

    fn rectangle(&mut self, e: &RectanglePreview, styles: &StyleSettings) {
        let style = styles.effective_rectangle(self.mode);
        let corners = e.corners();
        let path = self.path_through(&corners, true);

        self.fill(&path, style.fill);
        self.stroke(&path, style.color, style.width, style.pattern);

        if e.show_distances {
            // One edge per dimension is enough: width along the start
            // edge, height along the adjacent one.
            self.distance_label(corners[0], corners[1], style.color);
            self.distance_label(corners[1], corners[2], style.color);
        }
        if e.show_grips {
            self.grips_at(&corners);
        }
    }

    fn arc(&mut self, e: &ArcPreview, styles: &StyleSettings) {
        let style = styles.effective_arc(self.mode);

        match &e.construction {
            ArcConstruction::None => {}
            ArcConstruction::Polyline(points) => {
                if points.len() >= 2 {
                    let path = self.path_through(points, false);
                    self.stroke(
                        &path,
                        style.construction_color,
                        CONSTRUCTION_WIDTH,
                        style.construction_pattern,
                    );
                }
            }
            ArcConstruction::Radial { center, spokes } => {
                for spoke in spokes {
                    let path = self.segment_path(*center, *spoke);
                    self.stroke(
                        &path,
                        style.construction_color,
                        CONSTRUCTION_WIDTH,
                        style.construction_pattern,
                    );
                }
            }
        }

        if let Some(geometry) = &e.geometry {
            // The world arc is counterclockwise-positive; the screen arc
            // has both angles negated and the sweep flipped.
            let screen_arc = self.transform.arc_to_screen(geometry, self.viewport);
            let path = Self::arc_path(&screen_arc);
            self.stroke(&path, style.color, style.width, style.pattern);

            if e.show_distance {
                self.distance_label(geometry.center, geometry.start_point(), style.color);
            }
        }

        if e.show_grips {
            self.grips_at(&e.grip_points());
        }
    }

    fn angle(&mut self, e: &AnglePreview, styles: &StyleSettings) {
        let style = styles.effective_angle(self.mode);

        let first_arm = self.segment_path(e.vertex, e.first);
        self.stroke(&first_arm, style.color, style.width, LinePattern::Solid);
        let second_arm = self.segment_path(e.vertex, e.second);
        self.stroke(&second_arm, style.color, style.width, LinePattern::Solid);

        let vertex = self.map(e.vertex);
        let d1 = self.map(e.first) - vertex;
        let d2 = self.map(e.second) - vertex;
        if d1.hypot() < f64::EPSILON || d2.hypot() < f64::EPSILON {
            if e.show_grips {
                self.grips_at(&[e.vertex, e.first, e.second]);
            }
            return;
        }

        // Indicator arc at a fixed screen radius between the arms, swept
        // the short way around.
        let start = d1.y.atan2(d1.x);
        let sweep = wrap_angle(d2.y.atan2(d2.x) - start);
        let indicator = kurbo::Arc::new(
            vertex,
            Vec2::new(style.arc_radius, style.arc_radius),
            start,
            sweep,
            0.0,
        )
        .to_path(ARC_TOLERANCE);
        self.stroke(&indicator, style.color, CONSTRUCTION_WIDTH, LinePattern::Solid);

        if e.show_label {
            let bisector = screen_bisector(d1, d2);
            let anchor = vertex + bisector * (style.arc_radius + self.labels.offset);
            self.labels
                .angle_label(self.surface, anchor, e.angle_degrees(), style.label_color);
        }

        if e.show_grips {
            self.grips_at(&[e.vertex, e.first, e.second]);
        }
    }

    fn point(&mut self, e: &PointPreview, styles: &StyleSettings) {
        let style = styles.effective_point(self.mode);
        let p = self.map(e.position);
        let half = style.size / 2.0;

        match style.marker {
            MarkerShape::Cross => {
                let mut path = BezPath::new();
                path.move_to((p.x - half, p.y));
                path.line_to((p.x + half, p.y));
                path.move_to((p.x, p.y - half));
                path.line_to((p.x, p.y + half));
                self.stroke(&path, style.color, MARKER_WIDTH, LinePattern::Solid);
            }
            MarkerShape::Circle => {
                let path = kurbo::Circle::new(p, half).to_path(ARC_TOLERANCE);
                self.stroke(&path, style.color, MARKER_WIDTH, LinePattern::Solid);
            }
            MarkerShape::Square => {
                let rect = kurbo::Rect::new(p.x - half, p.y - half, p.x + half, p.y + half);
                let path = rect.to_path(ARC_TOLERANCE);
                self.stroke(&path, style.color, MARKER_WIDTH, LinePattern::Solid);
            }
        }

        if e.show_grips {
            self.grips_at(&[e.position]);
        }
    }
}

/// Wrap an angle difference into (-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI { PI } else { wrapped }
}

/// Unit bisector between two screen-space arm directions. Opposing arms
/// fall back to the perpendicular of the first arm.
fn screen_bisector(d1: Vec2, d2: Vec2) -> Vec2 {
    let n1 = d1 / d1.hypot();
    let n2 = d2 / d2.hypot();
    let sum = n1 + n2;
    if sum.hypot() < 1e-9 {
        Vec2::new(-n1.y, n1.x)
    } else {
        sum / sum.hypot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use draftlens_core::style::config::LineStyleDelta;
    use draftlens_core::style::store::{SlotAction, StyleAction, StyleStore};
    use draftlens_core::storage::MemoryStorage;
    use std::sync::Arc as StdArc;

    fn attached_renderer() -> PreviewRenderer<RecordingSurface> {
        let mut renderer = PreviewRenderer::new();
        renderer.attach(RecordingSurface::new(), 200.0, 200.0, 1.0);
        renderer
    }

    fn line_entity() -> PreviewEntity {
        PreviewEntity::Line(LinePreview::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)))
    }

    fn default_view() -> (ViewTransform, Viewport) {
        (ViewTransform::default(), Viewport::new(200.0, 200.0))
    }

    #[test]
    fn test_draw_before_attach_is_silent_noop() {
        let mut renderer: PreviewRenderer<RecordingSurface> = PreviewRenderer::new();
        let (transform, viewport) = default_view();

        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );
        renderer.clear();
        renderer.update_size(100.0, 100.0);

        assert_eq!(renderer.state(), PreviewState::Idle);
        assert!(renderer.current_preview().is_none());
    }

    #[test]
    fn test_line_maps_through_view_transform() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();
        let styles = StyleSettings::default();

        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &styles,
        );

        // World (0,0)-(100,0) lands on the bottom edge: (100,200)-(200,200).
        let mut expected = BezPath::new();
        expected.move_to((100.0, 200.0));
        expected.line_to((200.0, 200.0));

        let commands = renderer.surface().unwrap().commands();
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        let DrawCommand::StrokePath { path, paint } = &commands[1] else {
            panic!("expected the line stroke after the clear");
        };
        assert_eq!(*path, expected);
        assert_eq!(paint.color, styles.effective_line(InteractionMode::Draft).color);
    }

    #[test]
    fn test_line_draws_label_and_grips() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();

        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );

        let commands = renderer.surface().unwrap().commands();
        let labels: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["100.00"]);

        // Three grips: start, midpoint, end; each filled and outlined.
        let fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath { .. }))
            .count();
        assert_eq!(fills, 3);
    }

    #[test]
    fn test_draw_preview_is_idempotent() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();
        let styles = StyleSettings::default();
        let entity = line_entity();
        let options = PreviewOptions::default();

        renderer.draw_preview(&entity, transform, viewport, &options, &styles);
        let first = renderer.surface().unwrap().commands().to_vec();

        renderer.draw_preview(&entity, transform, viewport, &options, &styles);
        let second = renderer.surface().unwrap().commands().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_is_absorbing() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();

        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );
        renderer.clear();
        let once = renderer.surface().unwrap().commands().to_vec();
        assert_eq!(once.len(), 1);
        assert!(matches!(once[0], DrawCommand::Clear(_)));

        renderer.clear();
        assert_eq!(renderer.surface().unwrap().commands(), &once[..]);
        assert_eq!(renderer.state(), PreviewState::Idle);
        assert!(renderer.current_preview().is_none());
    }

    #[test]
    fn test_state_transitions() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();
        assert_eq!(renderer.state(), PreviewState::Idle);

        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );
        assert_eq!(renderer.state(), PreviewState::Active);
        assert_eq!(renderer.current_preview(), Some(&line_entity()));

        renderer.clear();
        assert_eq!(renderer.state(), PreviewState::Idle);
    }

    #[test]
    fn test_update_size_reallocates_device_pixels_and_marks_dirty() {
        let mut renderer = PreviewRenderer::new();
        renderer.attach(RecordingSurface::new(), 100.0, 100.0, 2.0);
        assert_eq!(
            renderer.surface().unwrap().size(),
            Some(PhysicalSize { width: 200, height: 200 })
        );

        let (transform, viewport) = default_view();
        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );
        assert!(!renderer.is_dirty());

        renderer.update_size(50.0, 40.0);
        assert_eq!(
            renderer.surface().unwrap().size(),
            Some(PhysicalSize { width: 100, height: 80 })
        );
        assert!(renderer.is_dirty());
    }

    #[test]
    fn test_arc_render_applies_angle_inversion() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();

        let geometry = ArcGeometry {
            center: Point::new(0.0, 50.0),
            radius: 20.0,
            start_angle: 0.4,
            end_angle: 1.6,
            counterclockwise: true,
        };
        let entity = PreviewEntity::Arc(ArcPreview {
            geometry: Some(geometry),
            construction: ArcConstruction::None,
            show_grips: false,
            show_distance: false,
        });

        renderer.draw_preview(
            &entity,
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );

        // The stroked path must be the screen-mapped arc: negated angles,
        // flipped sweep, center pushed through the same Y-inverting map.
        let screen_arc = transform.arc_to_screen(&geometry, viewport);
        assert!(!screen_arc.counterclockwise);
        let expected = kurbo::Arc::new(
            screen_arc.center,
            Vec2::new(screen_arc.radius, screen_arc.radius),
            screen_arc.start_angle,
            screen_arc.sweep(),
            0.0,
        )
        .to_path(ARC_TOLERANCE);

        let commands = renderer.surface().unwrap().commands();
        let DrawCommand::StrokePath { path, .. } = &commands[1] else {
            panic!("expected the arc stroke after the clear");
        };
        assert_eq!(*path, expected);
    }

    #[test]
    fn test_arc_construction_lines_use_construction_style() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();
        let styles = StyleSettings::default();

        let entity = PreviewEntity::Arc(ArcPreview::radial(
            Point::new(0.0, 20.0),
            vec![Point::new(30.0, 20.0)],
            true,
        ));
        renderer.draw_preview(
            &entity,
            transform,
            viewport,
            &PreviewOptions::default(),
            &styles,
        );

        let arc_style = styles.effective_arc(InteractionMode::Draft);
        let commands = renderer.surface().unwrap().commands();
        let DrawCommand::StrokePath { paint, .. } = &commands[1] else {
            panic!("expected the spoke stroke after the clear");
        };
        assert_eq!(paint.color, arc_style.construction_color);
        assert!(paint.dash.is_some());
    }

    #[test]
    fn test_hover_override_changes_stroke_color() {
        let mut store = StyleStore::new(StdArc::new(MemoryStorage::new()), "styles");
        store.dispatch(StyleAction::Line(SlotAction::ToggleOverride(
            InteractionMode::Hover,
            true,
        )));
        store.dispatch(StyleAction::Line(SlotAction::UpdateOverride(
            InteractionMode::Hover,
            LineStyleDelta {
                color: Some(StyleColor::rgb(0xFF, 0x8C, 0x00)),
                ..Default::default()
            },
        )));

        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();
        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::new().with_mode(InteractionMode::Hover),
            store.settings(),
        );

        let commands = renderer.surface().unwrap().commands();
        let DrawCommand::StrokePath { paint, .. } = &commands[1] else {
            panic!("expected the line stroke after the clear");
        };
        assert_eq!(paint.color, StyleColor::rgb(0xFF, 0x8C, 0x00));
    }

    #[test]
    fn test_angle_label_reads_world_degrees() {
        let mut renderer = attached_renderer();
        let (transform, viewport) = default_view();

        let entity = PreviewEntity::AngleMeasurement(AnglePreview::new(
            Point::new(0.0, 50.0),
            Point::new(40.0, 50.0),
            Point::new(0.0, 90.0),
        ));
        renderer.draw_preview(
            &entity,
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );

        let commands = renderer.surface().unwrap().commands();
        let label = commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(label.as_deref(), Some("90.0°"));
    }

    #[test]
    fn test_dispose_returns_to_noop_state() {
        let mut renderer = attached_renderer();
        let surface = renderer.dispose();
        assert!(surface.is_some());
        assert!(!renderer.is_attached());

        let (transform, viewport) = default_view();
        renderer.draw_preview(
            &line_entity(),
            transform,
            viewport,
            &PreviewOptions::default(),
            &StyleSettings::default(),
        );
        assert_eq!(renderer.state(), PreviewState::Idle);
    }
}
