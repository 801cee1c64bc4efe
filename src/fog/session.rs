use crate::fog::composite::{composite_fog_over_map, RgbaBuffer};
use crate::fog::input::{normalize, DeviceEvent, FogInputState, InputOutcome, PointerEvent};
use crate::fog::mode::ModeController;
use crate::fog::model::{Stroke, StrokeStore};
use crate::fog::render::{FogRenderer, RenderSettings};
use crate::fog::settings::FogSettings;
use crate::fog::store::{FogPersistence, KeyValueStorage, SaveOutcome};
use crate::fog::transform::ViewportParams;

/// One map session: owns the fog state and reacts to viewport, pointer and
/// mode events from the host.
pub struct FogSession<S> {
    settings: FogSettings,
    render_settings: RenderSettings,
    mode: ModeController,
    store: StrokeStore,
    persistence: FogPersistence<S>,
    input: FogInputState,
    renderer: FogRenderer,
    viewport: ViewportParams,
    last_save: Option<SaveOutcome>,
}

impl<S: KeyValueStorage> FogSession<S> {
    pub fn new(settings: FogSettings, storage: S, viewport: ViewportParams) -> Self {
        let mut settings = settings;
        settings.sanitize();
        let persistence = FogPersistence::with_key(storage, settings.storage_key.clone());
        let store = persistence.load();
        tracing::info!(
            strokes = store.len(),
            key = persistence.key(),
            "fog session started"
        );

        let mut session = Self {
            render_settings: RenderSettings::from(&settings),
            input: FogInputState::from_settings(&settings),
            settings,
            mode: ModeController::new(),
            store,
            persistence,
            renderer: FogRenderer::new(),
            viewport,
            last_save: None,
        };
        session.rerender();
        session
    }

    fn rerender(&mut self) {
        self.renderer
            .render(self.store.all(), &self.viewport, self.render_settings);
    }

    /// Pan, zoom or resize of the base map. Strokes live in image space, so
    /// the whole history is reprojected.
    pub fn on_viewport_change(&mut self, viewport: ViewportParams) -> &RgbaBuffer {
        self.viewport = viewport;
        self.rerender();
        self.renderer.frame()
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) -> InputOutcome {
        let event = normalize(event, self.settings.erase_modifier);
        self.handle_pointer(&event)
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> InputOutcome {
        let outcome =
            self.input
                .handle_event(event, &self.mode, &self.viewport, &mut self.store);
        match outcome {
            InputOutcome::StrokeAppended(stroke) => self.draw_new_stroke(&stroke),
            InputOutcome::GestureEnded { .. } => {
                self.last_save = Some(self.persistence.save(&self.store));
            }
            InputOutcome::Ignored => {}
        }
        outcome
    }

    fn draw_new_stroke(&mut self, stroke: &Stroke) {
        if self
            .renderer
            .is_current(&self.viewport, self.render_settings)
        {
            self.renderer
                .apply_stroke(stroke, &self.viewport, self.render_settings);
        } else {
            self.rerender();
        }
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.mode.toggle()
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn overlay_accepts_pointer(&self) -> bool {
        self.mode.accepts_pointer_input()
    }

    pub fn mode(&self) -> &ModeController {
        &self.mode
    }

    pub fn set_erase_brush(&mut self, erase: bool) {
        self.input.set_erase_brush(erase);
    }

    pub fn input(&self) -> &FogInputState {
        &self.input
    }

    pub fn frame(&self) -> &RgbaBuffer {
        self.renderer.frame()
    }

    pub fn composite_over(&self, map: &RgbaBuffer) -> RgbaBuffer {
        composite_fog_over_map(map, self.renderer.frame())
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.store
    }

    pub fn viewport(&self) -> &ViewportParams {
        &self.viewport
    }

    pub fn settings(&self) -> &FogSettings {
        &self.settings
    }

    pub fn persistence(&self) -> &FogPersistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut FogPersistence<S> {
        &mut self.persistence
    }

    /// Outcome of the save triggered by the most recent finished gesture.
    pub fn last_save(&self) -> Option<&SaveOutcome> {
        self.last_save.as_ref()
    }
}
