use crate::fog::mode::ModeController;
use crate::fog::model::{Stroke, StrokeStore};
use crate::fog::settings::{EraseModifier, FogSettings};
use crate::fog::transform::{Point, ViewportParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl PointerModifiers {
    pub fn holds(self, binding: EraseModifier) -> bool {
        match binding {
            EraseModifier::None => false,
            EraseModifier::Shift => self.shift,
            EraseModifier::Alt => self.alt,
            EraseModifier::Ctrl => self.ctrl,
        }
    }
}

/// Raw device input as delivered by the host, positions in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    Mouse {
        phase: PointerPhase,
        position: Point,
        modifiers: PointerModifiers,
    },
    /// `touches` holds every point currently on the surface; it is empty for
    /// the end of a gesture.
    Touch {
        phase: PointerPhase,
        touches: Vec<Point>,
    },
}

/// Device-independent pointer event consumed by [`FogInputState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub multi_touch: bool,
    pub erase_modifier: bool,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            multi_touch: false,
            erase_modifier: false,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(PointerPhase::Cancel, 0.0, 0.0)
    }

    pub fn with_multi_touch(mut self) -> Self {
        self.multi_touch = true;
        self
    }

    pub fn with_erase_modifier(mut self) -> Self {
        self.erase_modifier = true;
        self
    }
}

pub fn normalize(event: &DeviceEvent, erase_binding: EraseModifier) -> PointerEvent {
    match event {
        DeviceEvent::Mouse {
            phase,
            position,
            modifiers,
        } => PointerEvent {
            phase: *phase,
            position: *position,
            multi_touch: false,
            erase_modifier: modifiers.holds(erase_binding),
        },
        DeviceEvent::Touch { phase, touches } => PointerEvent {
            phase: *phase,
            position: touches.first().copied().unwrap_or(Point::ORIGIN),
            multi_touch: touches.len() > 1,
            erase_modifier: false,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        erase: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Ignored,
    StrokeAppended(Stroke),
    GestureEnded { strokes: usize, cancelled: bool },
}

/// Turns pointer gestures into brush stamps. One gesture at a time; whether it
/// reveals or erases is fixed when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct FogInputState {
    state: GestureState,
    brush_radius: f64,
    multi_touch_erases: bool,
    erase_brush: bool,
    gesture_strokes: usize,
}

impl FogInputState {
    pub fn new(brush_radius: f64, multi_touch_erases: bool) -> Self {
        Self {
            state: GestureState::Idle,
            brush_radius,
            multi_touch_erases,
            erase_brush: false,
            gesture_strokes: 0,
        }
    }

    pub fn from_settings(settings: &FogSettings) -> Self {
        Self::new(settings.brush_radius, settings.multi_touch_erases)
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    pub fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    pub fn set_brush_radius(&mut self, radius: f64) {
        self.brush_radius = radius;
    }

    /// Sticky erase brush for devices with neither modifiers nor multi-touch.
    /// Takes effect from the next gesture.
    pub fn set_erase_brush(&mut self, erase: bool) {
        self.erase_brush = erase;
    }

    pub fn erase_brush(&self) -> bool {
        self.erase_brush
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        mode: &ModeController,
        params: &ViewportParams,
        store: &mut StrokeStore,
    ) -> InputOutcome {
        match (self.state, event.phase) {
            (GestureState::Idle, PointerPhase::Down) => {
                if !mode.is_editing() {
                    return InputOutcome::Ignored;
                }
                let erase = self.gesture_erases(event);
                self.state = GestureState::Drawing { erase };
                self.gesture_strokes = 0;
                tracing::debug!(erase, "fog gesture started");
                self.stamp(event.position, erase, params, store)
            }
            (GestureState::Idle, _) => InputOutcome::Ignored,
            (GestureState::Drawing { .. }, PointerPhase::Down) => InputOutcome::Ignored,
            (GestureState::Drawing { erase }, PointerPhase::Move) => {
                if !mode.is_editing() {
                    return InputOutcome::Ignored;
                }
                self.stamp(event.position, erase, params, store)
            }
            (GestureState::Drawing { .. }, PointerPhase::Up | PointerPhase::Cancel) => {
                self.state = GestureState::Idle;
                let cancelled = event.phase == PointerPhase::Cancel;
                tracing::debug!(strokes = self.gesture_strokes, cancelled, "fog gesture ended");
                InputOutcome::GestureEnded {
                    strokes: self.gesture_strokes,
                    cancelled,
                }
            }
        }
    }

    fn gesture_erases(&self, event: &PointerEvent) -> bool {
        self.erase_brush || event.erase_modifier || (self.multi_touch_erases && event.multi_touch)
    }

    fn stamp(
        &mut self,
        position: Point,
        erase: bool,
        params: &ViewportParams,
        store: &mut StrokeStore,
    ) -> InputOutcome {
        let stroke = Stroke::at(params.to_image_space(position), self.brush_radius, erase);
        if !stroke.is_drawable() {
            tracing::debug!(?stroke, "dropping fog stroke outside image space");
            return InputOutcome::Ignored;
        }
        store.append(stroke);
        self.gesture_strokes += 1;
        InputOutcome::StrokeAppended(stroke)
    }
}
