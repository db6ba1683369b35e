pub mod controls;

use serde::{Deserialize, Serialize};

use crate::core::{OpticalState, ViewPoint};
use crate::error::{SimError, SimResult};

pub use controls::{ControlKind, ControlSensitivity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    AdjustingControl(ControlKind),
    PlacingAnnotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Stage,
    Control(ControlKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum DragBaseline {
    Pan { x: f64, y: f64 },
    Value(f64),
}

/// A pointer drag in progress. Updates are always computed from the values
/// captured at `begin`, never from the previous update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    target: DragTarget,
    start: ViewPoint,
    baseline: DragBaseline,
}

impl DragSession {
    #[must_use]
    pub fn target(self) -> DragTarget {
        self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    drag: Option<DragSession>,
    placing_annotation: bool,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        match self.drag.map(DragSession::target) {
            Some(DragTarget::Stage) => InteractionMode::Panning,
            Some(DragTarget::Control(control)) => InteractionMode::AdjustingControl(control),
            None if self.placing_annotation => InteractionMode::PlacingAnnotation,
            None => InteractionMode::Idle,
        }
    }

    #[must_use]
    pub fn active_drag(self) -> Option<DragSession> {
        self.drag
    }

    #[must_use]
    pub fn is_placing_annotation(self) -> bool {
        self.placing_annotation
    }

    /// Toggles annotation-placement mode and returns the new state.
    pub fn toggle_annotation_placement(&mut self) -> bool {
        self.placing_annotation = !self.placing_annotation;
        self.placing_annotation
    }

    pub fn set_annotation_placement(&mut self, enabled: bool) {
        self.placing_annotation = enabled;
    }

    /// Opens a drag session.
    ///
    /// Returns `Ok(false)` for stage drags while annotation placement is on,
    /// and an error when another session is still open.
    pub fn begin_drag(
        &mut self,
        target: DragTarget,
        pointer: ViewPoint,
        optics: &OpticalState,
    ) -> SimResult<bool> {
        if self.drag.is_some() {
            return Err(SimError::DragInProgress);
        }
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return Err(SimError::InvalidData(
                "drag pointer must be finite".to_owned(),
            ));
        }
        let baseline = match target {
            DragTarget::Stage => {
                if self.placing_annotation {
                    return Ok(false);
                }
                let (x, y) = optics.pan();
                DragBaseline::Pan { x, y }
            }
            DragTarget::Control(control) => DragBaseline::Value(optics.field(control.field())),
        };
        self.drag = Some(DragSession {
            target,
            start: pointer,
            baseline,
        });
        Ok(true)
    }

    /// Applies the pointer displacement since `begin_drag` to the optics.
    ///
    /// Returns the dragged target, or `None` when no session is open.
    pub fn update_drag(
        &mut self,
        pointer: ViewPoint,
        optics: &mut OpticalState,
        sensitivity: ControlSensitivity,
    ) -> Option<DragTarget> {
        let session = self.drag?;
        let dx = pointer.x - session.start.x;
        let dy = pointer.y - session.start.y;
        match (session.target, session.baseline) {
            (DragTarget::Stage, DragBaseline::Pan { x, y }) => {
                optics.set_pan(x + dx, y + dy);
            }
            (DragTarget::Control(control), DragBaseline::Value(initial)) => {
                // Dragging up increases the value.
                let value = initial - dy * sensitivity.for_control(control);
                optics.set_field(control.field(), value);
            }
            _ => return None,
        }
        Some(session.target)
    }

    pub fn end_drag(&mut self) -> Option<DragTarget> {
        self.drag.take().map(DragSession::target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_drag_is_ignored_while_placing_annotations() {
        let mut interaction = InteractionState::default();
        interaction.toggle_annotation_placement();
        let optics = OpticalState::default();

        let started = interaction
            .begin_drag(DragTarget::Stage, ViewPoint::new(0.0, 0.0), &optics)
            .expect("begin");
        assert!(!started);
        assert_eq!(interaction.mode(), InteractionMode::PlacingAnnotation);
    }

    #[test]
    fn second_drag_is_rejected() {
        let mut interaction = InteractionState::default();
        let optics = OpticalState::default();
        interaction
            .begin_drag(DragTarget::Stage, ViewPoint::new(0.0, 0.0), &optics)
            .expect("begin");
        let err = interaction
            .begin_drag(
                DragTarget::Control(ControlKind::FineFocus),
                ViewPoint::new(0.0, 0.0),
                &optics,
            )
            .expect_err("second drag must fail");
        assert!(matches!(err, SimError::DragInProgress));
    }
}
