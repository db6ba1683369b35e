use tracing::trace;

use crate::core::{ViewPoint, Viewport, image_to_view, is_in_view, marker_font_px, marker_radius};
use crate::error::SimResult;
use crate::quiz::{Annotation, Feedback};
use crate::render::{
    Color, LinePrimitive, MarkerPrimitive, PresentationFrame, Presenter, QuizEntry, SlideDisplay,
    StageTransform,
};

use super::MicroscopeSession;

const CORRECT_FILL: Color = Color::rgba(0.0, 1.0, 0.0, 0.6);
const INCORRECT_FILL: Color = Color::rgba(1.0, 0.0, 0.0, 0.6);
const PENDING_FILL: Color = Color::rgba(1.0, 165.0 / 255.0, 0.0, 0.7);
const MARKER_STROKE: Color = Color::rgb(0.0, 0.0, 0.0);
const GUIDE_COLOR: Color = Color::rgba(0.0, 1.0, 1.0, 0.5);

impl<P: Presenter> MicroscopeSession<P> {
    /// Materializes the current session into a presentation frame.
    #[must_use]
    pub fn build_frame(&self) -> PresentationFrame {
        let optics = &self.state.optics;
        let (pan_x, pan_y) = optics.pan();
        let (markers, quiz) = self.build_quiz_layer();

        PresentationFrame {
            viewport: self.config.viewport,
            slide: self.slide_display(),
            visual: optics.derive_visual_parameters(),
            transform: StageTransform {
                pan_x,
                pan_y,
                zoom: optics.zoom(),
            },
            readouts: optics.readouts(),
            markers,
            quiz,
            guide_lines: self.build_guide_lines(),
            tutorial: self.tutorial_view(),
            placing_annotation: self.interaction.is_placing_annotation(),
            status: self.status.clone(),
        }
    }

    /// Builds a frame and pushes it to the presenter.
    pub fn render(&mut self) -> SimResult<()> {
        let frame = self.build_frame();
        trace!(
            markers = frame.markers.len(),
            guide_lines = frame.guide_lines.len(),
            "presenting frame"
        );
        self.presenter.present(&frame)
    }

    fn slide_display(&self) -> SlideDisplay {
        if let Some(ticket) = self.images.pending() {
            return SlideDisplay::Loading {
                reference: ticket.source().reference().to_owned(),
            };
        }
        match self.images.current() {
            Some(image) => SlideDisplay::Image {
                reference: image.reference.clone(),
            },
            None => SlideDisplay::Placeholder,
        }
    }

    /// Markers and quiz rows for every annotation currently in view. Nothing
    /// is projected while an image load is pending or a restored custom image
    /// is waiting to be re-uploaded.
    fn build_quiz_layer(&self) -> (Vec<MarkerPrimitive>, Vec<QuizEntry>) {
        let Some(image) = self.image_dimensions() else {
            return (Vec::new(), Vec::new());
        };

        let optics = &self.state.optics;
        let zoom = optics.zoom();
        let radius = marker_radius(zoom);
        let font_px = marker_font_px(zoom);
        let mut markers = Vec::new();
        let mut quiz = Vec::new();
        for annotation in self.state.annotations.all() {
            let center = image_to_view(annotation.position(), image, zoom, optics.pan());
            if !is_in_view(center, self.config.viewport, radius) {
                continue;
            }
            markers.push(MarkerPrimitive {
                annotation_id: annotation.id,
                center,
                radius,
                fill: marker_fill(annotation.feedback),
                stroke: MARKER_STROKE,
                label_font_px: font_px,
            });
            quiz.push(quiz_entry(annotation));
        }
        (markers, quiz)
    }

    fn build_guide_lines(&self) -> Vec<LinePrimitive> {
        if !self.state.scanning_guide_visible {
            return Vec::new();
        }
        guide_lines(
            self.config.viewport,
            self.config.scanning_guide_divisions,
            self.state.optics.zoom(),
        )
    }
}

fn marker_fill(feedback: Feedback) -> Color {
    match feedback {
        Feedback::Correct => CORRECT_FILL,
        Feedback::Incorrect => INCORRECT_FILL,
        Feedback::Unanswered | Feedback::Submitted => PENDING_FILL,
    }
}

fn quiz_entry(annotation: &Annotation) -> QuizEntry {
    QuizEntry {
        annotation_id: annotation.id,
        prompt: format!("Point {}: {}", annotation.id, annotation.question),
        user_answer: annotation.user_answer.clone(),
        feedback: annotation.feedback,
    }
}

/// Interior grid lines splitting the viewport into `divisions` cells per axis.
fn guide_lines(viewport: Viewport, divisions: u32, zoom: f64) -> Vec<LinePrimitive> {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let step_x = width / f64::from(divisions);
    let step_y = height / f64::from(divisions);
    let stroke_width = (2.0 / zoom).max(0.5);

    let mut lines = Vec::with_capacity(divisions.saturating_sub(1) as usize * 2);
    for i in 1..divisions {
        let x = f64::from(i) * step_x;
        let y = f64::from(i) * step_y;
        lines.push(LinePrimitive::new(
            ViewPoint::new(x, 0.0),
            ViewPoint::new(x, height),
            stroke_width,
            GUIDE_COLOR,
        ));
        lines.push(LinePrimitive::new(
            ViewPoint::new(0.0, y),
            ViewPoint::new(width, y),
            stroke_width,
            GUIDE_COLOR,
        ));
    }
    lines
}
