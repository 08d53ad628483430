use super::{Canvas, Paint, RectF};

/// One call made on a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: RectF,
        paint: Paint,
    },
    Oval {
        rect: RectF,
        paint: Paint,
    },
    RoundRect {
        rect: RectF,
        rx: f32,
        ry: f32,
        paint: Paint,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        paint: Paint,
    },
}

impl DrawOp {
    pub fn paint(&self) -> &Paint {
        match self {
            DrawOp::Rect { paint, .. }
            | DrawOp::Oval { paint, .. }
            | DrawOp::RoundRect { paint, .. }
            | DrawOp::Text { paint, .. } => paint,
        }
    }

    /// Replays this op onto another canvas.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        match self {
            DrawOp::Rect { rect, paint } => canvas.draw_rect(*rect, paint),
            DrawOp::Oval { rect, paint } => canvas.draw_oval(*rect, paint),
            DrawOp::RoundRect {
                rect,
                rx,
                ry,
                paint,
            } => canvas.draw_round_rect(*rect, *rx, *ry, paint),
            DrawOp::Text { text, x, y, paint } => canvas.draw_text(text, *x, *y, paint),
        }
    }
}

/// Canvas that keeps a display list instead of producing pixels.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Takes the recorded ops, leaving the canvas empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for op in &self.ops {
            op.replay(canvas);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, rect: RectF, paint: &Paint) {
        self.ops.push(DrawOp::Rect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_oval(&mut self, rect: RectF, paint: &Paint) {
        self.ops.push(DrawOp::Oval {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_round_rect(&mut self, rect: RectF, rx: f32, ry: f32, paint: &Paint) {
        self.ops.push(DrawOp::RoundRect {
            rect,
            rx,
            ry,
            paint: paint.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            paint: paint.clone(),
        });
    }
}
