use glam::Vec2;

/// Pointer press bookkeeping used to tell clicks from orbit drags.
#[derive(Default, Clone, Copy)]
pub struct PressState {
    pub down: bool,
    pub origin: Vec2,
    pub last: Vec2,
    pub travel: f32,
}

impl PressState {
    pub fn press(&mut self, at: Vec2) {
        self.down = true;
        self.origin = at;
        self.last = at;
        self.travel = 0.0;
    }

    /// Record a move while pressed; returns the delta since the last sample.
    pub fn drag_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.down {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travel = self.travel.max(at.distance(self.origin));
        Some(delta)
    }

    /// End the press; `true` if it stayed within `slop` pixels.
    pub fn release(&mut self, at: Vec2, slop: f32) -> bool {
        let was_down = std::mem::take(&mut self.down);
        was_down && self.travel.max(at.distance(self.origin)) <= slop
    }
}

/// Map client (CSS) coordinates into the canvas backing store.
///
/// `rect` is `(left, top, width, height)` of the canvas in CSS pixels.
/// Returns `None` while the canvas has no layout size.
#[inline]
pub fn client_to_canvas_px(
    client: Vec2,
    rect: (f32, f32, f32, f32),
    backing: (u32, u32),
) -> Option<Vec2> {
    let (left, top, width, height) = rect;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let x_css = client.x - left;
    let y_css = client.y - top;
    Some(Vec2::new(
        (x_css / width) * backing.0 as f32,
        (y_css / height) * backing.1 as f32,
    ))
}

/// Wheel delta in notches; positive means zoom in.
#[inline]
pub fn wheel_notches(delta_y: f64, notch_px: f32) -> f32 {
    if notch_px <= 0.0 || !delta_y.is_finite() {
        return 0.0;
    }
    -(delta_y as f32) / notch_px
}
