use cgmath::Deg;

/// A rotation angle that advances by a fixed step every frame.
///
/// The angle is kept in `[0, 360)`; periodicity makes the wrap invisible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    angle: f32,
    step: f32,
}

impl Spin {
    pub fn new(start_degrees: f32, step_degrees: f32) -> Self {
        Self {
            angle: start_degrees.rem_euclid(360.0),
            step: step_degrees,
        }
    }

    pub fn angle(&self) -> Deg<f32> {
        Deg(self.angle)
    }

    pub fn step(&self) -> Deg<f32> {
        Deg(self.step)
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step).rem_euclid(360.0);
    }
}
