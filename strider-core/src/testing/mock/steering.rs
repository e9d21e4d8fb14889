use std::sync::Mutex;

use crate::model::geometry::Point;
use crate::model::scene::SteeringSink;

/// a [`SteeringSink`] that records every emitted input for assertions
#[derive(Default)]
pub struct RecordingSteering {
    history: Mutex<Vec<Point>>,
}

impl RecordingSteering {
    pub fn new() -> RecordingSteering {
        RecordingSteering::default()
    }

    /// the most recently emitted input, zero if none was emitted yet
    pub fn last(&self) -> Point {
        self.history
            .lock()
            .unwrap()
            .last()
            .copied()
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<Point> {
        self.history.lock().unwrap().clone()
    }
}

impl SteeringSink for RecordingSteering {
    fn set_directional_input(&self, input: Point) {
        self.history.lock().unwrap().push(input);
    }
}
