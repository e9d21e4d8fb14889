use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::geometry::{Point, Rect};
use crate::model::scene::{
    Body, BodyProvider, Platform, PlatformId, SceneFilter, SceneProvider,
};

/// scripted scene and character state. tests mutate it between ticks to
/// simulate platforms appearing, moving and disappearing, and characters
/// walking around.
#[derive(Default)]
pub struct MockScene {
    platforms: Mutex<Vec<Platform>>,
    standing: Mutex<HashMap<Body, PlatformId>>,
    bounds: Mutex<HashMap<Body, Rect>>,
}

impl MockScene {
    pub fn new() -> MockScene {
        MockScene::default()
    }

    /// add a platform, or replace the one already registered under the
    /// same id
    pub fn put_platform(&self, platform: Platform) {
        let mut platforms = self.platforms.lock().unwrap();
        match platforms.iter_mut().find(|p| p.id == platform.id) {
            Some(existing) => *existing = platform,
            None => platforms.push(platform),
        }
    }

    pub fn remove_platform(&self, id: PlatformId) {
        self.platforms.lock().unwrap().retain(|p| p.id != id);
    }

    pub fn move_platform(&self, id: PlatformId, bounds: Rect) {
        if let Some(p) = self.platforms.lock().unwrap().iter_mut().find(|p| p.id == id) {
            p.bounds = bounds;
        }
    }

    pub fn set_standing(&self, body: Body, platform: Option<PlatformId>) {
        let mut standing = self.standing.lock().unwrap();
        match platform {
            Some(id) => {
                standing.insert(body, id);
            }
            None => {
                standing.remove(&body);
            }
        }
    }

    /// place a character by its bottom-center position, with the given
    /// collider extents
    pub fn place_body(&self, body: Body, feet: Point, width: f64, height: f64) {
        let rect = Rect::new(feet.x() - width / 2.0, feet.y() + height, width, height);
        self.bounds.lock().unwrap().insert(body, rect);
    }
}

impl SceneProvider for MockScene {
    fn platforms(&self, _filter: &SceneFilter) -> Vec<Platform> {
        self.platforms.lock().unwrap().clone()
    }
}

impl BodyProvider for MockScene {
    fn standing_platform(&self, body: Body) -> Option<PlatformId> {
        self.standing.lock().unwrap().get(&body).copied()
    }

    fn bounds(&self, body: Body) -> Rect {
        self.bounds
            .lock()
            .unwrap()
            .get(&body)
            .copied()
            .unwrap_or_else(|| Rect::new(0.0, 2.0, 1.0, 2.0))
    }
}
