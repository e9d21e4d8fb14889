use bitflags::bitflags;

bitflags! {
    /// the locomotion modes a link supports. a link's action set describes
    /// how an agent moves while on it: platform segments carry the ground
    /// modes, connectors carry `JUMPING` or `FALLING`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ActionSet: u8 {
        const STANDING = 1;
        const CROUCHING = 1 << 1;
        const CRAWLING = 1 << 2;
        const WALKING = 1 << 3;
        const RUNNING = 1 << 4;
        const JUMPING = 1 << 5;
        const FALLING = 1 << 6;

        /// ground locomotion: every mode that keeps the agent on a surface
        const TRAVERSING = Self::STANDING.bits()
            | Self::CROUCHING.bits()
            | Self::CRAWLING.bits()
            | Self::WALKING.bits()
            | Self::RUNNING.bits();
    }
}

impl ActionSet {
    /// true iff every flag in `mask` is present
    pub fn allows_all(&self, mask: ActionSet) -> bool {
        self.contains(mask)
    }

    /// true iff at least one flag in `mask` is present
    pub fn allows_any(&self, mask: ActionSet) -> bool {
        self.intersects(mask)
    }
}
