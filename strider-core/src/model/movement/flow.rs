use bitflags::bitflags;

bitflags! {
    /// directional permission to enter a link. the search penalizes a
    /// transition that enters a link from a side its flow does not allow,
    /// which is how one-way connectors (jumps, drops) are modeled.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Flow: u8 {
        const START_TO_END = 1;
        const END_TO_START = 1 << 1;

        const ALL = Self::START_TO_END.bits() | Self::END_TO_START.bits();
    }
}

impl Flow {
    /// true iff traversal may enter through the given side
    pub fn allows(&self, entry: Flow) -> bool {
        self.contains(entry)
    }
}
