/// Which side a position sticks to when content is inserted exactly at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// A mapped position plus whether the content around it was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    pub deleted: bool,
}

/// Describes how a single step moved positions: `old_size` positions
/// starting at `start` were replaced by `new_size` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMap {
    start: usize,
    old_size: usize,
    new_size: usize,
}

impl StepMap {
    pub fn new(start: usize, old_size: usize, new_size: usize) -> Self {
        Self {
            start,
            old_size,
            new_size,
        }
    }

    /// A map that leaves every position in place.
    pub fn identity() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_result(pos, assoc).pos
    }

    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let end = self.start + self.old_size;
        if pos < self.start {
            return MapResult {
                pos,
                deleted: false,
            };
        }
        if pos > end {
            return MapResult {
                pos: pos - self.old_size + self.new_size,
                deleted: false,
            };
        }

        let side = if self.old_size == 0 {
            assoc
        } else if pos == self.start {
            Assoc::Before
        } else if pos == end {
            Assoc::After
        } else {
            assoc
        };
        let mapped = match side {
            Assoc::Before => self.start,
            Assoc::After => self.start + self.new_size,
        };
        let deleted = self.old_size > 0
            && match assoc {
                Assoc::Before => pos != self.start,
                Assoc::After => pos != end,
            };
        MapResult {
            pos: mapped,
            deleted,
        }
    }
}

/// A sequence of step maps, applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    pub fn append(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn map(&self, pos: usize) -> usize {
        self.map_result(pos, Assoc::After).pos
    }

    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        self.maps.iter().fold(
            MapResult {
                pos,
                deleted: false,
            },
            |acc, map| {
                let next = map.map_result(acc.pos, assoc);
                MapResult {
                    pos: next.pos,
                    deleted: acc.deleted || next.deleted,
                }
            },
        )
    }
}

impl From<StepMap> for Mapping {
    fn from(map: StepMap) -> Self {
        Self { maps: vec![map] }
    }
}
