//! Clickable regions recorded while rendering
//!
//! The renderer registers where each card, input, button and result pane
//! landed on screen; mouse clicks are resolved against the latest frame.

/// What a click can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Anywhere on a method card
    Method(usize),
    Input { method: usize, arg: usize },
    Invoke(usize),
    Lucky(usize),
    Result(usize),
}

impl HitTarget {
    pub fn method(&self) -> usize {
        match *self {
            HitTarget::Method(m)
            | HitTarget::Input { method: m, .. }
            | HitTarget::Invoke(m)
            | HitTarget::Lucky(m)
            | HitTarget::Result(m) => m,
        }
    }
}

/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub target: HitTarget,
}

impl HitRegion {
    fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Regions of the last rendered frame
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<HitRegion>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, x: u16, y: u16, width: u16, height: u16, target: HitTarget) {
        if width > 0 && height > 0 {
            self.regions.push(HitRegion {
                x,
                y,
                width,
                height,
                target,
            });
        }
    }

    /// The innermost target under a cell; later regions win
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.contains(column, row))
            .map(|r| r.target)
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }
}
