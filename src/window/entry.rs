use std::fmt;

use crate::components::VisualizationPane;

/// Stable identifier handed out by the window manager for every pane it owns.
///
/// Identifiers are never reused within one manager, so a stale id held by the
/// host simply stops matching anything once its pane is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(u64);

impl PaneId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// One owned pane together with its identifier.
pub struct PaneSlot {
    id: PaneId,
    pane: Box<dyn VisualizationPane>,
}

impl PaneSlot {
    pub(crate) fn new(id: PaneId, pane: Box<dyn VisualizationPane>) -> Self {
        Self { id, pane }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn pane(&self) -> &dyn VisualizationPane {
        self.pane.as_ref()
    }

    pub fn pane_mut(&mut self) -> &mut dyn VisualizationPane {
        self.pane.as_mut()
    }
}

impl fmt::Debug for PaneSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaneSlot")
            .field("id", &self.id)
            .field("title", &self.pane.title())
            .finish()
    }
}

/// Panes that share a single tiling cell, stacked vertically.
///
/// Members are `PaneSlot`s rather than `WindowEntry`s, so a group can never
/// contain another group.
#[derive(Debug, Default)]
pub struct WindowGroup {
    members: Vec<PaneSlot>,
}

impl WindowGroup {
    pub(crate) fn new(members: Vec<PaneSlot>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[PaneSlot] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A top-level node of the display tree.
#[derive(Debug)]
pub enum WindowEntry {
    Single(PaneSlot),
    Group(WindowGroup),
}

impl WindowEntry {
    /// Panes of this entry in display order.
    pub fn slots(&self) -> &[PaneSlot] {
        match self {
            WindowEntry::Single(slot) => std::slice::from_ref(slot),
            WindowEntry::Group(group) => &group.members,
        }
    }

    pub fn slots_mut(&mut self) -> &mut [PaneSlot] {
        match self {
            WindowEntry::Single(slot) => std::slice::from_mut(slot),
            WindowEntry::Group(group) => &mut group.members,
        }
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.slots().iter().any(|slot| slot.id == id)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, WindowEntry::Group(_))
    }

    /// Drop the member `id` from a group. Returns true if it was found.
    /// Single entries are removed by the owner of the entry list instead.
    pub(crate) fn remove_member(&mut self, id: PaneId) -> bool {
        let WindowEntry::Group(group) = self else {
            return false;
        };
        let before = group.members.len();
        group.members.retain(|slot| slot.id != id);
        group.members.len() != before
    }

    /// True once a group has lost all of its members.
    pub(crate) fn is_vacant(&self) -> bool {
        match self {
            WindowEntry::Single(_) => false,
            WindowEntry::Group(group) => group.is_empty(),
        }
    }
}
