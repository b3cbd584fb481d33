//! The blue/orange portal pair.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PortalConfig;
use crate::portal::frame::{Portal, PortalColor};
use crate::types::Vec3;

/// Both portal slots. Teleporting is possible only while the pair is
/// linked, meaning both portals are active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalPair {
    pub blue: Portal,
    pub orange: Portal,
}

impl PortalPair {
    /// Two unplaced portals.
    pub fn new() -> Self {
        Self {
            blue: Portal::inactive(PortalColor::Blue),
            orange: Portal::inactive(PortalColor::Orange),
        }
    }

    /// Both portals active.
    pub fn linked(&self) -> bool {
        self.blue.is_active() && self.orange.is_active()
    }

    pub fn get(&self, color: PortalColor) -> &Portal {
        match color {
            PortalColor::Blue => &self.blue,
            PortalColor::Orange => &self.orange,
        }
    }

    pub fn get_mut(&mut self, color: PortalColor) -> &mut Portal {
        match color {
            PortalColor::Blue => &mut self.blue,
            PortalColor::Orange => &mut self.orange,
        }
    }

    /// The portal a body entering `source` comes out of.
    pub fn get_destination(&self, source: PortalColor) -> &Portal {
        self.get(source.opposite())
    }

    /// Place (or move) a portal with its current size.
    pub fn place(&mut self, color: PortalColor, position: Vec3, normal: Vec3) {
        let was_linked = self.linked();
        self.get_mut(color).place(position, normal);
        self.log_link_change(was_linked);
    }

    /// Place a portal sized by `config`.
    pub fn place_sized(
        &mut self,
        color: PortalColor,
        position: Vec3,
        normal: Vec3,
        config: &PortalConfig,
    ) {
        let was_linked = self.linked();
        let portal = self.get_mut(color);
        portal.resize(config.width, config.height);
        portal.place(position, normal);
        self.log_link_change(was_linked);
    }

    pub fn deactivate(&mut self, color: PortalColor) {
        let was_linked = self.linked();
        self.get_mut(color).deactivate();
        self.log_link_change(was_linked);
    }

    fn log_link_change(&self, was_linked: bool) {
        match (was_linked, self.linked()) {
            (false, true) => debug!("portals linked"),
            (true, false) => debug!("portals unlinked"),
            _ => {}
        }
    }
}

impl Default for PortalPair {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
