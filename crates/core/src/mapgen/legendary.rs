//! Legendary side rooms and the two-way portal linking them to a host floor.

use serde::{Deserialize, Serialize};

use crate::biome::LevelRange;
use crate::error::PortalError;
use crate::types::{FloorKind, Pos, TileKind};

use super::export::{PlacedFeatures, assemble_floor, build_gameplay_map, build_render_map};
use super::grid::TileGrid;
use super::model::{EncounterScript, FloorData, Jonction, MapMetadata, NpcPlacement, NpcRole};

pub const LEGENDARY_MAP_ID_BASE: u32 = 9500;
pub const LEGENDARY_ROOM_SIZE: usize = 10;

pub const RETURN_DOORWAY: Pos = Pos::new(8, 5);
pub const ROOM_ENTRY: Pos = Pos::new(7, 5);
pub const LEGENDARY_POS: Pos = Pos::new(3, 5);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendaryRoomRequest {
    pub floor_number: u32,
    pub legendary_id: u32,
    pub host_map_id: u32,
    /// Where the player reappears on the host floor when leaving the room.
    pub host_return_pos: Pos,
    /// Host-floor tile that leads into the room.
    pub portal_pos: Pos,
    pub already_encountered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendaryRoom {
    pub side_room: FloorData,
    /// Install on the host floor with `FloorData::install_portal`.
    pub host_portal: Jonction,
}

pub fn legendary_map_id(floor_number: u32) -> u32 {
    LEGENDARY_MAP_ID_BASE + floor_number
}

pub fn generate_legendary_room(request: &LegendaryRoomRequest) -> LegendaryRoom {
    let map_id = legendary_map_id(request.floor_number);

    let mut grid = TileGrid::bordered(
        LEGENDARY_ROOM_SIZE,
        LEGENDARY_ROOM_SIZE,
        FloorKind::LegendaryRoom.border_tile(),
        TileKind::Floor,
    );
    grid.set(RETURN_DOORWAY, TileKind::Doorway);

    let level = legendary_level(request.floor_number);
    let mut metadata = MapMetadata::new(
        map_id,
        format!("Legendary Chamber {}", request.floor_number),
        ROOM_ENTRY,
    );
    metadata.ambient_track = "legendary_chamber".to_string();
    metadata.level_range = LevelRange { min: level, max: level };
    metadata.jonctions.push(Jonction {
        source_tiles: vec![RETURN_DOORWAY],
        target_map_id: request.host_map_id,
        target_pos: request.host_return_pos,
    });
    if !request.already_encountered {
        metadata.npcs.push(NpcPlacement {
            name: format!("Legendary #{}", request.legendary_id),
            role: NpcRole::Legendary,
            pos: LEGENDARY_POS,
            encounter: Some(EncounterScript {
                species_id: request.legendary_id,
                level,
                one_time: true,
                replayable: false,
            }),
        });
    }

    // The doorway doubles as the room's exit anchor.
    let features = PlacedFeatures::anchors_only(ROOM_ENTRY, RETURN_DOORWAY);
    let side_room =
        assemble_floor(&grid, metadata, FloorKind::LegendaryRoom, request.floor_number, features);

    let host_portal = Jonction {
        source_tiles: vec![request.portal_pos],
        target_map_id: map_id,
        target_pos: ROOM_ENTRY,
    };

    LegendaryRoom { side_room, host_portal }
}

impl FloorData {
    /// Stamps a doorway under `portal`'s source tiles, wires the jonction, and
    /// rebuilds both exports. Only unoccupied interior open floor is accepted.
    pub fn install_portal(&mut self, portal: &Jonction) -> Result<(), PortalError> {
        let render = &self.render_map;
        let mut grid = TileGrid::from_tiles(render.width, render.height, render.tiles.clone())
            .ok_or(PortalError::MalformedGrid)?;
        if portal.source_tiles.is_empty() {
            return Err(PortalError::NoSourceTile);
        }

        for &pos in &portal.source_tiles {
            if !grid.is_interior(pos) {
                return Err(PortalError::OnBorder(pos));
            }
            let tile = grid.tile_at(pos);
            if tile != TileKind::Floor {
                return Err(PortalError::Blocked { pos, tile });
            }
            if self.is_occupied(pos) {
                return Err(PortalError::Occupied(pos));
            }
        }
        for &pos in &portal.source_tiles {
            grid.set(pos, TileKind::Doorway);
        }

        let mut metadata = self.render_map.metadata.clone();
        metadata.jonctions.push(portal.clone());
        self.render_map = build_render_map(&grid, &metadata);
        self.gameplay_map = build_gameplay_map(&grid, &metadata);
        Ok(())
    }

    fn is_occupied(&self, pos: Pos) -> bool {
        pos == self.player_start
            || pos == self.stairs
            || self.starter_item == Some(pos)
            || self.trainers.contains(&pos)
            || self.items.contains(&pos)
            || self.npcs().iter().any(|npc| npc.pos == pos)
    }
}

fn legendary_level(floor_number: u32) -> u8 {
    (40 + floor_number.saturating_mul(2)).min(100) as u8
}
