//! Public data models for generated floors and their two map exports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::biome::LevelRange;
use crate::types::{FloorKind, Pos, TileKind};

/// Map-transition trigger: stepping on any source tile moves the player to
/// `target_pos` on map `target_map_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jonction {
    pub source_tiles: Vec<Pos>,
    pub target_map_id: u32,
    pub target_pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcRole {
    Trainer,
    Healer,
    Merchant,
    Boss,
    Legendary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterScript {
    pub species_id: u32,
    pub level: u8,
    pub one_time: bool,
    pub replayable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcPlacement {
    pub name: String,
    pub role: NpcRole,
    pub pos: Pos,
    pub encounter: Option<EncounterScript>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub pos: Pos,
    pub starter: bool,
}

/// Everything both exports carry besides the tile data itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub map_id: u32,
    pub name: String,
    pub player_start: Pos,
    pub jonctions: Vec<Jonction>,
    pub npcs: Vec<NpcPlacement>,
    pub items: Vec<ItemPlacement>,
    pub monster_ids: Vec<u32>,
    pub level_range: LevelRange,
    pub ambient_track: String,
}

impl MapMetadata {
    pub fn new(map_id: u32, name: impl Into<String>, player_start: Pos) -> Self {
        Self {
            map_id,
            name: name.into(),
            player_start,
            jonctions: Vec::new(),
            npcs: Vec::new(),
            items: Vec::new(),
            monster_ids: Vec::new(),
            level_range: LevelRange { min: 0, max: 0 },
            ambient_track: String::new(),
        }
    }
}

/// Dense renderable map. `battle_tiles` holds flat `row * width + col` indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMap {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub battle_tiles: BTreeSet<usize>,
    pub metadata: MapMetadata,
}

impl RenderMap {
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }
}

/// Sparse gameplay map built from three independent index lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameplayMap {
    pub width: usize,
    pub height: usize,
    pub collision: Vec<usize>,
    pub hazards: Vec<usize>,
    pub encounters: Vec<usize>,
    pub metadata: MapMetadata,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorData {
    pub kind: FloorKind,
    pub floor_number: u32,
    pub render_map: RenderMap,
    pub gameplay_map: GameplayMap,
    pub player_start: Pos,
    pub stairs: Pos,
    pub starter_item: Option<Pos>,
    pub trainers: Vec<Pos>,
    pub items: Vec<Pos>,
    pub grass_patches: Vec<Vec<Pos>>,
}

impl FloorData {
    pub fn width(&self) -> usize {
        self.render_map.width
    }

    pub fn height(&self) -> usize {
        self.render_map.height
    }

    pub fn map_id(&self) -> u32 {
        self.render_map.metadata.map_id
    }

    pub fn name(&self) -> &str {
        &self.render_map.metadata.name
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.render_map.tile_at(pos)
    }

    pub fn npcs(&self) -> &[NpcPlacement] {
        &self.render_map.metadata.npcs
    }

    pub fn jonctions(&self) -> &[Jonction] {
        &self.render_map.metadata.jonctions
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.push(self.kind.code());
        bytes.extend(self.floor_number.to_le_bytes());
        bytes.extend(self.map_id().to_le_bytes());
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in &self.render_map.tiles {
            bytes.push(tile.code());
        }

        push_pos(&mut bytes, self.player_start);
        push_pos(&mut bytes, self.stairs);
        match self.starter_item {
            Some(pos) => {
                bytes.push(1);
                push_pos(&mut bytes, pos);
            }
            None => bytes.push(0),
        }
        push_positions(&mut bytes, &self.trainers);
        push_positions(&mut bytes, &self.items);

        bytes.extend((self.grass_patches.len() as u32).to_le_bytes());
        for patch in &self.grass_patches {
            push_positions(&mut bytes, patch);
        }

        bytes.extend((self.jonctions().len() as u32).to_le_bytes());
        for jonction in self.jonctions() {
            push_positions(&mut bytes, &jonction.source_tiles);
            bytes.extend(jonction.target_map_id.to_le_bytes());
            push_pos(&mut bytes, jonction.target_pos);
        }

        bytes.extend((self.npcs().len() as u32).to_le_bytes());
        for npc in self.npcs() {
            bytes.extend((npc.name.len() as u32).to_le_bytes());
            bytes.extend(npc.name.as_bytes());
            push_pos(&mut bytes, npc.pos);
        }

        bytes
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn push_positions(bytes: &mut Vec<u8>, positions: &[Pos]) {
    bytes.extend((positions.len() as u32).to_le_bytes());
    for &pos in positions {
        push_pos(bytes, pos);
    }
}
