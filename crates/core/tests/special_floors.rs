use floorgen::mapgen::{FloorData, Jonction, NpcRole};
use floorgen::{
    BiomeConfig, FloorKind, LegendaryRoomRequest, Pos, PortalError, TileKind, audit_floor,
    generate_boss_floor, generate_floor, generate_legendary_room, generate_rest_floor,
};

fn border_tiles(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (0..height).flat_map(move |y| {
        (0..width)
            .filter(move |&x| x == 0 || y == 0 || x + 1 == width || y + 1 == height)
            .map(move |x| Pos::new(y as i32, x as i32))
    })
}

/// Open floor one step from the start that no placement uses.
fn portal_site(floor: &FloorData) -> Pos {
    let taken = |pos: Pos| {
        pos == floor.stairs
            || floor.trainers.contains(&pos)
            || floor.items.contains(&pos)
            || floor.starter_item == Some(pos)
    };
    (1..floor.height() as i32 - 1)
        .flat_map(|y| (1..floor.width() as i32 - 1).map(move |x| Pos::new(y, x)))
        .filter(|&pos| pos != floor.player_start)
        .filter(|&pos| floor.tile_at(pos) == TileKind::Floor && !taken(pos))
        .min_by_key(|pos| pos.manhattan(floor.player_start))
        .expect("procedural floors keep spare open floor")
}

#[test]
fn test_procedural_floor_metadata() {
    let floor = generate_floor("metadata", 7, &BiomeConfig::default());
    assert_eq!(floor.map_id(), 1007);
    assert_eq!(floor.name(), "Floor 7");
    assert_eq!(floor.floor_number, 7);
    assert_eq!(floor.render_map.metadata, floor.gameplay_map.metadata);
    assert_eq!(floor.render_map.metadata.ambient_track, "cavern_ambience");
    assert_eq!(floor.render_map.metadata.monster_ids, BiomeConfig::default().monster_ids);
}

#[test]
fn test_rest_floor_shape_and_npcs() {
    let floor = generate_rest_floor(7, "rest-run");

    assert_eq!(floor.map_id(), 1007);
    assert_eq!((floor.width(), floor.height()), (10, 10));
    for pos in border_tiles(10, 10) {
        assert_eq!(floor.tile_at(pos), TileKind::Wall, "{pos:?}");
    }
    let roles: Vec<NpcRole> = floor.npcs().iter().map(|npc| npc.role).collect();
    assert_eq!(roles, vec![NpcRole::Healer, NpcRole::Merchant]);
    assert!(floor.render_map.battle_tiles.is_empty());
    assert!(floor.trainers.is_empty());
    assert!(audit_floor(&floor, None).is_empty());
}

#[test]
fn test_boss_floor_shape_and_trainer() {
    let floor = generate_boss_floor(12, "boss-run");

    assert_eq!(floor.kind, FloorKind::Boss);
    assert_eq!(floor.map_id(), 1012);
    assert_eq!((floor.width(), floor.height()), (15, 15));
    for pos in border_tiles(15, 15) {
        assert_eq!(floor.tile_at(pos), TileKind::BossGate, "{pos:?}");
    }
    assert_eq!(floor.trainers, vec![Pos::new(7, 7)]);
    assert_eq!(floor.npcs().len(), 1);
    assert_eq!(floor.npcs()[0].pos, Pos::new(7, 7));
    assert_eq!(floor.gameplay_map.collision.len(), 4 * 14);
    assert!(audit_floor(&floor, None).is_empty());
}

#[test]
fn test_legendary_room_portal_is_bidirectional() {
    let biome = BiomeConfig::default();
    let mut host = generate_floor("legend-run", 8, &biome);
    let request = LegendaryRoomRequest {
        floor_number: 8,
        legendary_id: 249,
        host_map_id: host.map_id(),
        host_return_pos: host.player_start,
        portal_pos: portal_site(&host),
        already_encountered: false,
    };
    let room = generate_legendary_room(&request);
    host.install_portal(&room.host_portal).expect("portal site is open floor");

    let side = &room.side_room;
    assert_eq!(side.map_id(), 9508);
    assert_eq!((side.width(), side.height()), (10, 10));
    assert_eq!(room.host_portal, Jonction {
        source_tiles: vec![request.portal_pos],
        target_map_id: 9508,
        target_pos: side.player_start,
    });

    let back = &side.jonctions()[0];
    assert_eq!(back.target_map_id, 1008);
    assert_eq!(back.target_pos, host.player_start);
    assert_eq!(side.tile_at(back.source_tiles[0]), TileKind::Doorway);
    assert!(host.jonctions().contains(&room.host_portal));
    assert_eq!(host.tile_at(request.portal_pos), TileKind::Doorway);
    assert_eq!(host.render_map.metadata, host.gameplay_map.metadata);
    assert!(audit_floor(side, None).is_empty());
    assert!(audit_floor(&host, Some(&biome)).is_empty());
}

#[test]
fn test_host_portal_is_refused_on_walls() {
    let mut host = generate_floor("legend-run", 8, &BiomeConfig::default());
    let wall = (1..host.height() as i32 - 1)
        .flat_map(|y| (1..host.width() as i32 - 1).map(move |x| Pos::new(y, x)))
        .find(|&pos| host.tile_at(pos) == TileKind::Wall)
        .expect("caves keep interior walls");
    let request = LegendaryRoomRequest {
        floor_number: 8,
        legendary_id: 249,
        host_map_id: host.map_id(),
        host_return_pos: host.player_start,
        portal_pos: wall,
        already_encountered: false,
    };
    let room = generate_legendary_room(&request);

    assert_eq!(
        host.install_portal(&room.host_portal),
        Err(PortalError::Blocked { pos: wall, tile: TileKind::Wall })
    );
    assert_eq!(host.tile_at(wall), TileKind::Wall);
    assert!(host.jonctions().is_empty());
}
