// Map 3: Innovation Tower
// A stepped pyramid; the player starts in the middle of the floor.
use super::{BombSpawn, GROUND, MapDefinition, grouped_bombs};
use crate::entities::Platform;
use crate::monster::{MonsterSpawn, MonsterType};
use std::sync::OnceLock;

fn build_bombs() -> Vec<BombSpawn> {
    grouped_bombs(&[
        [(100.0, 520.0), (130.0, 520.0), (160.0, 520.0), (190.0, 520.0)],
        [(500.0, 520.0), (530.0, 520.0), (560.0, 520.0), (590.0, 520.0)],
        [(320.0, 450.0), (350.0, 450.0), (380.0, 450.0), (410.0, 450.0)],
        [(280.0, 390.0), (320.0, 390.0), (360.0, 390.0), (400.0, 390.0)],
        [(250.0, 330.0), (300.0, 330.0), (350.0, 330.0), (400.0, 330.0)],
        [(200.0, 270.0), (400.0, 270.0), (370.0, 90.0), (400.0, 90.0)],
    ])
}

pub fn tower() -> &'static MapDefinition {
    static MAP: OnceLock<MapDefinition> = OnceLock::new();
    MAP.get_or_init(|| MapDefinition {
        id: "tower".to_string(),
        name: "Innovation Tower".to_string(),
        width: 800.0,
        height: 600.0,
        player_start_x: 375.0,
        player_start_y: 520.0,
        platforms: vec![
            GROUND,
            Platform::new(300.0, 480.0, 200.0, 20.0),
            Platform::new(250.0, 420.0, 300.0, 20.0),
            Platform::new(200.0, 360.0, 400.0, 20.0),
            Platform::new(150.0, 300.0, 500.0, 20.0),
            Platform::new(100.0, 240.0, 600.0, 20.0),
            Platform::new(50.0, 180.0, 700.0, 20.0),
            Platform::new(350.0, 120.0, 100.0, 20.0),
        ],
        bombs: build_bombs(),
        monsters: vec![
            MonsterSpawn::new(150.0, 300.0, MonsterType::Bureaucrat)
                .patrol(150.0, 650.0)
                .speed(1.2),
        ],
        background_color: "#1F2937".to_string(),
        group_sequence: vec![1, 2, 3, 4, 5, 6],
    })
}
