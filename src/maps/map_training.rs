// Map 1: Training Ground
// Six groups laid out left to right, low platforms first. Two monsters share
// one start point so the bureaucrat patrol and the slow taxman overlap early.
use super::{BombSpawn, GROUND, MapDefinition, grouped_bombs};
use crate::entities::Platform;
use crate::monster::{MonsterSpawn, MonsterType};
use std::sync::OnceLock;

fn build_bombs() -> Vec<BombSpawn> {
    grouped_bombs(&[
        [(50.0, 520.0), (90.0, 520.0), (130.0, 520.0), (170.0, 520.0)],
        [(550.0, 520.0), (590.0, 520.0), (630.0, 520.0), (670.0, 520.0)],
        [(160.0, 420.0), (190.0, 420.0), (220.0, 420.0), (250.0, 420.0)],
        [(360.0, 320.0), (390.0, 320.0), (420.0, 320.0), (450.0, 320.0)],
        [(560.0, 220.0), (590.0, 220.0), (620.0, 220.0), (650.0, 220.0)],
        [(610.0, 120.0), (640.0, 120.0), (670.0, 120.0), (700.0, 120.0)],
    ])
}

pub fn training() -> &'static MapDefinition {
    static MAP: OnceLock<MapDefinition> = OnceLock::new();
    MAP.get_or_init(|| MapDefinition {
        id: "training".to_string(),
        name: "Training Ground".to_string(),
        width: 800.0,
        height: 600.0,
        player_start_x: 50.0,
        player_start_y: 450.0,
        platforms: vec![
            GROUND,
            Platform::new(150.0, 450.0, 120.0, 20.0),
            Platform::new(350.0, 350.0, 120.0, 20.0),
            Platform::new(550.0, 250.0, 120.0, 20.0),
            Platform::new(100.0, 300.0, 100.0, 20.0),
            Platform::new(600.0, 150.0, 100.0, 20.0),
        ],
        bombs: build_bombs(),
        monsters: vec![
            MonsterSpawn::new(500.0, 250.0, MonsterType::Taxman)
                .patrol(400.0, 600.0)
                .speed(0.01),
            MonsterSpawn::new(500.0, 250.0, MonsterType::Bureaucrat)
                .patrol(400.0, 600.0)
                .speed(1.5),
        ],
        background_color: "#1E293B".to_string(),
        group_sequence: vec![1, 2, 3, 4, 5, 6],
    })
}
