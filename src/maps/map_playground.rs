// Sandbox map. No declared sequence (groups are taken in ascending order),
// seven groups, and the engine keeps ticking regardless of status.
use super::{BombSpawn, GROUND, MapDefinition};
use crate::entities::Platform;
use crate::monster::{MonsterSpawn, MonsterType};
use std::sync::OnceLock;

fn build_bombs() -> Vec<BombSpawn> {
    // (group, first order, positions)
    let runs: [(u32, u32, &[(f64, f64)]); 7] = [
        (1, 1, &[(400.0, 160.0), (460.0, 160.0), (510.0, 160.0), (570.0, 160.0)]),
        (2, 5, &[(770.0, 200.0), (770.0, 260.0), (770.0, 310.0), (770.0, 370.0)]),
        (3, 9, &[(10.0, 200.0), (10.0, 260.0), (10.0, 310.0), (10.0, 370.0)]),
        (4, 13, &[(100.0, 20.0), (160.0, 20.0), (220.0, 20.0)]),
        (5, 16, &[(610.0, 420.0), (550.0, 420.0), (490.0, 420.0)]),
        (6, 19, &[(220.0, 500.0), (160.0, 500.0), (100.0, 500.0)]),
        (7, 22, &[(760.0, 20.0), (710.0, 20.0), (660.0, 20.0)]),
    ];
    let mut out = Vec::with_capacity(24);
    for (group, first, spots) in runs {
        for (i, &(x, y)) in spots.iter().enumerate() {
            out.push(BombSpawn::new(x, y, first + i as u32, group));
        }
    }
    out
}

pub fn playground() -> &'static MapDefinition {
    static MAP: OnceLock<MapDefinition> = OnceLock::new();
    MAP.get_or_init(|| MapDefinition {
        id: "playground".to_string(),
        name: "Playground".to_string(),
        width: 800.0,
        height: 600.0,
        player_start_x: 375.0,
        player_start_y: 300.0,
        platforms: vec![
            GROUND,
            Platform::new(110.0, 130.0, 200.0, 20.0),
            Platform::new(430.0, 130.0, 200.0, 20.0),
            Platform::new(360.0, 350.0, 200.0, 20.0),
            Platform::new(80.0, 400.0, 200.0, 20.0),
            Platform::new(490.0, 450.0, 200.0, 20.0),
        ],
        bombs: build_bombs(),
        monsters: vec![
            MonsterSpawn::new(490.0, 420.0, MonsterType::BureaucratClone)
                .patrol(490.0, 690.0)
                .speed(1.5),
        ],
        background_color: "#0F172A".to_string(),
        group_sequence: Vec::new(),
    })
}
