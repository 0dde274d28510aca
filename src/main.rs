//! Nightgrove entry point
//!
//! Headless demo: builds a world and runs a short scripted walkthrough so the
//! simulation can be exercised without a VR host.

use glam::{Vec2, Vec3};

use nightgrove::consts::EYE_HEIGHT;
use nightgrove::sim::{FrameInput, WorldSimulation, tick};
use nightgrove::{WorldConfig, horizontal_forward};

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let config = WorldConfig::default();
    if let Ok(json) = serde_json::to_string(&config) {
        log::debug!("config: {json}");
    }
    let mut world = WorldSimulation::new(config);
    println!("spawn: {}", world.player.position);

    // Two seconds of walking straight ahead
    let walk = FrameInput {
        stick: Vec2::new(0.0, -1.0),
        ..FrameInput::default()
    };
    for _ in 0..120 {
        for event in tick(&mut world, &walk, DT) {
            log::info!("{event:?}");
        }
    }
    println!("after walking: {}", world.player.position);

    // Hold a teleport aim slightly below the current facing, then release
    let aim = FrameInput {
        teleport_held: true,
        aim_origin: world.player.position,
        aim_dir: horizontal_forward(0.0) + Vec3::new(0.0, -0.4, 0.0),
        ..FrameInput::default()
    };
    for _ in 0..30 {
        tick(&mut world, &aim, DT);
    }
    println!(
        "arc: {} samples, valid: {}",
        world.arc().samples().len(),
        world.arc().is_valid()
    );
    tick(&mut world, &FrameInput::default(), DT);
    println!("after teleport: {}", world.player.position);

    let ground = world
        .heightfield()
        .height_at(world.player.position.x, world.player.position.z);
    println!(
        "eye height above terrain: {:.3} (expected {EYE_HEIGHT})",
        world.player.position.y - ground
    );
    println!("pumpkins touched: {}", world.touched_count());
}
