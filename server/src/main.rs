//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! RuneMUD server binary.

use clap::Parser;
use runemud_server::{MudServer, ServerConfig};
use runemud_world::{Direction, MobBehavior, World};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "runemud", about = "A tick-scheduled TELNET MUD server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// Maximum simultaneous players.
    #[arg(long, default_value_t = 100)]
    max_players: usize,

    /// Maximum pending inputs per player.
    #[arg(long, default_value_t = 20)]
    max_input_queue: usize,

    /// Tick length in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_millis: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let config = ServerConfig::new(args.bind)
        .with_max_players(args.max_players)
        .with_max_player_input_queue(args.max_input_queue)
        .with_tick(Duration::from_millis(args.tick_millis));

    let server = MudServer::bind(config, bootstrap_world()).await?;
    server.run().await;
    Ok(())
}

/// A small starting area until world loading exists: three rooms, a mob
/// with an ambient behavior, and something to look at.
fn bootstrap_world() -> World {
    let mut world = World::new();

    let clearing = world.add_room(
        "The Clearing",
        "Sunlight falls through the canopy onto trampled grass.",
    );
    let cave = world.add_room("A Damp Cave", "Water drips somewhere in the dark.");
    let ledge = world.add_room(
        "A Narrow Ledge",
        "The forest spreads out far below you.",
    );

    world
        .connect_duplex(clearing, cave, Direction::North)
        .expect("fresh rooms connect");
    world
        .connect_duplex(clearing, ledge, Direction::Up)
        .expect("fresh rooms connect");

    let wolf = world.add_mob(
        "wolf",
        "Lean and grey, it watches you without blinking.",
        "A grey wolf paces the edge of the clearing.",
    );
    world.relocate_mob(wolf, clearing).expect("clearing exists");
    if let Some(wolf) = world.mob_mut(wolf) {
        wolf.behaviors.push(MobBehavior::new(
            "sniffing",
            Some("at the air"),
            Duration::from_secs(30),
            0.25,
        ));
        wolf.behaviors.push(MobBehavior::new(
            "growls",
            None,
            Duration::from_secs(45),
            0.1,
        ));
    }

    let coin = world.add_object(
        "coin",
        "A dull copper coin, stamped with a face nobody remembers.",
        "A copper coin glints in the grass.",
    );
    world.relocate_object(coin, clearing).expect("clearing exists");

    world.set_start_room(clearing).expect("clearing exists");
    world
}
