// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Drop test: a single ball falling onto the floor
//!
//! Prints the height of every bounce apex next to the ideal `e^(2n)` decay.
//!
//! ```text
//! cargo run --example drop_test -- --restitution 0.7 --integrator rk4
//! cargo run --example drop_test -- --config physics.json
//! ```

use rigid_sandbox::config::PhysicsConfig;
use rigid_sandbox::integration::{DragModel, IntegrationMethod};
use rigid_sandbox::simulation::Simulation;

struct DropConfig {
    physics: PhysicsConfig,
    duration: f64,
    height: f64,
    radius: f64,
}

impl Default for DropConfig {
    fn default() -> Self {
        DropConfig {
            physics: PhysicsConfig::default().with_drag(DragModel::None),
            duration: 5.0,
            height: 100.0,
            radius: 20.0,
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i + 1).map(|s| s.parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            eprintln!("Error: invalid value '{}' for {}", args[i + 1], flag);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: {} requires an argument", flag);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> DropConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DropConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path: String = parse_value(&args, i, "--config");
                let text = std::fs::read_to_string(&path).unwrap_or_else(|err| {
                    eprintln!("Error: cannot read {}: {}", path, err);
                    std::process::exit(1);
                });
                config.physics = serde_json::from_str(&text).unwrap_or_else(|err| {
                    eprintln!("Error: cannot parse {}: {}", path, err);
                    std::process::exit(1);
                });
                i += 2;
            }
            "--restitution" => {
                let e = parse_value(&args, i, "--restitution");
                config.physics = config.physics.with_restitution(e);
                i += 2;
            }
            "--integrator" => {
                let name: String = parse_value(&args, i, "--integrator");
                let method = match name.as_str() {
                    "rk4" => IntegrationMethod::Rk4,
                    "euler" => IntegrationMethod::Euler,
                    other => {
                        eprintln!("Warning: unknown integrator '{}', using rk4", other);
                        IntegrationMethod::Rk4
                    }
                };
                config.physics = config.physics.with_method(method);
                i += 2;
            }
            "--timestep" => {
                let dt = parse_value(&args, i, "--timestep");
                config.physics = config.physics.with_fixed_step(dt);
                i += 2;
            }
            "--duration" => {
                config.duration = parse_value(&args, i, "--duration");
                i += 2;
            }
            "--height" => {
                config.height = parse_value(&args, i, "--height");
                i += 2;
            }
            "--print-config" => {
                match serde_json::to_string_pretty(&config.physics) {
                    Ok(json) => println!("{}", json),
                    Err(err) => eprintln!("Error: {}", err),
                }
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }
    config
}

fn main() {
    env_logger::init();

    println!("==========================================================");
    println!("       Drop Test");
    println!("==========================================================");
    println!();

    let config = parse_args();
    let mut sim = match Simulation::new(config.physics.clone()) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    let x = config.physics.arena.width * 0.5;
    let id = match sim.spawn_ball(x, config.height, 0.0, 0.0, config.radius) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let floor = config.physics.arena.height - config.radius;
    let drop_height = floor - config.height;
    let e = config.physics.restitution;
    let dt = config.physics.fixed_step;
    let steps = (config.duration / dt).round() as usize;

    println!("Integrator:  {}", config.physics.method.name());
    println!("Restitution: {}", e);
    println!("Timestep:    {} s", dt);
    println!("Drop height: {:.1} px", drop_height);
    println!();
    println!("{:>6} {:>10} {:>12} {:>12}", "bounce", "time (s)", "apex (px)", "ideal (px)");

    let mut bounces = 0;
    let mut previous_vy = 0.0;
    let mut apex = floor;
    for step in 0..steps {
        sim.step(dt);
        let Some(object) = sim.get(id) else { break };
        let (y, vy) = (object.position().y(), object.velocity().dy());
        apex = apex.min(y);

        // Rising to falling: an apex was just passed
        if previous_vy < 0.0 && vy >= 0.0 {
            bounces += 1;
            let ideal = drop_height * e.powi(2 * bounces);
            println!(
                "{:>6} {:>10.3} {:>12.2} {:>12.2}",
                bounces,
                (step + 1) as f64 * dt,
                floor - apex,
                ideal
            );
            apex = floor;
        }
        previous_vy = vy;
    }

    println!();
    println!("Final kinetic energy: {:.3}", sim.kinetic_energy());
}
