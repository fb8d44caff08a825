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
//! Headless sandbox session
//!
//! Runs the simulation on its own thread while the main thread plays a
//! scripted sequence of input commands, then draws the scene as ASCII art.
//!
//! ```text
//! RUST_LOG=debug cargo run --example sandbox -- --seconds 3 --debug
//! ```

use rigid_sandbox::objects::{Aabb, Color};
use rigid_sandbox::render::{render_scene, RenderOptions, Renderer};
use rigid_sandbox::simulation::{
    SpawnGesture, DEFAULT_LAUNCH_SCALE, DEFAULT_MAX_LAUNCH_SPEED, DEFAULT_VELOCITY_MULTIPLIER,
};
use rigid_sandbox::{PhysicsConfig, Simulation, SimulationRunner};
use std::time::{Duration, Instant};

const COLUMNS: usize = 80;
const ROWS: usize = 30;

/// Character-cell canvas scaled from arena pixels
struct AsciiCanvas {
    cells: Vec<char>,
    scale_x: f64,
    scale_y: f64,
    labels: Vec<String>,
}

impl AsciiCanvas {
    fn new(width: f64, height: f64) -> Self {
        AsciiCanvas {
            cells: vec![' '; COLUMNS * ROWS],
            scale_x: COLUMNS as f64 / width,
            scale_y: ROWS as f64 / height,
            labels: Vec::new(),
        }
    }

    fn plot(&mut self, x: f64, y: f64, c: char) {
        let col = (x * self.scale_x).floor();
        let row = (y * self.scale_y).floor();
        if col >= 0.0 && row >= 0.0 && (col as usize) < COLUMNS && (row as usize) < ROWS {
            self.cells[row as usize * COLUMNS + col as usize] = c;
        }
    }

    fn print(&self) {
        println!("+{}+", "-".repeat(COLUMNS));
        for row in self.cells.chunks(COLUMNS) {
            println!("|{}|", row.iter().collect::<String>());
        }
        println!("+{}+", "-".repeat(COLUMNS));
        for label in &self.labels {
            println!("{}", label);
        }
    }
}

impl Renderer for AsciiCanvas {
    fn fill_circle(&mut self, x: f64, y: f64, _radius: f64, _color: Color) {
        self.plot(x, y, 'o');
    }

    fn fill_rect(&mut self, rect: &Aabb, _color: Color) {
        let step_x = 1.0 / self.scale_x;
        let step_y = 1.0 / self.scale_y;
        let mut y = rect.min_y;
        while y < rect.max_y {
            let mut x = rect.min_x;
            while x < rect.max_x {
                self.plot(x, y, '#');
                x += step_x;
            }
            y += step_y;
        }
    }

    fn stroke_rect(&mut self, rect: &Aabb, _color: Color) {
        self.plot(rect.min_x, rect.min_y, '+');
        self.plot(rect.max_x, rect.max_y, '+');
    }

    fn draw_text(&mut self, _x: f64, _y: f64, text: &str, _color: Color) {
        self.labels.push(text.to_string());
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut seconds = 2.0;
    let mut options = RenderOptions {
        show_velocity: true,
        debug: false,
        show_hud: true,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" => {
                if let Some(value) = args.get(i + 1).and_then(|s| s.parse::<f64>().ok()) {
                    seconds = value;
                } else {
                    eprintln!("Warning: --seconds needs a number, using {}", seconds);
                }
                i += 2;
            }
            "--debug" => {
                options.debug = true;
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }

    let config = PhysicsConfig::default();
    let (width, height) = (config.arena.width, config.arena.height);
    let sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    let mut runner = SimulationRunner::new(sim);

    // Scene: a shelf and a pillar, a few thrown balls, a default ball
    let setup = runner.command(|sim| -> rigid_sandbox::Result<()> {
        sim.spawn_gesture(SpawnGesture::boxed((150.0, 380.0), (450.0, 400.0)))?;
        sim.spawn_gesture(SpawnGesture::boxed((600.0, 300.0), (620.0, 600.0)))?;
        for k in 0..4 {
            let start = (100.0 + k as f64 * 60.0, 80.0);
            let end = (start.0 + 25.0, start.1 - 10.0);
            sim.spawn_gesture(SpawnGesture::ball(start, end, DEFAULT_VELOCITY_MULTIPLIER))?;
        }
        let first = sim.spawn_default_ball()?;
        sim.launch_towards(first, 700.0, 100.0, DEFAULT_LAUNCH_SCALE, DEFAULT_MAX_LAUNCH_SPEED)?;
        Ok(())
    });
    if let Err(err) = setup {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = runner.start() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    let started = Instant::now();
    let mut last_frame = started;
    let mut gravity_flipped = false;
    while started.elapsed().as_secs_f64() < seconds {
        let frame_delay = runner.command(|sim| {
            let now = Instant::now();
            sim.context_mut()
                .fps_mut()
                .record_frame(now.duration_since(last_frame).as_secs_f64());
            sim.context().frame_delay()
        });
        last_frame = Instant::now();

        // Halfway through, float the scene until the final frame
        if !gravity_flipped && started.elapsed().as_secs_f64() > seconds * 0.5 {
            runner.command(|sim| {
                sim.toggle_gravity();
                sim.toggle_target_fps();
            });
            gravity_flipped = true;
        }
        std::thread::sleep(frame_delay.max(Duration::from_millis(1)));
    }
    runner.command(|sim| sim.set_gravity(true));

    let mut canvas = AsciiCanvas::new(width, height);
    runner.with_scene(|sim| render_scene(sim, &mut canvas, options));

    if let Err(err) = runner.stop() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    canvas.print();
    let snapshot = runner.snapshot();
    println!(
        "Kinetic energy: {:.1}, momentum: ({:.1}, {:.1})",
        snapshot.kinetic_energy(),
        snapshot.momentum().0,
        snapshot.momentum().1
    );
}
