use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::layout::Size;

use desk_wm::layout::snap::{ScreenSize, SnapPosition};
use desk_wm::taskbar::{self, NoBadges};
use desk_wm::window::{
    CommandOutcome, FloatRect, Point, WindowCommand, WindowConfig, WindowId, WindowRegistry,
};

const GROUPS: [&str; 4] = ["term", "editor", "browser", "files"];

#[derive(Parser, Debug)]
#[command(
    name = "desk-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drive a seeded random command stream through the window registry"
)]
struct BenchCli {
    /// Number of commands to apply.
    #[arg(short = 'n', long = "ops", value_name = "COUNT", default_value_t = 100_000)]
    ops: u64,

    /// Soft cap on live windows; creation is skipped above it.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 32)]
    windows: usize,

    /// PRNG seed. The same seed replays the same command stream.
    #[arg(short = 's', long = "seed", value_name = "SEED", default_value_t = 0x5EED)]
    seed: u64,
}

struct BenchConfig {
    ops: u64,
    max_windows: usize,
    seed: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if cli.ops == 0 {
            return Err("ops must be at least 1".to_string());
        }
        if !(1..=4096).contains(&cli.windows) {
            return Err("windows must be between 1 and 4096".to_string());
        }
        Ok(Self {
            ops: cli.ops,
            max_windows: cli.windows,
            seed: cli.seed,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config).map_err(io::Error::other)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

/// Linear congruential stream, same constants as a 64-bit PCG step.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0xA5A5_A5A5_1234_5678,
        }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 { 0 } else { self.next() % bound }
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + self.below((hi - lo).max(1) as u32) as i32
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            None
        } else {
            Some(items[self.below(items.len() as u32) as usize])
        }
    }
}

#[derive(Default)]
struct BenchStats {
    elapsed: Duration,
    commands: u64,
    applied: u64,
    ignored: u64,
    created: u64,
    screen_changes: u64,
    peak_windows: usize,
}

impl BenchStats {
    fn final_report(&self, config: &BenchConfig) -> String {
        let secs = self.elapsed.as_secs_f64();
        let per_second = if secs > 0.0 {
            self.commands as f64 / secs
        } else {
            0.0
        };
        indoc::formatdoc!(
            r#"
            Registry bench completed (seed {seed:#x}).
            Commands: {commands} in {secs:.3}s (~{per_second:.0}/s)
            Applied: {applied} | Ignored: {ignored} | Created: {created}
            Screen changes: {screens} | Peak windows: {peak} (cap {cap})
            All invariants held after every command.
            "#,
            seed = config.seed,
            commands = self.commands,
            secs = secs,
            per_second = per_second,
            applied = self.applied,
            ignored = self.ignored,
            created = self.created,
            screens = self.screen_changes,
            peak = self.peak_windows,
            cap = config.max_windows,
        )
    }
}

fn run_benchmark(config: &BenchConfig) -> Result<BenchStats, String> {
    let mut rng = Lcg::new(config.seed);
    let mut registry = WindowRegistry::with_screen(ScreenSize::new(1920, 1080));
    let mut stats = BenchStats::default();
    let start = Instant::now();

    for step in 0..config.ops {
        if rng.below(500) == 0 {
            let screen = ScreenSize::new(rng.range(640, 3840), rng.range(480, 2160));
            registry.set_screen_size(screen);
            stats.screen_changes += 1;
        } else {
            let command = next_command(&mut rng, &registry, config.max_windows);
            match registry.apply(command) {
                CommandOutcome::Created(_) => stats.created += 1,
                CommandOutcome::Applied => stats.applied += 1,
                CommandOutcome::Ignored => stats.ignored += 1,
            }
            stats.commands += 1;
        }
        stats.peak_windows = stats.peak_windows.max(registry.len());
        check_invariants(&registry).map_err(|err| format!("step {step}: {err}"))?;
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}

fn next_command(rng: &mut Lcg, registry: &WindowRegistry, max_windows: usize) -> WindowCommand {
    let ids: Vec<WindowId> = registry.iter().map(|w| w.id()).collect();
    let roll = rng.below(100);
    let Some(id) = rng.pick(&ids).filter(|_| roll >= 10 || ids.len() >= max_windows) else {
        return create_command(rng, registry.screen());
    };
    match roll {
        0..=19 => WindowCommand::Focus(id),
        20..=34 => WindowCommand::Move {
            id,
            position: Point::new(rng.range(-200, 2000), rng.range(-50, 1100)),
        },
        35..=44 => WindowCommand::Resize {
            id,
            size: Size::new(rng.range(0, 1600) as u16, rng.range(0, 1000) as u16),
        },
        45..=54 => WindowCommand::Minimize(id),
        55..=61 => WindowCommand::Maximize(id),
        62..=71 => WindowCommand::Restore(id),
        72..=83 => {
            let position = rng.pick(&SnapPosition::ALL).unwrap_or(SnapPosition::LeftHalf);
            WindowCommand::Snap { id, position }
        }
        84..=91 => WindowCommand::Close(id),
        92..=95 => WindowCommand::ToggleAlwaysOnTop(id),
        _ => WindowCommand::UpdateTitle {
            id,
            title: format!("window {}", rng.next()),
        },
    }
}

fn create_command(rng: &mut Lcg, screen: ScreenSize) -> WindowCommand {
    let geometry = FloatRect::new(
        rng.range(0, screen.width / 2),
        rng.range(0, screen.height / 2),
        rng.range(100, 900) as u16,
        rng.range(80, 700) as u16,
    );
    let mut window = WindowConfig::new(format!("bench {}", rng.next())).with_geometry(geometry);
    if let Some(group) = rng.pick(&GROUPS).filter(|_| rng.below(2) == 0) {
        window = window.with_group(group);
    }
    WindowCommand::Create(window)
}

fn check_invariants(registry: &WindowRegistry) -> Result<(), String> {
    let focused: Vec<&desk_wm::window::Window> =
        registry.iter().filter(|w| w.has_focus()).collect();
    if focused.len() > 1 {
        return Err(format!("{} windows hold focus", focused.len()));
    }
    if let Some(window) = focused.first() {
        if !window.is_focusable() {
            return Err(format!("{} holds focus while {}", window.id(), window.state().label()));
        }
        let top = registry.iter().map(|w| w.z_index()).max().unwrap_or(0);
        if window.z_index() != top {
            return Err(format!("focused {} is not on top", window.id()));
        }
    }

    let mut seen = HashSet::new();
    for window in registry.iter() {
        if !seen.insert(window.z_index()) {
            return Err(format!("duplicate z-index {}", window.z_index()));
        }
    }

    if registry.paint_order().iter().any(|w| w.is_minimized()) {
        return Err("minimized window in paint order".to_string());
    }

    let items = taskbar::project(registry, &NoBadges);
    let listed: usize = items.iter().map(|item| item.window_count).sum();
    let expected = registry
        .iter()
        .filter(|w| w.capabilities().show_in_taskbar)
        .count();
    if listed != expected {
        return Err(format!("taskbar lists {listed} of {expected} windows"));
    }
    Ok(())
}
