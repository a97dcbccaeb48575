use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use indoc::formatdoc;
use ratatui::layout::Rect;

use nui_desktop::apps::builtin_registry;
use nui_desktop::config::WmConfig;
use nui_desktop::host::HostMessage;
use nui_desktop::preview::Preview;
use nui_desktop::{Desktop, WindowPatch};

#[derive(Parser, Debug)]
#[command(
    name = "wm-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Churn benchmark for the desktop window manager"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Render a preview frame every N operations (0 disables rendering).
    #[arg(short = 'r', long = "render-every", value_name = "N", default_value_t = 64)]
    render_every: u64,
}

struct BenchConfig {
    duration: Duration,
    render_every: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            render_every: cli.render_every,
        })
    }
}

#[derive(Debug, Default)]
struct BenchStats {
    ops: u64,
    frames: u64,
    render_time: Duration,
    elapsed: Duration,
    max_windows: usize,
}

impl BenchStats {
    fn final_report(&self) -> String {
        let secs = self.elapsed.as_secs_f64().max(f64::EPSILON);
        let avg_frame_us = if self.frames == 0 {
            0.0
        } else {
            self.render_time.as_secs_f64() * 1e6 / self.frames as f64
        };
        formatdoc! {"
            wm-bench results
              elapsed:       {elapsed:.2}s
              operations:    {ops} ({ops_per_sec:.0}/s)
              frames:        {frames} (avg {avg_frame_us:.1}us)
              peak windows:  {peak}
            ",
            elapsed = secs,
            ops = self.ops,
            ops_per_sec = self.ops as f64 / secs,
            frames = self.frames,
            peak = self.max_windows,
        }
    }
}

/// Xorshift64 sequence; each value picks the app and the operation of one step.
struct Churn(u64);

impl Churn {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config)?;
    println!("{}", stats.final_report());
    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> io::Result<BenchStats> {
    let registry = builtin_registry().map_err(io::Error::other)?;
    let ids: Vec<String> = registry.iter().map(|app| app.id().to_string()).collect();
    let mut desktop = Desktop::new(registry, WmConfig::default());
    desktop.handle_host_message(&HostMessage::ShowDesktop);

    let preview = Preview::default();
    let area = Rect {
        x: 0,
        y: 0,
        width: 200,
        height: 60,
    };
    let mut stats = BenchStats::default();
    let mut churn = Churn(0x9E37_79B9_7F4A_7C15);
    let start = Instant::now();

    while start.elapsed() < config.duration {
        let roll = churn.next();
        let id = &ids[(roll % ids.len() as u64) as usize];
        match (roll >> 8) % 6 {
            0 | 1 => {
                desktop.launch(id).map_err(io::Error::other)?;
            }
            2 => {
                desktop.windows_mut().focus_window(id);
            }
            3 => {
                desktop.windows_mut().minimize_window(id);
            }
            4 => {
                let x = ((roll >> 16) % 1600) as i32 - 200;
                let y = ((roll >> 32) % 900) as i32 - 100;
                desktop
                    .windows_mut()
                    .update_window(id, WindowPatch::new().position(x, y));
            }
            _ => {
                desktop.windows_mut().close_window(id);
            }
        }
        stats.ops += 1;
        stats.max_windows = stats.max_windows.max(desktop.windows().len());

        if config.render_every > 0 && stats.ops % config.render_every == 0 {
            let frame_start = Instant::now();
            let _ = preview.render(&desktop, None, area);
            stats.render_time += frame_start.elapsed();
            stats.frames += 1;
        }
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}
