use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ratatui::layout::Rect;

use nui_desktop::apps::builtin_registry;
use nui_desktop::config::{PreviewConfig, WmConfig};
use nui_desktop::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, PREVIEW_CELL_HEIGHT_PX, PREVIEW_CELL_WIDTH_PX,
};
use nui_desktop::preview::Preview;
use nui_desktop::runner::{ErrorPolicy, Session};
use nui_desktop::{Desktop, tracing_sub};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

#[derive(Parser, Debug)]
#[command(
    name = "nui-desktop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drive the in-game desktop window manager from text commands"
)]
struct Cli {
    /// Read commands from a file instead of stdin. Stops at the first error.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Redraw the desktop after every command that changes it.
    #[arg(short = 'p', long = "preview")]
    preview: bool,

    /// Preview width in columns. Defaults to the terminal width.
    #[arg(long = "cols", value_name = "N")]
    cols: Option<u16>,

    /// Preview height in rows. Defaults to the terminal height.
    #[arg(long = "rows", value_name = "N")]
    rows: Option<u16>,

    /// Width of windows whose app declares none.
    #[arg(long = "default-width", value_name = "PX", default_value_t = DEFAULT_WINDOW_WIDTH)]
    default_width: u32,

    /// Height of windows whose app declares none.
    #[arg(long = "default-height", value_name = "PX", default_value_t = DEFAULT_WINDOW_HEIGHT)]
    default_height: u32,

    /// Surface pixels per preview column.
    #[arg(long = "cell-width", value_name = "PX", default_value_t = PREVIEW_CELL_WIDTH_PX)]
    cell_width: u32,

    /// Surface pixels per preview row.
    #[arg(long = "cell-height", value_name = "PX", default_value_t = PREVIEW_CELL_HEIGHT_PX)]
    cell_height: u32,

    /// Log more (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn preview_area(&self) -> Rect {
        let (term_cols, term_rows) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
        Rect {
            x: 0,
            y: 0,
            width: self.cols.unwrap_or(term_cols),
            height: self.rows.unwrap_or(term_rows),
        }
    }

    fn wm_config(&self) -> WmConfig {
        WmConfig::default().with_default_size(self.default_width, self.default_height)
    }

    fn preview_config(&self) -> PreviewConfig {
        PreviewConfig::with_cell_size(self.cell_width, self.cell_height)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_sub::init(tracing_sub::level_for_verbosity(cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "desktop session failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> nui_desktop::Result<()> {
    let desktop = Desktop::new(builtin_registry()?, cli.wm_config());
    let preview = Preview::new(cli.preview_config());
    let mut session =
        Session::new(desktop, preview, cli.preview_area()).with_auto_preview(cli.preview);

    let mut stdout = io::stdout().lock();
    match &cli.script {
        Some(path) => {
            let file = BufReader::new(File::open(path)?);
            session.run(file, &mut stdout, ErrorPolicy::Abort)
        }
        None => session.run(io::stdin().lock(), &mut stdout, ErrorPolicy::Report),
    }
}
