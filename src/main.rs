use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use taskview::config::Config;
use taskview::models::{parse_due, Task};
use taskview::tui::widgets::TaskForm;
use taskview::tui::{render, Popup, Screen, Theme, ViewMode};
use taskview::{logging, Result, ViewError};

const DEFAULT_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    List,
    Timeline,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::List => ViewMode::List,
            ViewArg::Timeline => ViewMode::Timeline,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PopupArg {
    Help,
    New,
    Edit,
    Delete,
}

#[derive(Parser)]
#[command(
    name = "tv",
    version = env!("CARGO_PKG_VERSION"),
    about = "Render one frame of the task view for a JSON task file"
)]
struct Cli {
    /// JSON array of tasks; `-` reads stdin
    file: Option<PathBuf>,

    /// Panel shown on the left (defaults to the configured view)
    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Frame width (defaults to the terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Frame height (defaults to the terminal height)
    #[arg(long)]
    height: Option<u16>,

    /// Selected task, counted in the order the view shows them
    #[arg(long, value_name = "N")]
    select: Option<usize>,

    /// Reference time as "YYYY-MM-DD HH:MM" (defaults to now)
    #[arg(long, value_name = "DATETIME")]
    now: Option<String>,

    /// Open a popup over the panels
    #[arg(long, value_enum)]
    popup: Option<PopupArg>,

    /// Config file (defaults to ~/.taskview.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render without colors or text attributes
    #[arg(long)]
    no_color: bool,
}

fn load_tasks(path: Option<&Path>) -> Result<Vec<Task>> {
    let content = match path {
        None => return Ok(Vec::new()),
        Some(p) if p == Path::new("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(p) => fs::read_to_string(p)?,
    };
    let tasks: Vec<Task> = serde_json::from_str(&content)?;
    tracing::debug!(count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

fn run(cli: Cli) -> Result<String> {
    let config = Config::load_or_default(cli.config.as_deref());
    let theme = if cli.no_color {
        Theme::plain()
    } else {
        Theme::from(&config.theme.resolve())
    };

    let now = match cli.now.as_deref() {
        Some(text) => {
            parse_due(text)?.ok_or_else(|| ViewError::InvalidDate(text.to_string()))?
        }
        None => chrono::Local::now().naive_local(),
    };

    let (term_width, term_height) = crossterm::terminal::size().unwrap_or(DEFAULT_SIZE);
    let width = cli.width.unwrap_or(term_width);
    let height = cli.height.unwrap_or(term_height);

    let tasks = load_tasks(cli.file.as_deref())?;
    let view = cli.view.map(ViewMode::from).unwrap_or(config.default_view);
    let mut screen = Screen::new(&tasks, now, width, height)
        .view(view)
        .selected(cli.select);

    let selected = screen.selected_task(&config);
    let popup = match (cli.popup, selected) {
        (None, _) => None,
        (Some(PopupArg::Help), _) => Some(Popup::Help),
        (Some(PopupArg::New), _) => Some(Popup::Form(TaskForm::new())),
        (Some(PopupArg::Edit), Some(task)) => Some(Popup::Form(TaskForm::edit(task))),
        (Some(PopupArg::Delete), Some(task)) => Some(Popup::ConfirmDelete {
            id: task.id,
            title: task.title.clone(),
        }),
        (Some(popup), None) => {
            tracing::warn!(?popup, "popup needs a selected task, use --select");
            None
        }
    };
    screen = screen.popup(popup);

    Ok(render(&screen, &theme, &config))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("{} {}", "✖".red(), e);
    }

    match run(cli) {
        Ok(frame) => println!("{}", frame),
        Err(e) => {
            eprintln!("{} {}", "✖".red(), e);
            process::exit(1);
        }
    }
}
