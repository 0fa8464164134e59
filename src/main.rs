use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lattice_tui::event::{KEY, RENDER_TICK};
use lattice_tui::widget::{
    Chart, Checkbox, Dialog, Frame, Label, List, LogDisplay, ProgressBar, Select, TextInput,
    VStack,
};
use lattice_tui::{
    forward_to_widgets, ColorPair, Config, CrosstermTerminal, Event, Key, Node, Screen, Widget,
    WidgetId, WidgetTree,
};

#[derive(Parser, Debug)]
#[command(name = "lattice-demo")]
#[command(about = "Dashboard demo for the lattice-tui toolkit")]
#[command(version)]
struct Cli {
    /// Config file path (defaults to ~/.config/lattice-tui/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override the minimum time between frames
    #[arg(long)]
    frame_interval_ms: Option<u64>,

    /// Write logs to this file (the terminal is busy drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Flushes buffered log lines on drop
    let _log_guard = init_logging(cli.log_file.as_deref())?;

    let config_path = cli
        .config
        .unwrap_or_else(|| Config::default_path().display().to_string());
    let mut config = Config::load(&config_path).context("Failed to load config")?;
    if let Some(ms) = cli.frame_interval_ms {
        config.run_loop.frame_interval_ms = ms;
    }

    let mut screen = Screen::new(config);
    build_dashboard(&mut screen);

    let mut terminal = CrosstermTerminal::new().context("Failed to open terminal")?;
    screen.run(&mut terminal).context("Screen loop failed")?;
    Ok(())
}

/// Log to `path` through a background writer so file I/O stays off the loop
fn init_logging(path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lattice_tui=info,lattice_demo=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(Some(guard))
}

/// Ids of the widgets the handlers update
struct Dashboard {
    chart: WidgetId,
    progress: WidgetId,
    input: WidgetId,
    pause: WidgetId,
    log: WidgetId,
    focus_order: Vec<WidgetId>,
}

fn build_dashboard(screen: &mut Screen) {
    let capacity = screen.config().log_display.capacity;

    screen.add_widget(Label::new("lattice-tui demo", 1, 0).color(ColorPair::Accent));

    screen.add_widget(Frame::new("Load", 0, 1, 52, 10).color(ColorPair::Accent));
    let mut chart = Chart::new(1, 2, 50, 8).max_samples(200);
    chart.set_range(Some((0.0, 100.0)));
    chart.set_color("cpu", ColorPair::Accent);
    chart.set_color("mem", ColorPair::Warning);
    let chart = screen.add_widget(chart);

    screen.add_widget(Frame::new("Tasks", 53, 1, 27, 10));
    let mut tasks = List::new(["build", "test", "deploy", "rollback", "audit"], 54, 2, 25, 8)
        .on_select(|task, ctx| {
            let mut payload = Map::new();
            payload.insert("task".to_string(), Value::from(task));
            ctx.post(Event::custom_with("task_selected", payload));
        });
    tasks.set_focused(true);
    let tasks = screen.add_widget(tasks);

    let progress = screen.add_widget(ProgressBar::new(1, 11, 50));
    let speed = screen.add_widget(Select::new(["1x", "2x", "4x"], 54, 11, 20).on_change(
        |choice, ctx| {
            let mut payload = Map::new();
            payload.insert("speed".to_string(), Value::from(choice));
            ctx.post(Event::custom_with("speed_changed", payload));
        },
    ));
    let input = screen.add_widget(TextInput::new("", 1, 12, 50));
    let pause = screen.add_widget(
        Checkbox::new("Pause", 54, 12)
            .on_change(|paused, ctx| ctx.set_loading(paused.then(|| "Paused".to_string()))),
    );

    screen.add_widget(Frame::new("Log", 0, 13, 80, 8));
    let log = screen.add_widget(LogDisplay::new(1, 14, 78, 6).with_capacity(capacity));

    screen.add_widget(
        VStack::new(1, 21)
            .child(Label::new("Tab/Shift-Tab focus   Enter submit   Esc confirm quit", 0, 0))
            .child(Label::new("q quits immediately", 0, 0).color(ColorPair::Alert)),
    );

    let dashboard = Dashboard {
        chart,
        progress,
        input,
        pause,
        log,
        focus_order: vec![tasks, speed, input, pause, log],
    };
    register_handlers(screen, dashboard);
}

fn register_handlers(screen: &mut Screen, dashboard: Dashboard) {
    let Dashboard {
        chart,
        progress,
        input,
        pause,
        log,
        focus_order,
    } = dashboard;
    let dispatcher = screen.dispatcher_mut();

    let mut focused = 0;
    dispatcher.register_handler(KEY, move |event, widgets, ctx| {
        let Some(key) = event.as_key() else {
            return Ok(());
        };
        match key.code {
            Key::Tab | Key::BackTab => {
                let count = focus_order.len();
                if let Some(widget) = widgets.get_mut(focus_order[focused]) {
                    widget.set_focused(false);
                }
                focused = if key.code == Key::Tab {
                    (focused + 1) % count
                } else {
                    (focused + count - 1) % count
                };
                if let Some(widget) = widgets.get_mut(focus_order[focused]) {
                    widget.set_focused(true);
                }
            }
            Key::Esc => ctx.open_modal(
                Dialog::new("Quit", "Leave the demo?").on_yes(|ctx| ctx.exit()),
            ),
            _ if key.is_enter() && focus_order[focused] == input => {
                let command = match widgets.get_mut(input) {
                    Some(Node::TextInput(field)) => {
                        let command = field.text().trim().to_string();
                        field.set_text("");
                        command
                    }
                    _ => anyhow::bail!("command input {:?} is gone", input),
                };
                if !command.is_empty() {
                    tracing::info!(%command, "command submitted");
                    log_line(widgets, log, &format!("> {command}"))?;
                }
            }
            _ => {}
        }
        Ok(())
    });
    dispatcher.register_handler(KEY, forward_to_widgets);

    dispatcher.register_handler("task_selected", move |event, widgets, _| {
        let task = event.get("task").and_then(Value::as_str).unwrap_or("?");
        log_line(widgets, log, &format!("selected task: {task}"))
    });
    dispatcher.register_handler("speed_changed", move |event, widgets, _| {
        let speed = event.get("speed").and_then(Value::as_str).unwrap_or("?");
        log_line(widgets, log, &format!("speed set to {speed}"))
    });

    let mut tick: u64 = 0;
    dispatcher.register_handler(RENDER_TICK, move |_, widgets, ctx| {
        let paused = matches!(widgets.get(pause), Some(Node::Checkbox(c)) if c.is_checked());
        if paused {
            return Ok(());
        }
        tick += 1;
        let t = tick as f64 / 10.0;
        if let Some(Node::Chart(chart)) = widgets.get_mut(chart) {
            chart.push_sample("cpu", 50.0 + 40.0 * t.sin());
            chart.push_sample("mem", 35.0 + 15.0 * (t / 3.0).cos());
        }
        if let Some(Node::ProgressBar(bar)) = widgets.get_mut(progress) {
            bar.set_ratio((tick % 200) as f64 / 199.0);
        }
        if tick % 120 == 0 {
            log_line(widgets, log, &format!("frame {tick}"))?;
        }
        ctx.request_render();
        Ok(())
    });
}

fn log_line(widgets: &mut WidgetTree, id: WidgetId, line: &str) -> Result<()> {
    match widgets.get_mut(id) {
        Some(Node::LogDisplay(log)) => {
            log.push(line);
            Ok(())
        }
        _ => anyhow::bail!("log display {:?} is gone", id),
    }
}
