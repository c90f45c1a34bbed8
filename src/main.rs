use std::ops::ControlFlow;
use std::path::Path;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};

use lsw::config;
use lsw::config::types::{Preset, Settings};
use lsw::player::Player;
use lsw::reference;
use lsw::render;
use lsw::scanner::{StepOutcome, WindowScanner};
use lsw::trace;

#[derive(Parser)]
#[command(
    name = "lsw",
    about = "Longest substring without repeats, one window step at a time"
)]
struct Cli {
    /// Show how long the scan took
    #[arg(long, global = true)]
    timing: bool,

    /// Show preset and settings resolution details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Text to scan: a literal argument or a named preset.
#[derive(Args)]
struct InputArgs {
    /// Text to scan (pass "" for an empty input)
    input: Option<String>,

    /// Scan a preset instead (e.g. "classic/pwwkew")
    #[arg(long, conflicts_with = "input")]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scan to completion and print the best window
    Scan {
        #[command(flatten)]
        source: InputArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every frame of the scan
    Step {
        #[command(flatten)]
        source: InputArgs,
        /// Print the whole trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Auto-play the scan with a fixed delay between steps
    Play {
        #[command(flatten)]
        source: InputArgs,
        /// Delay between steps (defaults to `delay_ms` from config.toml)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Stop after this many steps
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Cross-check the scanner against the brute-force reference
    Verify {
        #[command(flatten)]
        source: InputArgs,
    },
    /// List available presets
    Ls,
    /// Show the TOML source of a preset
    Show {
        /// Preset name (e.g. "classic/abcabcbb")
        preset: String,
    },
    /// Validate a preset TOML file
    Check {
        /// Path to the preset file
        preset_path: String,
    },
    /// Show the resolved settings
    Config,
}

/// Resolve the text to scan. Returns the preset too when one was named.
fn resolve_input(source: &InputArgs, verbose: bool) -> anyhow::Result<(String, Option<Preset>)> {
    if let Some(name) = &source.preset {
        let search_dirs = config::default_search_dirs();
        let resolved = config::find_preset(&search_dirs, name)?
            .ok_or_else(|| anyhow::anyhow!("preset not found: {name}"))?;
        if verbose {
            eprintln!(
                "[lsw] preset {} [{}] from {}",
                resolved.name(),
                resolved.priority_label(),
                resolved.source_path.display()
            );
        }
        return Ok((resolved.preset.input.clone(), Some(resolved.preset)));
    }

    source
        .input
        .clone()
        .map(|text| (text, None))
        .ok_or_else(|| anyhow::anyhow!("no input: pass text or --preset <name>"))
}

fn resolve_settings(verbose: bool) -> anyhow::Result<Settings> {
    let (settings, source) = config::load_settings(&config::default_search_dirs())?;
    if verbose {
        match source {
            Some(path) => eprintln!("[lsw] settings from {}", path.display()),
            None => eprintln!("[lsw] no config.toml found, using defaults"),
        }
    }
    Ok(settings)
}

fn report_timing(cli: &Cli, start: Instant) {
    if cli.timing {
        let elapsed = start.elapsed();
        eprintln!("[lsw] scan took {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    }
}

fn cmd_scan(source: &InputArgs, json: bool, cli: &Cli) -> anyhow::Result<i32> {
    let (text, _) = resolve_input(source, cli.verbose)?;

    let start = Instant::now();
    let summary = trace::summarize(&text);
    report_timing(cli, start);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}  \"{}\"", summary.best_length, summary.best_window);
    }
    Ok(0)
}

fn print_frame(scanner: &WindowScanner<char>, show_seen: bool) {
    println!("{}", render::frame_line(scanner));
    if show_seen {
        println!("           seen: {}", render::seen_map(scanner));
    }
}

fn cmd_step(source: &InputArgs, json: bool, cli: &Cli) -> anyhow::Result<i32> {
    let (text, _) = resolve_input(source, cli.verbose)?;

    if json {
        let start = Instant::now();
        let recorded = trace::record(&text);
        report_timing(cli, start);
        println!("{}", serde_json::to_string_pretty(&recorded)?);
        return Ok(0);
    }

    let settings = resolve_settings(cli.verbose)?;
    let start = Instant::now();
    let mut scanner = WindowScanner::from_text(&text);
    print_frame(&scanner, settings.show_seen);
    while scanner.step() == StepOutcome::Advanced {
        print_frame(&scanner, settings.show_seen);
    }
    report_timing(cli, start);

    println!(
        "best: {}  \"{}\"",
        scanner.best_length(),
        scanner.best_window().iter().collect::<String>()
    );
    Ok(0)
}

fn cmd_play(
    source: &InputArgs,
    delay_ms: Option<u64>,
    max_steps: Option<usize>,
    cli: &Cli,
) -> anyhow::Result<i32> {
    let (text, _) = resolve_input(source, cli.verbose)?;
    let settings = resolve_settings(cli.verbose)?;

    let delay = Duration::from_millis(delay_ms.unwrap_or(settings.delay_ms));
    let player = Player::new(delay).with_max_steps(max_steps.or(settings.max_steps));
    if cli.verbose {
        eprintln!(
            "[lsw] playing {} symbols, delay {}ms",
            text.chars().count(),
            delay.as_millis()
        );
    }

    let mut scanner = WindowScanner::from_text(&text);
    print_frame(&scanner, settings.show_seen);
    let taken = player.play(&mut scanner, |s| {
        print_frame(s, settings.show_seen);
        ControlFlow::Continue(())
    });

    if scanner.is_finished() {
        println!("best: {}", scanner.best_length());
    } else {
        println!(
            "stopped after {taken} steps, best so far: {}",
            scanner.best_length()
        );
    }
    Ok(0)
}

fn cmd_verify(source: &InputArgs, cli: &Cli) -> anyhow::Result<i32> {
    let (text, preset) = resolve_input(source, cli.verbose)?;

    let start = Instant::now();
    let mut scanner = WindowScanner::from_text(&text);
    let scanned = scanner.run_to_completion();
    report_timing(cli, start);

    let symbols: Vec<char> = text.chars().collect();
    let brute = reference::longest_unique_len(&symbols);

    let mut ok = scanned == brute;
    if !ok {
        eprintln!("[lsw] mismatch: scanner={scanned} reference={brute}");
    }
    if let Some(expected) = preset.and_then(|p| p.expected)
        && scanned != expected
    {
        eprintln!("[lsw] mismatch: scanner={scanned} expected={expected}");
        ok = false;
    }

    if ok {
        println!("ok: {scanned}");
        Ok(0)
    } else {
        Ok(1)
    }
}

fn cmd_ls(verbose: bool) -> i32 {
    let search_dirs = config::default_search_dirs();
    let Ok(presets) = config::discover_all_presets(&search_dirs) else {
        eprintln!("[lsw] error: failed to discover presets");
        return 1;
    };

    for resolved in &presets {
        println!("{}  \u{2192}  \"{}\"", resolved.name(), resolved.preset.input);

        if verbose {
            eprintln!(
                "[lsw]   source: {}  [{}]",
                resolved.source_path.display(),
                resolved.priority_label()
            );
            if let Some(description) = &resolved.preset.description {
                eprintln!("[lsw]     {description}");
            }
        }
    }

    0
}

fn cmd_show(name: &str) -> i32 {
    let search_dirs = config::default_search_dirs();
    let resolved = match config::find_preset(&search_dirs, name) {
        Ok(Some(r)) => r,
        Ok(None) => {
            eprintln!("[lsw] preset not found: {name}");
            return 1;
        }
        Err(e) => {
            eprintln!("[lsw] error: {e:#}");
            return 1;
        }
    };

    match config::preset_source(&resolved) {
        Ok(content) => {
            print!("{content}");
            0
        }
        Err(e) => {
            eprintln!("[lsw] error: {e:#}");
            1
        }
    }
}

fn cmd_check(preset_path: &Path) -> i32 {
    match config::try_load_preset(preset_path) {
        Ok(Some(preset)) => {
            let found = WindowScanner::from_text(&preset.input).run_to_completion();
            match preset.expected {
                Some(expected) if expected != found => {
                    eprintln!(
                        "[lsw] {}: expected = {expected}, but the scan finds {found}",
                        preset_path.display()
                    );
                    1
                }
                _ => {
                    eprintln!(
                        "[lsw] {} is valid (input: \"{}\")",
                        preset_path.display(),
                        preset.input
                    );
                    0
                }
            }
        }
        Ok(None) => {
            eprintln!("[lsw] file not found: {}", preset_path.display());
            1
        }
        Err(e) => {
            eprintln!("[lsw] error: {e:#}");
            1
        }
    }
}

fn cmd_config(verbose: bool) -> anyhow::Result<i32> {
    let search_dirs = config::default_search_dirs();
    if verbose {
        for dir in &search_dirs {
            eprintln!("[lsw] search dir: {}", dir.display());
        }
    }
    let (settings, source) = config::load_settings(&search_dirs)?;
    match source {
        Some(path) => println!("# from {}", path.display()),
        None => println!("# defaults (no config.toml found)"),
    }
    print!("{}", toml::to_string(&settings)?);
    Ok(0)
}

fn report_error(e: &anyhow::Error) -> i32 {
    eprintln!("[lsw] error: {e:#}");
    1
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match &cli.command {
        Commands::Scan { source, json } => {
            cmd_scan(source, *json, &cli).unwrap_or_else(|e| report_error(&e))
        }
        Commands::Step { source, json } => {
            cmd_step(source, *json, &cli).unwrap_or_else(|e| report_error(&e))
        }
        Commands::Play {
            source,
            delay_ms,
            max_steps,
        } => cmd_play(source, *delay_ms, *max_steps, &cli).unwrap_or_else(|e| report_error(&e)),
        Commands::Verify { source } => {
            cmd_verify(source, &cli).unwrap_or_else(|e| report_error(&e))
        }
        Commands::Ls => cmd_ls(cli.verbose),
        Commands::Show { preset } => cmd_show(preset),
        Commands::Check { preset_path } => cmd_check(Path::new(preset_path)),
        Commands::Config => cmd_config(cli.verbose).unwrap_or_else(|e| report_error(&e)),
    };
    std::process::exit(exit_code);
}
