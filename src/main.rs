use std::time::Duration;
use std::{env, fs, io, process};

use jsonlens::app::{App, SAMPLE_DOCUMENT};
use jsonlens::terminal::{Terminal, TerminalEvent};
use jsonlens::ui::theme::{Theme, ThemeConfig};

struct Args {
    input: Option<String>,
    theme: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        input: None,
        theme: None,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--theme" => {
                let Some(path) = iter.next() else {
                    return Err("--theme requires a file path".to_string());
                };
                args.theme = Some(path);
            }
            "--help" | "-h" => {
                return Err("usage: jsonlens [FILE] [--theme THEME.json]".to_string());
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                if args.input.is_some() {
                    return Err("at most one input file".to_string());
                }
                args.input = Some(other.to_string());
            }
        }
    }
    Ok(args)
}

fn load_theme(path: Option<&str>) -> Result<Theme, String> {
    let Some(path) = path else {
        return Ok(Theme::default_theme());
    };
    let source =
        fs::read_to_string(path).map_err(|error| format!("cannot read {path}: {error}"))?;
    let config =
        ThemeConfig::from_json(source.as_str()).map_err(|error| format!("bad theme: {error}"))?;
    Ok(config.into_theme())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    let theme = match load_theme(args.theme.as_deref()) {
        Ok(theme) => theme,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    let mut app = App::new(theme);
    match args.input.as_deref() {
        Some(path) => match fs::read_to_string(path) {
            Ok(source) => app.load_source(source.as_str()),
            Err(error) => {
                eprintln!("cannot read {path}: {error}");
                process::exit(2);
            }
        },
        None => app.load_source(SAMPLE_DOCUMENT),
    }

    if let Err(error) = run(app) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn run(mut app: App) -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut app);
    terminal.exit()?;
    result
}

fn event_loop(terminal: &mut Terminal, app: &mut App) -> io::Result<()> {
    let size = terminal.size();
    app.on_resize(size.width, size.height);

    let mut render_requested = true;
    loop {
        if terminal.poll(Duration::from_millis(100))? {
            match terminal.read_event()? {
                TerminalEvent::Key(key) => {
                    app.on_key(key);
                    render_requested = true;
                }
                TerminalEvent::Resize { width, height } => {
                    app.on_resize(width, height);
                    render_requested = true;
                }
            }
        }

        if render_requested {
            let frame = app.render();
            terminal.draw(frame.as_slice())?;
            render_requested = false;
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
