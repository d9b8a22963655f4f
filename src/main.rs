// exprtty: step-through arithmetic expression parsing with a tree dump or TUI playback

use std::io;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use exprtty::parser::lexer::Lexer;
use exprtty::parser::parser::Parser;
use exprtty::parser::render::render_tree;
use exprtty::trace::Session;
use exprtty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("exprtty");

    let mut tui = false;
    let mut tokens_only = false;
    let mut expression: Option<&str> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--tui" => tui = true,
            "--tokens" => tokens_only = true,
            _ if expression.is_none() => expression = Some(arg.as_str()),
            _ => {
                eprintln!("Error: more than one expression given");
                usage(program_name);
                process::exit(1);
            }
        }
    }

    let Some(expression) = expression else {
        eprintln!("Error: no expression provided");
        usage(program_name);
        process::exit(1);
    };

    if tui {
        return run_tui(expression);
    }

    let stream = match Lexer::new(expression).tokenize() {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if tokens_only {
        for (i, token) in stream.tokens().iter().enumerate() {
            println!("[{}] {:?} \"{}\"", i, token.kind, token.text);
        }
        return Ok(());
    }

    match Parser::new(stream).parse_program() {
        Ok(tree) => print!("{}", render_tree(&tree)),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    Ok(())
}

fn usage(program_name: &str) {
    eprintln!();
    eprintln!("Usage: {} [--tui | --tokens] \"<expression>\"", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} \"1 + 2 - 3\"          # print the parse tree", program_name);
    eprintln!("  {} --tokens \"1 + 2\"     # print the token table", program_name);
    eprintln!("  {} --tui \"1 + 2 - 3\"    # step through scan and parse", program_name);
}

/// Record a session and play it back in the TUI.
///
/// A failed scan or parse still enters the TUI with the partial history;
/// the process exits non-zero afterwards so scripts see the failure.
fn run_tui(expression: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (session, result) = Session::record(expression);
    let error = result.as_ref().err().map(|e| e.to_string());

    if session.is_empty() {
        // Nothing was recorded before the failure; report and bail.
        if let Err(e) = result {
            eprintln!("{}", e);
            process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let failed = error.is_some();
    let mut app = App::new(session, expression.to_string(), error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if failed {
        process::exit(1);
    }

    Ok(())
}
