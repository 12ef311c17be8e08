use clap::Parser;
use miette::Result;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    ExampleHighlighter, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use revpol::render_error;
use revpol_core::{Evaluator, Program};
use std::io::BufRead;
use std::io::BufReader;
use thiserror::Error;

/// Revpol - a reverse-Polish-notation calculator
#[derive(Parser, Debug)]
#[command(name = "revpol")]
#[command(about = "Evaluate postfix expressions", long_about = None)]
struct Args {
    /// Print the token stream (for debugging)
    #[arg(long)]
    debug_tokens: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Debug, Error, miette::Diagnostic)]
enum CliError {
    #[error("failed to read line from stdin")]
    StdinRead(#[source] std::io::Error),

    #[error("line editor failure")]
    Readline(#[source] std::io::Error),
}

/// REPL commands, also fed to the completer.
const COMMANDS: &[&str] = &[":stack", ":status", ":clear", ":help", ":quit"];

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let commands: Vec<String> = COMMANDS.iter().map(|c| c.to_string()).collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&[':', '-', '_']);
        completions.insert(commands.clone());
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(ExampleHighlighter::new(commands)))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("rpn".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Parses and evaluates one line against the shared evaluator, printing
/// the resulting top of the stack or a rendered error.
fn interpret_line(evaluator: &mut Evaluator, input: &str, debug_tokens: bool) {
    if input.trim().is_empty() {
        return;
    }

    tracing::debug!(input, "evaluating line");

    let program = match Program::parse(input) {
        Ok(program) => program,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    if debug_tokens {
        println!("=== Tokens ===");
        println!("{:#?}", program);
        println!();
    }

    match program.eval_on(evaluator) {
        Ok(top) => println!("{}", top),
        Err(e) => render_error(&e),
    }
}

fn print_stack(evaluator: &Evaluator) {
    if evaluator.is_empty() {
        println!("(empty)");
        return;
    }
    let rendered: Vec<String> = evaluator.operands().iter().map(f64::to_string).collect();
    println!("[{}] <- top", rendered.join(" "));
}

/// Handles a REPL command line. Returns `false` when the REPL should
/// exit.
fn handle_command(evaluator: &mut Evaluator, line: &str) -> bool {
    match line {
        ":quit" | ":q" => return false,
        ":stack" => print_stack(evaluator),
        ":status" => println!("{}", evaluator.status()),
        ":clear" => {
            evaluator.clear();
            println!("stack cleared");
        }
        ":help" => {
            println!("Enter a postfix expression, e.g. `3 4 +`.");
            println!("The stack persists between lines.");
            println!("Commands: {}", COMMANDS.join(" "));
        }
        _ => println!("Unknown command: {} (try :help)", line),
    }
    true
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use REVPOL_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("REVPOL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .expect("default log filter is valid");

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Check if we have a direct expression argument
    if let Some(expr) = args.expression {
        return match Program::parse(&expr).and_then(|p| p.eval()) {
            Ok(value) => {
                println!("{}", value);
                Ok(())
            }
            Err(e) => {
                render_error(&e);
                std::process::exit(1);
            }
        };
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    let mut evaluator = Evaluator::new();

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline();

        println!("Revpol REPL - postfix calculator (Ctrl+D or Ctrl+C to exit, :help for help)");

        loop {
            let sig = line_editor
                .read_line(&prompt)
                .map_err(CliError::Readline)?;

            match sig {
                Signal::Success(buffer) => {
                    let line = buffer.trim();
                    if line.starts_with(':') {
                        if !handle_command(&mut evaluator, line) {
                            return Ok(());
                        }
                    } else {
                        interpret_line(&mut evaluator, line, args.debug_tokens);
                    }
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.map_err(CliError::StdinRead)?;
            interpret_line(&mut evaluator, &line, args.debug_tokens);
        }
    }

    Ok(())
}
