use std::error::Error;
use std::io::{self, BufRead, Write};

/**
 * Execution mode chosen for a run.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    ///Both peers as threads of this process.
    Threads,
    ///Each peer as a separate OS process.
    Processes,
}

/**
 * Parameters collected by the interactive setup.
 */
#[derive(Debug, Clone)]
pub struct ExchangeSetup {
    ///Seed message the initiator will send.
    pub seed_message: String,

    ///Number of exchange rounds after which each peer stops.
    pub stop_condition: usize,

    ///Chosen execution mode.
    pub mode: LaunchMode,
}

/**
 * Prompts on stdin for the seed message, the stop condition and the
 * execution mode. Invalid input is rejected with an explanation rather
 * than reprompted.
 */
pub fn prompt() -> Result<ExchangeSetup, Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("\nWrite the message you want to send from the initiator:");
    let seed_message = read_line(&mut lines)?;

    if seed_message.trim().is_empty() {
        return Err("message cannot be empty".into());
    }

    print!("Enter stop condition (number of exchanges): ");
    io::stdout().flush()?;
    let stop_input = read_line(&mut lines)?;

    let stop_condition: usize = stop_input
        .trim()
        .parse()
        .map_err(|_| "stop condition must be a number")?;

    if stop_condition < 1 {
        return Err("stop condition must be at least 1".into());
    }

    println!("\nSelect execution mode:");
    println!("1. Same process (different threads)");
    println!("2. Separate processes");
    print!("Enter your choice (1 or 2): ");
    io::stdout().flush()?;
    let mode_input = read_line(&mut lines)?;

    let mode = match mode_input.trim() {
        "1" => LaunchMode::Threads,
        "2" => LaunchMode::Processes,
        other => return Err(format!("invalid option: {}", other).into()),
    };

    Ok(ExchangeSetup {
        seed_message,
        stop_condition,
        mode,
    })
}

/**
 * Reads one line from stdin.
 */
fn read_line(lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<String, Box<dyn Error>> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err("unexpected end of input".into()),
    }
}
