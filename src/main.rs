use std::process;

use h1b_counting::{application::the_app, events::ProcessEvent};

// input could not be opened or read, nothing was written
const EXIT_NO_INPUT: i32 = 2;

fn main() {
    match the_app() {
        Ok(ProcessEvent::ProcessComplete) => {}
        Ok(event) => {
            eprintln!("App failed during process: {event}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err:#}");
            match err.downcast_ref::<ProcessEvent>() {
                Some(ProcessEvent::InputOpen { .. } | ProcessEvent::InputRead(_)) => {
                    process::exit(EXIT_NO_INPUT)
                }
                _ => process::exit(1),
            }
        }
    }
}
