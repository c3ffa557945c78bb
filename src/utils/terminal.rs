use crate::domain::ports::Ui;

/// Writes command output to the terminal. Progress and results go to
/// stdout, warnings to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl Ui for TerminalUi {
    fn say(&self, message: &str) {
        println!("{}", message);
    }

    fn ok(&self) {
        println!("OK");
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn failed(&self, message: &str) {
        println!("FAILED");
        println!("{}", message);
    }

    fn failed_with_usage(&self, command: &str, usage: &str) {
        println!("FAILED");
        println!("Incorrect Usage for {}.", command);
        println!();
        println!("USAGE:");
        println!("   {}", usage);
    }
}
