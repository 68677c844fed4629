//! Utility functions for the store shell.

use base64::{engine::general_purpose::STANDARD, Engine};
use colored::*;
use rand::Rng;

/// Characters generated passwords are drawn from.
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()";

/// Length of generated passwords unless configured otherwise.
pub const DEFAULT_PASSWORD_LENGTH: usize = 14;

/// Generate a random password of `length` characters from
/// [`PASSWORD_ALPHABET`].
pub fn generate_password<R: Rng>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}

/// Render obscured secret bytes printable for listings.
pub fn encode_secret(secret: &[u8]) -> String {
    STANDARD.encode(secret)
}

/// Print an error message and exit.
pub fn error_exit(message: &str, code: i32) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(code);
}

/// Print a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning message.
pub fn warning(message: &str) {
    println!("{} {}", "Warning:".yellow(), message);
}

/// Clear the terminal screen.
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    use std::io::{self, Write};
    let _ = io::stdout().flush();
}
