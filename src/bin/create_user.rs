use std::{error::Error, io, process::exit};

use bcrypt::DEFAULT_COST;
use clap::Parser;
use rusqlite::Connection;

use finance_tracker::{PasswordHash, ValidatedPassword, create_user, initialize_db};

/// A utility for registering a user who can log in to the finance tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. It is created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The name the user logs in with.
    #[arg(long)]
    username: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.username.trim().is_empty() {
        print_error("The username cannot be empty.");
        exit(1);
    }

    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    println!("Creating user {}", args.username);

    let Some(password_hash) = get_new_password_hash(&args.username) else {
        return Ok(());
    };

    match create_user(&args.username, password_hash, &conn) {
        Ok(user) => {
            println!("Created user {} with ID {}", user.username, user.id);
            Ok(())
        }
        Err(error) => {
            print_error(&error);
            exit(1);
        }
    }
}

fn get_new_password_hash(username: &str) -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = prompt_password("Enter a password: ")?;

        let validated_password = match ValidatedPassword::new(&first_password, username) {
            Ok(password) => password,
            Err(error) => {
                print_error(error);
                continue;
            }
        };

        let second_password = prompt_password("Enter the same password again: ")?;

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        match PasswordHash::new(validated_password, DEFAULT_COST) {
            Ok(password_hash) => return Some(password_hash),
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
                continue;
            }
        }
    }
}

/// Read a password from the terminal, or `None` if there is nothing left to read.
fn prompt_password(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
