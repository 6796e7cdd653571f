//! Prints an argon2 PHC hash for provisioning a row in the `admin` table:
//!
//! ```text
//! hash-password 'correct horse battery staple'
//! INSERT INTO admin (username, password_hash) VALUES ('root', '<output>');
//! ```

use employee_directory::utils::password::hash_password;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(password) = env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        return ExitCode::from(2);
    };

    match hash_password(&password) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
