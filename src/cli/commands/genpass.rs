//! `skita genpass` — generate a random passphrase.

use crate::cli::output;
use crate::errors::Result;
use crate::passphrase;

/// Execute the `genpass` command.
pub fn execute(words: usize) -> Result<()> {
    let phrase = passphrase::generate(words);
    let strength = passphrase::score(&phrase);

    println!("{phrase}");
    output::tip(&format!("strength: {}", strength.label()));

    Ok(())
}
