//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod genpass;
pub mod history;
pub mod inspect;
