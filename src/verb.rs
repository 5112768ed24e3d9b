use clap::ValueEnum;
use std::fmt;

/// The four operations of the Docker credential helper protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verb {
    /// Save credentials read from stdin
    Store,
    /// Print the credentials of the server URL read from stdin
    Get,
    /// Remove the credentials of the server URL read from stdin
    Erase,
    /// Print every stored server URL with its username
    List,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Store => "store",
            Verb::Get => "get",
            Verb::Erase => "erase",
            Verb::List => "list",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
