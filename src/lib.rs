pub mod token;
pub mod data;
pub mod error;
pub mod contractions;
pub mod scanner;
pub mod plural;
pub mod alignment;

pub use alignment::{AlignmentTable, ProbabilityMatrix};
pub use contractions::ContractionTable;
pub use error::{Error, Result};
pub use plural::{PluralAcceptor, State, accepts};
pub use scanner::{Scanner, scan, tokenize};
pub use token::{Token, TokenKind};
