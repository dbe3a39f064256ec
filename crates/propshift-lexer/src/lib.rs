//! propshift lexer
//!
//! Tokenizes the attribute list of a single JSX-style open tag into whitespace
//! runs, attributes and bare slashes, and provides the structural edits the
//! rewriter needs on that token list. Serializing an unedited token list
//! reproduces the input byte-for-byte.
//!
//! # Example
//!
//! ```
//! use propshift_lexer::{AttributeList, Attribute};
//!
//! let mut list = AttributeList::parse(r#" color="primary" onClick={save}"#);
//! let index = list.find("color").unwrap();
//! list.remove(index);
//! list.insert_at(index, vec![Attribute::literal("colorScheme", "brand")]);
//! assert_eq!(list.serialize(), r#" colorScheme="brand" onClick={save}"#);
//! ```

pub mod edit;
pub mod scanner;
pub mod token;

pub use edit::{serialize, AttributeList};
pub use scanner::Scanner;
pub use token::{AttrValue, Attribute, EqSpacing, Quote, Token, ValueKind};
