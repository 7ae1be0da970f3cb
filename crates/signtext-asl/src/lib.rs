//! Sign language module: the built-in gesture lexicon and a translator
//! handle over the generic transducer engine in `signtext-fst`.
//!
//! - [`lexicon`] -- the compiled-in gesture automaton (letters and words)
//! - [`translator`] -- [`Translator`], the session-owning integration point

pub mod lexicon;
pub mod translator;

pub use lexicon::{graph, lexicon};
pub use translator::Translator;
