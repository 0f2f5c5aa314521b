pub mod input;
pub mod repl;
pub mod run;
pub mod specials;

pub use run::run;
