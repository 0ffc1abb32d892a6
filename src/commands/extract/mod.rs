mod output;
mod run;
mod source;

pub use run::run;
