pub mod compare;
pub mod markov;
pub mod project;
