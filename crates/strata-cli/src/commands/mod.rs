pub mod rewrite;
pub mod schemas;
pub mod upgrade;
