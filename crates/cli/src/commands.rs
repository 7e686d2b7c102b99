// CLI subcommands

pub mod send;
