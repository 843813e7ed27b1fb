//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Price and render nested orders, boxes and items, with delivery options
#[derive(Parser, Debug)]
#[command(name = "ordertree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the built-in sample orders and deliveries
    Demo {
        /// Which samples to show
        #[arg(value_enum, default_value_t = DemoKind::All)]
        kind: DemoKind,
    },

    /// Render an order document
    Render {
        /// Order document (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Draw a box-drawing tree instead of indented lines
        #[arg(long)]
        tree: bool,
    },

    /// Price an order document including delivery
    Quote {
        /// Order document (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    Orders,
    Delivery,
    All,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_verbose_flag_when_parsing_then_counts() {
        let cli = Cli::try_parse_from(["ordertree", "-vv", "demo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Demo {
                kind: DemoKind::All
            }
        ));
    }

    #[test]
    fn given_render_with_tree_flag_when_parsing_then_flag_set() {
        let cli = Cli::try_parse_from(["ordertree", "render", "order.toml", "--tree"]).unwrap();
        match cli.command {
            Commands::Render { file, tree } => {
                assert_eq!(file, PathBuf::from("order.toml"));
                assert!(tree);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_unknown_demo_kind_when_parsing_then_error() {
        assert!(Cli::try_parse_from(["ordertree", "demo", "flyweight"]).is_err());
    }
}
