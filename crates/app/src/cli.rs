//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Clearsight accessibility toolkit
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: clearsight.toml in the data directory)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the data directory holding settings and high scores
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the CSS filter for a color-vision type
    #[command(visible_alias = "f")]
    Filter {
        /// protanopia, deuteranopia, tritanopia, achromatopsia or none
        kind: String,

        /// Use the correction table instead of the simulation table
        #[arg(short, long)]
        correction: bool,
    },

    /// Render text with bionic emphasis as HTML
    #[command(visible_alias = "b")]
    Bionic {
        /// Input file; reads stdin when omitted
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the CSS for the stored dyslexia settings
    #[command(visible_alias = "d")]
    Dyslexia,

    /// Show or change persisted settings
    #[command(visible_alias = "s")]
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// List the accepted color-vision, font and background keys
    #[command(visible_alias = "o")]
    Options,

    /// List high scores
    Scores,

    /// Play a vision exercise, reading `x y` clicks from stdin
    #[command(visible_alias = "p")]
    Play {
        /// color-match, focus-tracker, peripheral-vision or saccade-jump
        exercise: String,

        /// Session length; defaults to the exercise's own duration
        #[arg(short, long)]
        seconds: Option<u32>,
    },
}

/// `settings` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Print the stored settings as JSON
    Show,

    /// Select a color-vision type
    Vision {
        /// protanopia, deuteranopia, tritanopia, achromatopsia or none
        kind: String,

        /// Use the correction table instead of the simulation table
        #[arg(short, long)]
        correction: bool,
    },

    /// Change dyslexia presentation settings
    Dyslexia(DyslexiaArgs),
}

/// Dyslexia settings changes. Omitted options keep their stored value.
#[derive(Args, Debug, Clone, Default)]
pub struct DyslexiaArgs {
    /// Turn dyslexia mode on
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Turn dyslexia mode off
    #[arg(long)]
    pub disable: bool,

    /// Font family key (opendyslexic, lexend, atkinson, comic-sans, arial, verdana)
    #[arg(long)]
    pub font: Option<String>,

    /// Background key (white, cream, light-blue, light-green, light-yellow, light-gray, peach)
    #[arg(long)]
    pub background: Option<String>,

    /// Font size in pixels
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Line height multiplier
    #[arg(long)]
    pub line_spacing: Option<f32>,

    /// Bionic reading emphasis
    #[arg(long)]
    pub bionic: Option<bool>,

    /// Pointer-following reading ruler
    #[arg(long)]
    pub ruler: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_settings_flags() {
        let cli = Cli::parse_from([
            "clearsight",
            "settings",
            "dyslexia",
            "--enable",
            "--font",
            "lexend",
            "--bionic",
            "true",
        ]);

        let Commands::Settings {
            action: SettingsCommand::Dyslexia(args),
        } = cli.command
        else {
            unreachable!("parsed into the wrong command");
        };
        assert!(args.enable);
        assert_eq!(args.font.as_deref(), Some("lexend"));
        assert_eq!(args.bionic, Some(true));
        assert_eq!(args.ruler, None);
    }

    #[test]
    fn test_enable_and_disable_conflict() {
        let result = Cli::try_parse_from(["clearsight", "settings", "dyslexia", "--enable", "--disable"]);
        assert!(result.is_err());
    }
}
