use clap::Parser;
use std::path::PathBuf;
use trimforge_av::Timecode;

#[derive(Parser)]
#[command(name = "trimforge")]
#[command(
    author,
    version,
    about = "Trim a video to keep segments without re-encoding",
    after_help = "Times are H:M:S, M:S or plain seconds. An END of 0 keeps everything to the end of the file."
)]
pub struct Cli {
    /// Input video file
    #[arg(required_unless_present = "check_tools")]
    pub infile: Option<PathBuf>,

    /// Output file (replaces the input when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Do not keep the original as <name>.orig.<ext> when replacing the input
    #[arg(long)]
    pub no_save: bool,

    /// Keep the working directory and intermediate files
    #[arg(long)]
    pub no_cleanup: bool,

    /// Segment to keep, repeatable
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["START", "END"],
        required_unless_present = "check_tools"
    )]
    pub keep: Vec<Timecode>,

    /// Enable verbose logging and full ffmpeg output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to create the working directory in
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Print the ffmpeg commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Check that ffmpeg is available and exit
    #[arg(long)]
    pub check_tools: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keep_pairs() {
        let cli = Cli::try_parse_from([
            "trimforge", "in.mkv", "-k", "0:10", "1:00", "--keep", "2:00", "0",
        ])
        .unwrap();
        let secs: Vec<u64> = cli.keep.iter().map(|t| t.as_secs()).collect();
        assert_eq!(secs, vec![10, 60, 120, 0]);
        assert!(cli.out.is_none());
    }

    #[test]
    fn test_keep_needs_two_values() {
        assert!(Cli::try_parse_from(["trimforge", "in.mkv", "--keep", "10"]).is_err());
    }

    #[test]
    fn test_keep_rejects_bad_time() {
        assert!(Cli::try_parse_from(["trimforge", "in.mkv", "--keep", "1.5", "20"]).is_err());
    }

    #[test]
    fn test_keep_required() {
        assert!(Cli::try_parse_from(["trimforge", "in.mkv"]).is_err());
        assert!(Cli::try_parse_from(["trimforge", "--check-tools"]).is_ok());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "trimforge", "in.mkv", "-k", "0", "5", "-o", "out.mkv", "--no-save", "--no-cleanup",
            "-v", "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.out, Some(PathBuf::from("out.mkv")));
        assert!(cli.no_save && cli.no_cleanup && cli.verbose && cli.dry_run);
    }
}
