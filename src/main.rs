mod cli;

use trimforge::config::{self, Config};
use trimforge::trim::{TrimJob, TrimOptions};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use trimforge_av::{segments_from_pairs, Placement, Verbosity};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trimforge=debug,trimforge_av=trace".to_string()
        } else {
            "trimforge=info,trimforge_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    if cli.check_tools {
        return check_tools(&config);
    }

    run_trim(cli, &config)
}

fn run_trim(cli: Cli, config: &Config) -> Result<()> {
    let input = cli.infile.context("An input file is required")?;
    let segments = segments_from_pairs(&cli.keep)?;

    let ffmpeg = if cli.dry_run {
        config.ffmpeg_path().unwrap_or_else(|e| {
            tracing::warn!("{:#}", e);
            trimforge_av::tools::FFMPEG.into()
        })
    } else {
        config.ffmpeg_path()?
    };
    tracing::debug!("Using ffmpeg at {:?}", ffmpeg);

    let options = TrimOptions {
        input,
        output: cli.out,
        segments,
        keep_backup: config.trim.keep_backup && !cli.no_save,
        cleanup: config.trim.cleanup && !cli.no_cleanup,
        workdir: cli.workdir.or_else(|| config.trim.workdir.clone()),
        force: cli.force,
        verbosity: if cli.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        },
    };

    let job = TrimJob::new(ffmpeg, options);

    if cli.dry_run {
        for line in job.dry_run()? {
            println!("{}", line);
        }
        println!("\n[DRY RUN] Would write {:?}", job.destination());
        return Ok(());
    }

    let report = job.run()?;

    let how = match (report.segments, report.placement) {
        (1, Placement::Moved) => "moved",
        (1, Placement::Copied) => "copied",
        (_, Placement::Moved) => "concatenated",
        (_, Placement::Copied) => "concatenated, copied",
    };
    println!(
        "Output: {} ({} segment(s), {})",
        report.output.display(),
        report.segments,
        how
    );
    if let Some(ref backup) = report.backup {
        println!("Original saved as: {}", backup.display());
    }
    if let Some(ref workdir) = report.workdir {
        println!("Intermediate files kept in: {}", workdir.display());
    }

    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    let configured = config.ffmpeg_path().ok();
    let ffmpeg = trimforge_av::check_ffmpeg(configured.as_deref());

    if !ffmpeg.available {
        println!("✗ {}", ffmpeg.name);
        anyhow::bail!("ffmpeg is missing; install it or set tools.ffmpeg_path");
    }

    print!("✓ {}", ffmpeg.name);
    if let Some(ref version) = ffmpeg.version {
        print!(" ({})", version);
    }
    if let Some(ref path) = ffmpeg.path {
        print!(" - {}", path.display());
    }
    println!();

    Ok(())
}
