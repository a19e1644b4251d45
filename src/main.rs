mod discovery;
mod error;
mod job;
mod logging;
mod media;
mod merger;
mod parser;
mod serialiser;
mod srt;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser as ClapParser;
use log::debug;

use crate::media::MediaTools;

fn main() {
    logging::init();
    process::exit(run(std::env::args_os(), &media::Ffmpeg::default()));
}

/// Parses `args`, runs the merge and returns the process exit code.
fn run<I, T>(args: I, tools: &dyn MediaTools) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Help and version go to stdout and are not failures.
            return if err.use_stderr() { 1 } else { 0 };
        }
    };

    match merge(cli, tools) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            1
        }
    }
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Join numbered video parts and their SRT subtitles",
    after_help = "Example: partjoin 0005 ./recordings"
)]
struct Cli {
    #[arg(
        value_name = "IDENTIFIER",
        help = "Shared filename prefix of the parts, e.g. 0005 for 0005-1.mp4, 0005-2.mp4."
    )]
    identifier: String,
    #[arg(
        value_name = "DIR",
        help = "Directory holding the parts. The merged files are written here too.",
        default_value = "."
    )]
    directory: PathBuf,
}

fn merge(cli: Cli, tools: &dyn MediaTools) -> Result<()> {
    let config = job::MergeConfig {
        identifier: cli.identifier,
        directory: cli.directory,
    };
    let outcome = job::run(&config, tools)?;
    debug!(
        "Outputs: {}, {:?}",
        outcome.video.display(),
        outcome.subtitles
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fake::FakeTools;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn directory_defaults_to_current() {
        let cli = Cli::try_parse_from(&["partjoin", "0005"]).unwrap();
        assert_eq!(cli.identifier, "0005");
        assert_eq!(cli.directory, PathBuf::from("."));
    }

    #[test]
    fn identifier_is_required() {
        assert!(Cli::try_parse_from(&["partjoin"]).is_err());
    }

    #[test]
    fn missing_identifier_exits_with_one() {
        assert_eq!(run(&["partjoin"], &FakeTools::default()), 1);
    }

    #[test]
    fn help_exits_with_zero() {
        assert_eq!(run(&["partjoin", "--help"], &FakeTools::default()), 0);
    }

    #[test]
    fn no_parts_exits_with_one_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tools = FakeTools::default();

        let code = run(
            vec![
                OsString::from("partjoin"),
                OsString::from("0005"),
                dir.path().as_os_str().to_os_string(),
            ],
            &tools,
        );

        assert_eq!(code, 1);
        assert!(tools.concatenated.borrow().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn successful_merge_exits_with_zero() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0005-1.mp4"), b"").unwrap();
        let tools = FakeTools::default();

        let code = run(
            vec![
                OsString::from("partjoin"),
                OsString::from("0005"),
                dir.path().as_os_str().to_os_string(),
            ],
            &tools,
        );

        assert_eq!(code, 0);
        assert!(dir.path().join("0005.mp4").exists());
    }
}
