//! docargs-git - a git-like command line derived from two documented methods.

use docargs::config::Config;
use docargs::logging;
use docargs::{Callable, CommandSet, Program, Result, Value};
use tracing::{error, info};

/// The demo object: each public method becomes a subcommand.
struct GitClone;

impl GitClone {
    fn clone_repo(src: &str, dest: Option<&str>) -> String {
        match dest {
            Some(dest) => format!("Cloning {src} into {dest}"),
            None => format!("Cloning {src}"),
        }
    }

    fn commit(all: bool, message: Option<&str>, amend: bool) -> String {
        let mut out = format!("Committing {}", message.unwrap_or("None"));
        if all {
            out.push_str(" (all tracked files)");
        }
        if amend {
            out.push_str(" (amending previous commit)");
        }
        out
    }
}

impl CommandSet for GitClone {
    fn doc(&self) -> Option<&str> {
        Some("A git clone")
    }

    fn members(&self) -> Result<Vec<Callable>> {
        let clone = Callable::declare("clone(self, src, _dest)", |args| {
            let src = args.str("src").unwrap_or_default();
            Ok(Value::from(Self::clone_repo(src, args.str("_dest"))))
        })
        .map(|c| {
            c.doc(
                "Clone a repository
                 :param src: The source repository to clone from
                 :param _dest: The directory to check the source code to",
            )
        });

        let commit = Callable::declare("commit(self, a=False, m=None, amend=False)", |args| {
            Ok(Value::from(Self::commit(
                args.flag("a"),
                args.str("m"),
                args.flag("amend"),
            )))
        })
        .map(|c| {
            c.doc(
                "Commit a change to the index
                 :param a: Add all tracked files to the index
                 :param m: Supply the commit message on the command line
                 :param amend: Amend the previous commit",
            )
        });

        let gc = Callable::declare("_gc(self)", |_| Ok(Value::None));

        [clone, commit, gc].into_iter().collect()
    }
}

fn main() {
    logging::init_stderr_logging();

    if let Err(e) = run() {
        error!("{}: {}", e.category(), e);
        eprintln!("docargs-git: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let config_path = Config::resolve_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let mut options = config.options();
    if options.prog_name.is_none() {
        options.prog_name = Some("docargs-git".to_string());
    }

    let program = Program::registry(&GitClone, options)?;

    match program.invoke() {
        Some(Value::None) => {}
        Some(value) => println!("{value}"),
        None => info!("auto dispatch disabled; nothing to do"),
    }

    Ok(())
}
