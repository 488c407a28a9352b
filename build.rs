// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: catalog path
fn db_path_arg() -> Arg {
    Arg::new("db_path")
        .required(true)
        .value_name("PATH")
        .help("Path to Manifest.db or the backup directory")
}

fn build_cli() -> Command {
    Command::new("manifestdb")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ManifestDB Project")
        .about("Browse and extract files from iOS device backups")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .global(true)
                .help("Log progress and decisions at info level"),
        )
        .subcommand(
            Command::new("domains")
                .about("List the domains of a backup")
                .arg(db_path_arg())
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .help("Show only the first domain containing this text"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List every record of a domain")
                .arg(db_path_arg())
                .arg(Arg::new("domain").required(true).help("Domain name")),
        )
        .subcommand(
            Command::new("info")
                .about("Show the decoded metadata of one record")
                .arg(db_path_arg())
                .arg(Arg::new("domain").required(true).help("Domain name"))
                .arg(Arg::new("row").required(true).help("Row number within the domain (starting at 1)")),
        )
        .subcommand(
            Command::new("copy")
                .about("Copy one file out of the backup into a folder")
                .arg(db_path_arg())
                .arg(Arg::new("file_id").required(true).help("File identifier of the record"))
                .arg(Arg::new("dir").required(true).help("Folder to copy into")),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract every file of a domain into an empty directory")
                .arg(db_path_arg())
                .arg(Arg::new("domain").required(true).help("Domain name"))
                .arg(Arg::new("dir").required(true).help("Destination directory (must be empty)"))
                .arg(
                    Arg::new("no_progress")
                        .long("no-progress")
                        .action(clap::ArgAction::SetTrue)
                        .help("Log progress instead of drawing a progress bar"),
                ),
        )
        .subcommand(
            Command::new("export-csv")
                .about("Export the whole catalog as CSV")
                .arg(db_path_arg())
                .arg(Arg::new("output").required(true).help("Output file or directory")),
        )
        .subcommand(
            Command::new("manifest")
                .about("Show Manifest.plist (applications and key bag elided)")
                .arg(db_path_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Show Status.plist")
                .arg(db_path_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("manifestdb.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
