use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use folio::{check, contact, content, context::Context, render, report};
use log::debug;

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .args(&[
            Arg::new("root")
                .long("root")
                .global(true)
                .help("Content root. Defaults to $FOLIO_ROOT, then the current directory.")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("collection")
                .long("collection")
                .global(true)
                .help("Collection directory under the root, as a /-separated path")
                .default_value("content/certificates"),
        ])
        .subcommand(Command::new("list").about("Print the listed posts of the collection as JSON"))
        .subcommand(
            Command::new("show")
                .about("Print a single post")
                .arg(Arg::new("slug").required(true).help("Slug of the post"))
                .arg(
                    Arg::new("html")
                        .long("html")
                        .action(ArgAction::SetTrue)
                        .help("Print the body rendered as HTML"),
                ),
        )
        .subcommand(Command::new("check").about("Validate the front matter of every document"))
        .subcommand(
            Command::new("report")
                .about("Report file count, total size and large files")
                .arg(
                    Arg::new("dirs")
                        .num_args(0..)
                        .help("Directories to scan. Defaults to public and src under the root.")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .help("Size in bytes above which a file is listed")
                        .value_parser(value_parser!(u64))
                        .default_value("102400"),
                ),
        )
        .subcommand(
            Command::new("contact")
                .about("Validate a contact-form submission (JSON) from a file or stdin")
                .arg(Arg::new("file").value_parser(value_parser!(PathBuf))),
        )
}

fn context_from(matches: &ArgMatches) -> Context {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .or_else(|| std::env::var("FOLIO_ROOT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let collection = matches
        .get_one::<String>("collection")
        .map(String::as_str)
        .unwrap_or_default();

    Context::new(root, collection)
}

fn show(ctx: &Context, matches: &ArgMatches) -> anyhow::Result<()> {
    let slug = matches
        .get_one::<String>("slug")
        .context("slug is required")?;
    let posts = ctx.posts();
    let Some(post) = content::find_by_slug(&posts, slug) else {
        bail!("no post found for slug {slug:?}");
    };

    if matches.get_flag("html") {
        print!("{}", render::render_html(&post.content));
    } else {
        println!("{}", serde_json::to_string_pretty(post)?);
    }
    Ok(())
}

fn run_check(ctx: &Context) -> anyhow::Result<()> {
    let summary = check::check_directory(&ctx.collection_dir())?;

    for r in summary.reports.iter() {
        match &r.outcome {
            Ok(()) => println!("ok    {}", r.file_name),
            Err(finding) => println!("FAIL  {} - {finding}", r.file_name),
        }
    }
    println!("Results: {}/{} files are valid", summary.valid, summary.total);

    if !summary.all_valid() {
        println!("Quick fixes:");
        for fix in check::QUICK_FIXES {
            println!("  - {fix}");
        }
        bail!("{} file(s) failed validation", summary.total - summary.valid);
    }
    Ok(())
}

fn run_report(ctx: &Context, matches: &ArgMatches) -> anyhow::Result<()> {
    let dirs: Vec<PathBuf> = match matches.get_many::<PathBuf>("dirs") {
        Some(dirs) => dirs.cloned().collect(),
        None => vec![ctx.content_root.join("public"), ctx.content_root.join("src")],
    };
    let threshold = matches
        .get_one::<u64>("threshold")
        .copied()
        .unwrap_or(report::DEFAULT_THRESHOLD);

    let r = report::scan_sizes(&dirs, threshold)?;
    for f in r.large_files.iter() {
        println!("large {}: {}KB", f.path.display(), (f.bytes as f64 / 1024.0).round());
    }
    println!("Total files: {}", r.file_count);
    println!("Total size: {:.2}MB", r.total_megabytes());
    Ok(())
}

fn run_contact(matches: &ArgMatches) -> anyhow::Result<()> {
    let body = match matches.get_one::<PathBuf>("file") {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?
        }
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("while reading stdin")?;
            body
        }
    };

    let response = contact::handle_submission(&body);
    println!("{}", response.status);
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.status != 200 {
        bail!("submission rejected with status {}", response.status);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let ctx = context_from(&matches);
    debug!("{ctx:?}");

    match matches.subcommand() {
        Some(("list", _)) => {
            println!("{}", serde_json::to_string_pretty(&ctx.posts())?);
        }
        Some(("show", sub)) => show(&ctx, sub)?,
        Some(("check", _)) => run_check(&ctx)?,
        Some(("report", sub)) => run_report(&ctx, sub)?,
        Some(("contact", sub)) => run_contact(sub)?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
