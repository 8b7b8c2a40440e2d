use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use sdlc_explorer::share::{parse_link, store_from_link};
use sdlc_explorer::{logging, ExplorerConfig, InteractionController, LogFormat, RecordingAdapter};

fn cli() -> Command {
    Command::new("sdlc-map")
        .version(sdlc_explorer::VERSION)
        .about("Explore and edit the SDLC process map")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("TOML config file"),
        )
        .arg(
            Arg::new("link")
                .long("link")
                .global(true)
                .value_name("URL")
                .help("Share link to start from instead of the built-in tree"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log line format on stderr"),
        )
        .subcommand(
            Command::new("project")
                .about("Print the projected graph as JSON")
                .arg(
                    Arg::new("drill")
                        .long("drill")
                        .value_name("ID")
                        .value_parser(value_parser!(usize))
                        .help("Root the view at this node id"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("List nodes whose name contains TERM")
                .arg(Arg::new("term").required(true).help("Case-insensitive substring")),
        )
        .subcommand(
            Command::new("add")
                .about("Add a node and print the new share link")
                .arg(Arg::new("name").long("name").required(true).help("Node name"))
                .arg(
                    Arg::new("level")
                        .long("level")
                        .required(true)
                        .help("Positive integer level"),
                )
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .value_name("ID")
                        .value_parser(value_parser!(usize))
                        .help("Parent node id from `project`; defaults to the root"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove every node with this exact name")
                .arg(Arg::new("name").long("name").required(true).help("Exact node name")),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename every node with this exact name")
                .arg(Arg::new("from").long("from").required(true).help("Current name"))
                .arg(Arg::new("to").long("to").required(true).help("New name")),
        )
        .subcommand(
            Command::new("coverage")
                .about("Set AI coverage on matching leaves and roll it up")
                .arg(Arg::new("name").long("name").required(true).help("Leaf name"))
                .arg(
                    Arg::new("percent")
                        .long("percent")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("Coverage in 0..=100"),
                ),
        )
        .subcommand(Command::new("share").about("Print the share link for the tree"))
}

fn required<'a>(args: &'a ArgMatches, id: &str) -> anyhow::Result<&'a String> {
    args.get_one::<String>(id)
        .with_context(|| format!("missing --{id}"))
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let format: LogFormat = matches
        .get_one::<String>("log-format")
        .map_or(Ok(LogFormat::Text), |s| s.parse())
        .map_err(anyhow::Error::msg)?;
    logging::init(format)?;

    let config = match matches.get_one::<String>("config") {
        Some(path) => ExplorerConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => ExplorerConfig::default(),
    };
    let link = matches
        .get_one::<String>("link")
        .map(String::as_str)
        .map(parse_link)
        .transpose()?;
    let store = store_from_link(link.as_ref());

    let mut ctl = InteractionController::new(store, RecordingAdapter::new(), config)?;

    match matches.subcommand() {
        Some(("project", args)) => {
            if let Some(id) = args.get_one::<usize>("drill").copied() {
                if !ctl.drill_into(id)? {
                    tracing::warn!(id, "node has no children; showing full tree");
                }
            }
            println!("{}", serde_json::to_string_pretty(ctl.projection())?);
        }
        Some(("search", args)) => {
            let term = required(args, "term")?;
            let hits = ctl.search(term);
            for id in &hits {
                if let Some(node) = ctl.projection().node(*id) {
                    println!("{id}\t{}", node.name);
                }
            }
            if hits.is_empty() {
                eprintln!("no match for '{term}'");
            }
        }
        Some(("add", args)) => {
            let name = required(args, "name")?;
            let level = required(args, "level")?;
            let parent = args.get_one::<usize>("parent").copied();
            ctl.add_node(name, level, parent)?;
            println!("{}", ctl.share_link());
        }
        Some(("remove", args)) => {
            let name = required(args, "name")?;
            if ctl.remove_node(name) == 0 {
                eprintln!("no node named '{name}'");
            }
            println!("{}", ctl.share_link());
        }
        Some(("rename", args)) => {
            let renamed = ctl.rename_node(required(args, "from")?, required(args, "to")?)?;
            eprintln!("renamed {renamed} node(s)");
            println!("{}", ctl.share_link());
        }
        Some(("coverage", args)) => {
            let name = required(args, "name")?;
            let Some(percent) = args.get_one::<f64>("percent").copied() else {
                bail!("missing --percent");
            };
            let updated = ctl.set_ai_percentage(name, percent)?;
            eprintln!("updated {updated} leaf node(s)");
            println!("{}", ctl.share_link());
        }
        Some(("share", _)) => println!("{}", ctl.share_link()),
        _ => bail!("unknown command; see --help"),
    }
    Ok(())
}
