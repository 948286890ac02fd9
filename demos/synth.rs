use clap::Parser;

use bool_synth::format::FormatConfig;
use bool_synth::{layout, parse, reconstruct, simplify, stringify, truth_table};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Boolean expression, e.g. "a'b + ab'" or "NAND(a, b, c)".
    #[arg(value_name = "EXPR")]
    expr: String,

    /// Write NAND/NOR in De Morgan expanded form.
    #[clap(long)]
    expanded: bool,

    /// Print the circuit in DOT format.
    #[clap(long)]
    dot: bool,

    /// Print the truth table.
    #[clap(long)]
    table: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = FormatConfig { expanded: args.expanded };

    let e = parse(&args.expr)?;
    println!("parsed     = {}", stringify(&e, &config));
    println!("variables  = {:?}", e.collect_variables());
    println!("depth      = {}, size = {}", e.depth(), e.size());

    let s = simplify(&e);
    println!("simplified = {}", stringify(&s, &config));

    let graph = layout(&e);
    println!(
        "circuit    = {} inputs, {} gates, {} edges",
        graph.inputs().count(),
        graph.gates().count(),
        graph.edges.len()
    );
    let back = reconstruct(&graph.nodes, &graph.edges)?;
    println!("rebuilt    = {}", stringify(&back, &config));
    assert!(back.equivalent(&e));

    if args.table {
        let table = truth_table(&e);
        println!();
        println!("{} | f", table.variables.join(" "));
        for row in &table.rows {
            let values: Vec<&str> = row.assignment.iter().map(|&v| if v { "1" } else { "0" }).collect();
            println!("{} | {}", values.join(" "), u8::from(row.result));
        }
    }

    if args.dot {
        println!();
        print!("{}", graph.to_dot()?);
    }

    Ok(())
}
