use clap::Parser;
use roulette::{Roulette, RouletteCommand, RouletteConfig};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

#[derive(Parser, Debug)]
#[command(version, about = "Spin a wheel to pick one of the given names", long_about = None)]
struct Args {
    /// Names to put on the wheel before it opens
    names: Vec<String>,

    /// Seed for the spin random source, makes every spin sequence repeatable
    #[arg(short, long)]
    seed: Option<u64>,

    /// TrueType/OpenType font for labels (defaults to a system font)
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Also read names from stdin, one per line
    #[arg(long)]
    stdin: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = RouletteConfig::builder()
        .maybe_font_path(args.font)
        .build();

    let mut roulette = Roulette::new(config);
    if let Some(seed) = args.seed {
        roulette = roulette.with_seed(seed);
    }
    for name in args.names {
        roulette.add_name(name);
    }

    let winner = if args.stdin {
        let (sender, receiver) = mpsc::channel();

        // Feed piped names into the running wheel
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let name = line.trim_end_matches('\r').to_string();
                if name.is_empty() {
                    continue;
                }
                if sender.send(RouletteCommand::AddName(name)).is_err() {
                    break;
                }
            }
        });

        roulette.show_with_commands(receiver)?
    } else {
        roulette.show()?
    };

    if let Some(winner) = winner {
        println!("{}", winner);
    }
    Ok(())
}
