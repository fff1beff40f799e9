use clap::Parser;
use rustmam_tools::{AttributeView, DeviceArgs};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "mamdump", about = "Print every attribute on a cartridge")]
struct Args {
    #[command(flatten)]
    device: DeviceArgs,
    /// Report per-attribute errors and carry on instead of stopping.
    #[arg(long)]
    keep_going: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Failure {
    id: rustmam_core::types::AttributeId,
    error: String,
}

#[derive(Serialize)]
struct Dump {
    attributes: Vec<AttributeView>,
    failures: Vec<Failure>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut client = match args.device.open_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot open device: {e}");
            std::process::exit(1);
        }
    };

    let result = if args.keep_going {
        client.dump_all_collecting().map(|report| Dump {
            attributes: report.attributes.iter().map(AttributeView::from).collect(),
            failures: report
                .failures
                .into_iter()
                .map(|f| Failure {
                    id: f.id,
                    error: f.error.to_string(),
                })
                .collect(),
        })
    } else {
        client.dump_all().map(|attrs| Dump {
            attributes: attrs.iter().map(AttributeView::from).collect(),
            failures: Vec::new(),
        })
    };

    let dump = match result {
        Ok(d) => d,
        Err(e) => {
            eprintln!("dump failed: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        for view in &dump.attributes {
            println!("{view}");
        }
        for f in &dump.failures {
            eprintln!("{}: {}", f.id, f.error);
        }
    }
    if !dump.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
