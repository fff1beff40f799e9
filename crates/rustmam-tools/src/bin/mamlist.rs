use clap::Parser;
use rustmam_client::AttributeListMode;
use rustmam_core::types::attribute_name;
use rustmam_tools::DeviceArgs;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "mamlist", about = "List the attribute identifiers on a cartridge")]
struct Args {
    #[command(flatten)]
    device: DeviceArgs,
    /// List the attributes the drive supports instead of those present.
    #[arg(long)]
    supported: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Entry {
    id: rustmam_core::types::AttributeId,
    name: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mode = if args.supported {
        AttributeListMode::Supported
    } else {
        AttributeListMode::Available
    };
    let result = args
        .device
        .open_client()
        .map_err(Into::into)
        .and_then(|mut client| client.fetch_attribute_ids(mode));

    match result {
        Ok(ids) => {
            if args.json {
                let entries: Vec<Entry> = ids
                    .iter()
                    .map(|&id| Entry {
                        id,
                        name: attribute_name(id).into_owned(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for id in ids {
                    println!("{id}  {}", attribute_name(id));
                }
            }
        }
        Err(e) => {
            eprintln!("list failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
