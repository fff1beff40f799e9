use clap::Parser;
use rustmam_core::types::AttributeId;
use rustmam_tools::{parse_attribute_id, AttributeView, DeviceArgs};

#[derive(Parser, Debug)]
#[command(name = "mamread", about = "Read one attribute from a cartridge")]
struct Args {
    #[command(flatten)]
    device: DeviceArgs,
    /// Attribute id, decimal or 0x hex.
    #[arg(value_parser = parse_attribute_id)]
    id: AttributeId,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let result = args
        .device
        .open_client()
        .map_err(Into::into)
        .and_then(|mut client| client.fetch_attribute(args.id));

    match result {
        Ok(attr) => {
            let view = AttributeView::from(&attr);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{view}");
            }
        }
        Err(e) => {
            eprintln!("read of attribute {} failed: {e}", args.id);
            std::process::exit(1);
        }
    }
    Ok(())
}
