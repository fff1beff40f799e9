use clap::Parser;
use rustmam_core::types::{Attribute, AttributeId};
use rustmam_tools::{build_value, parse_attribute_id, DeviceArgs, FormatArg};

#[derive(Parser, Debug)]
#[command(name = "mamwrite", about = "Write one attribute to a cartridge")]
struct Args {
    #[command(flatten)]
    device: DeviceArgs,
    /// Attribute id, decimal or 0x hex.
    #[arg(value_parser = parse_attribute_id)]
    id: AttributeId,
    #[arg(long, value_enum)]
    format: FormatArg,
    value: String,
    /// Field width in bytes. Defaults to the attribute's expected length.
    #[arg(long)]
    length: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let attribute = match build_value(args.id, args.format, &args.value, args.length)
        .map_err(|e| e.to_string())
        .and_then(|value| {
            Attribute::new(args.id, args.format.into_format(), value).map_err(|e| e.to_string())
        }) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("invalid value: {e}");
            std::process::exit(1);
        }
    };

    let result = args
        .device
        .open_client()
        .map_err(Into::into)
        .and_then(|mut client| client.write_attribute(&attribute));
    match result {
        Ok(()) => println!("wrote attribute {} ({} bytes)", args.id, attribute.length()),
        Err(e) => {
            eprintln!("write of attribute {} failed: {e}", args.id);
            std::process::exit(1);
        }
    }
}
